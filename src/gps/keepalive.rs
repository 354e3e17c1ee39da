// src/gps/keepalive.rs
//! Keeps a GPS source streaming while the calculator screen is visible

use super::{gpsd, link::GpsLink, nmea};
use crate::error::{Result, WnbError};
use std::{
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::watch,
};
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

/// GPS source the screen keeps alive
#[derive(Debug, Clone, PartialEq)]
pub enum GpsSource {
    None,
    Serial { port: String, baudrate: u32 },
    Gpsd { host: String, port: u16 },
}

impl GpsSource {
    pub fn name(&self) -> &'static str {
        match self {
            GpsSource::None => "none",
            GpsSource::Serial { .. } => "serial",
            GpsSource::Gpsd { .. } => "gpsd",
        }
    }
}

/// Subscribe/unsubscribe capability the screen holds while visible
pub trait KeepAlive {
    fn subscribe(&mut self) -> Result<()>;
    fn unsubscribe(&mut self);
    fn is_subscribed(&self) -> bool;
}

pub struct GpsKeepAlive {
    source: GpsSource,
    link: Arc<RwLock<GpsLink>>,
    stop: Option<watch::Sender<bool>>,
}

impl GpsKeepAlive {
    pub fn new(source: GpsSource) -> Self {
        Self {
            source,
            link: Arc::new(RwLock::new(GpsLink::new())),
            stop: None,
        }
    }

    pub fn source(&self) -> &GpsSource {
        &self.source
    }

    /// Snapshot of the link state
    pub fn link(&self) -> GpsLink {
        self.link.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl KeepAlive for GpsKeepAlive {
    fn subscribe(&mut self) -> Result<()> {
        if self.stop.is_some() {
            return Ok(());
        }

        let (stop, stopped) = watch::channel(false);
        let link = Arc::clone(&self.link);

        match self.source.clone() {
            GpsSource::None => {
                debug!("no GPS source configured, keep-alive is a no-op");
            }
            GpsSource::Serial { port, baudrate } => {
                let handle = tokio::runtime::Handle::try_current()
                    .map_err(|_| WnbError::Other("GPS keep-alive requires a tokio runtime".to_string()))?;
                handle.spawn(keep_serial(port, baudrate, link, stopped));
            }
            GpsSource::Gpsd { host, port } => {
                let handle = tokio::runtime::Handle::try_current()
                    .map_err(|_| WnbError::Other("GPS keep-alive requires a tokio runtime".to_string()))?;
                handle.spawn(keep_gpsd(host, port, link, stopped));
            }
        }

        info!(source = self.source.name(), "GPS keep-alive acquired");
        self.stop = Some(stop);
        Ok(())
    }

    fn unsubscribe(&mut self) {
        if let Some(stop) = self.stop.take() {
            // Receiver may already be gone if the stream closed
            let _ = stop.send(true);
            info!(source = self.source.name(), "GPS keep-alive released");
        }
    }

    fn is_subscribed(&self) -> bool {
        self.stop.is_some()
    }
}

impl Drop for GpsKeepAlive {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

async fn keep_serial(port: String, baudrate: u32, link: Arc<RwLock<GpsLink>>, stopped: watch::Receiver<bool>) {
    let serial = match tokio_serial::new(port.as_str(), baudrate)
        .timeout(Duration::from_millis(1000))
        .open_native_async()
    {
        Ok(serial) => serial,
        Err(e) => {
            warn!(port = %port, error = %e, "failed to open GPS serial port");
            return;
        }
    };
    info!(port = %port, baudrate, "GPS serial port open");

    let mut reader = BufReader::new(serial);
    drain(&mut reader, "Serial GPS", &link, stopped, nmea::inspect_nmea_sentence).await;
}

async fn keep_gpsd(host: String, port: u16, link: Arc<RwLock<GpsLink>>, stopped: watch::Receiver<bool>) {
    let mut reader = match gpsd::connect_gpsd(&host, port).await {
        Ok(reader) => reader,
        Err(e) => {
            warn!(error = %e, "gpsd unavailable");
            return;
        }
    };
    info!(host = %host, port, "watching gpsd");

    drain(&mut reader, "gpsd", &link, stopped, |link, line| {
        if let Err(e) = gpsd::inspect_gpsd_json(link, line) {
            debug!(error = %e, "ignoring gpsd line");
        }
    })
    .await;

    if let Err(e) = gpsd::disable_watch(&mut reader).await {
        debug!(error = %e, "failed to disable gpsd watch");
    }
}

/// Read lines until told to stop or the stream ends.
///
/// A partial line stays in `line` across wakeups; only a stop request
/// drops the pending read.
async fn drain<R, F>(
    reader: &mut R,
    source: &str,
    link: &RwLock<GpsLink>,
    mut stopped: watch::Receiver<bool>,
    inspect: F,
) where
    R: AsyncBufRead + Unpin,
    F: Fn(&mut GpsLink, &str),
{
    let mut line = String::new();

    loop {
        tokio::select! {
            _ = stopped.changed() => break,
            read = reader.read_line(&mut line) => match read {
                Ok(0) => {
                    info!(source, "GPS stream closed");
                    break;
                }
                Ok(_) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        let mut guard = link.write().unwrap_or_else(PoisonError::into_inner);
                        guard.record(source);
                        inspect(&mut *guard, trimmed);
                    }
                    line.clear();
                }
                Err(e) => {
                    warn!(source, error = %e, "error reading GPS stream");
                    break;
                }
            },
        }
    }
}
