// src/gps/gpsd.rs
//! gpsd client used to keep the receiver watched

use super::link::GpsLink;
use crate::error::{Result, WnbError};
use serde::Deserialize;
use tokio::{
    io::{AsyncWriteExt, BufReader},
    net::TcpStream,
};

const WATCH_ENABLE: &str = "?WATCH={\"enable\":true,\"json\":true}\n";
const WATCH_DISABLE: &str = "?WATCH={\"enable\":false}\n";

#[derive(Debug, Deserialize)]
struct GpsdMessage {
    class: String,
    #[serde(default)]
    mode: Option<u8>,
    #[serde(default)]
    release: Option<String>,
}

/// Connect to a gpsd daemon and enable watching
pub async fn connect_gpsd(host: &str, port: u16) -> Result<BufReader<TcpStream>> {
    let mut stream = TcpStream::connect(format!("{}:{}", host, port))
        .await
        .map_err(|e| WnbError::Connection(format!("Failed to connect to gpsd at {}:{}: {}", host, port, e)))?;

    stream
        .write_all(WATCH_ENABLE.as_bytes())
        .await
        .map_err(|e| WnbError::Connection(format!("Failed to send WATCH command: {}", e)))?;

    Ok(BufReader::new(stream))
}

/// Tell gpsd we no longer need the receiver
pub async fn disable_watch(reader: &mut BufReader<TcpStream>) -> Result<()> {
    reader.get_mut().write_all(WATCH_DISABLE.as_bytes()).await?;
    Ok(())
}

/// Update fix state from a single line of gpsd JSON
pub fn inspect_gpsd_json(link: &mut GpsLink, line: &str) -> Result<()> {
    let msg: GpsdMessage = serde_json::from_str(line)
        .map_err(|e| WnbError::Parse(format!("Failed to parse gpsd JSON: {}", e)))?;

    match msg.class.as_str() {
        "TPV" => {
            if let Some(mode) = msg.mode {
                link.has_fix = mode >= 2;
            }
        }
        "VERSION" => {
            if let Some(release) = msg.release {
                tracing::info!(release = %release, "connected to gpsd");
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tpv_fix() {
        let mut link = GpsLink::new();
        let json = r#"{"class":"TPV","device":"/dev/ttyUSB0","mode":3,"lat":48.117,"lon":11.517}"#;
        inspect_gpsd_json(&mut link, json).unwrap();
        assert!(link.has_fix);

        let json = r#"{"class":"TPV","device":"/dev/ttyUSB0","mode":1}"#;
        inspect_gpsd_json(&mut link, json).unwrap();
        assert!(!link.has_fix);
    }

    #[test]
    fn test_sky_ignored() {
        let mut link = GpsLink::new();
        let json = r#"{"class":"SKY","hdop":1.2,"satellites":[{"PRN":1,"ss":42,"used":true}]}"#;
        inspect_gpsd_json(&mut link, json).unwrap();
        assert!(!link.has_fix);
    }

    #[test]
    fn test_invalid_json() {
        let mut link = GpsLink::new();
        assert!(matches!(
            inspect_gpsd_json(&mut link, r#"{"invalid": json"#),
            Err(WnbError::Parse(_))
        ));
    }
}
