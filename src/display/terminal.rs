// src/display/terminal.rs
//! Terminal rendering of the weight and balance screen

use crate::{
    error::Result,
    gps::{GpsKeepAlive, GpsLink, KeepAlive},
    screen::WnbScreen,
    wnb::{station::parse_lenient, AircraftProfile, Status},
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType, DisableLineWrap, EnableLineWrap},
};
use std::{
    io::{self, Write},
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::sleep;
use tracing::warn;

/// Foreground and background for a verdict cell
fn status_colors(status: Status) -> (Color, Color) {
    match status {
        Status::Ok => (Color::Black, Color::Green),
        Status::Fail => (Color::White, Color::Red),
        Status::Neutral => (Color::Reset, Color::Reset),
    }
}

/// Re-read a profile file, repopulating the screen when its contents changed
pub fn reload_profile<K: KeepAlive>(
    screen: &mut WnbScreen<K>,
    path: &Path,
    last_contents: &mut Option<String>,
) -> Result<bool> {
    let contents = std::fs::read_to_string(path)?;
    if last_contents.as_deref() == Some(contents.as_str()) {
        return Ok(false);
    }

    let profile = AircraftProfile::from_json(&contents)?;
    screen.populate(&profile);
    *last_contents = Some(contents);
    Ok(true)
}

pub struct TerminalDisplay;

impl TerminalDisplay {
    pub fn new() -> Self {
        Self
    }

    /// Refresh loop: keeps the GPS alive, follows `file` when given, and
    /// redraws every `interval` until Ctrl+C.
    ///
    /// `file` carries the contents the screen was already populated from, so
    /// edits made on top of them survive until the file itself changes.
    pub async fn run(
        &self,
        screen: &mut WnbScreen<GpsKeepAlive>,
        file: Option<(&Path, String)>,
        interval: Duration,
    ) -> Result<()> {
        let running = Arc::new(AtomicBool::new(true));

        let running_clone = Arc::clone(&running);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                running_clone.store(false, Ordering::Relaxed);
            }
        });

        screen.show();

        let mut stdout = io::stdout();
        execute!(stdout, Hide, DisableLineWrap)?;

        let (file, mut last_contents) = match file {
            Some((path, contents)) => (Some(path), Some(contents)),
            None => (None, None),
        };
        let mut notice: Option<String> = None;

        while running.load(Ordering::Relaxed) {
            if let Some(path) = file {
                match reload_profile(screen, path, &mut last_contents) {
                    Ok(true) => notice = None,
                    Ok(false) => {}
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "could not reload profile");
                        notice = Some(format!("{}: {}", path.display(), e));
                    }
                }
            }

            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
            let link = screen.keep_alive().link();
            self.render(&mut stdout, screen, Some(&link), notice.as_deref())?;
            stdout.flush()?;

            sleep(interval).await;
        }

        screen.hide();
        execute!(stdout, Show, EnableLineWrap)?;
        println!("\nShutting down...");
        Ok(())
    }

    /// Render the whole screen
    pub fn render<K: KeepAlive>(
        &self,
        out: &mut impl Write,
        screen: &WnbScreen<K>,
        gps: Option<&GpsLink>,
        notice: Option<&str>,
    ) -> Result<()> {
        let form = screen.form();

        execute!(
            out,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\n"),
            Print(format!("Weight & Balance - {} {} {}", form.make, form.model, form.reg)),
            Print("\n"),
            Print("=".repeat(60)),
            Print("\n"),
            ResetColor
        )?;

        if let Some(link) = gps {
            execute!(out, Print(format!("GPS: {}\n", link.describe())))?;
        }
        execute!(out, Print("\n"))?;

        if screen.summary_visible() {
            self.render_envelope_section(out, screen)?;
        }
        self.render_stations_section(out, screen)?;
        if screen.summary_visible() {
            self.render_result_section(out, screen)?;
        }

        if let Some(text) = notice {
            execute!(
                out,
                SetForegroundColor(Color::Red),
                Print(format!("{}\n\n", text)),
                ResetColor
            )?;
        }

        execute!(
            out,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\n"),
            Print("Press Ctrl+C to exit"),
            Print("\n"),
            ResetColor
        )?;

        Ok(())
    }

    fn render_envelope_section<K: KeepAlive>(&self, out: &mut impl Write, screen: &WnbScreen<K>) -> Result<()> {
        let form = screen.form();

        execute!(
            out,
            SetForegroundColor(Color::Yellow),
            Print("ENVELOPE:\n"),
            ResetColor,
            Print(format!("  CG Min:  {:>10} in    CG Max: {:>10} in\n", form.cg_min, form.cg_max)),
            Print(format!("  Gross:   {:>10} lb    Empty:  {:>10} lb\n\n", form.gross, form.empty))
        )?;

        Ok(())
    }

    fn render_stations_section<K: KeepAlive>(&self, out: &mut impl Write, screen: &WnbScreen<K>) -> Result<()> {
        execute!(
            out,
            SetForegroundColor(Color::Cyan),
            Print("STATIONS:\n"),
            ResetColor,
            Print(format!(
                "  {:>2}  {:<20} {:>10} {:>12} {:>12}\n",
                "#", "Description", "Arm (in)", "Weight (lb)", "Moment"
            ))
        )?;

        for (index, row) in screen.form().stations.iter().enumerate() {
            if row.description.trim().is_empty() && row.weight.trim().is_empty() {
                continue;
            }

            let moment = if row.location.trim().is_empty() || row.weight.trim().is_empty() {
                String::new()
            } else {
                format!("{:.1}", parse_lenient(&row.location) * parse_lenient(&row.weight))
            };

            execute!(
                out,
                Print(format!(
                    "  {:>2}  {:<20} {:>10} {:>12} {:>12}\n",
                    index, row.description, row.location, row.weight, moment
                ))
            )?;
        }

        execute!(out, Print("\n"))?;
        Ok(())
    }

    fn render_result_section<K: KeepAlive>(&self, out: &mut impl Write, screen: &WnbScreen<K>) -> Result<()> {
        execute!(
            out,
            SetForegroundColor(Color::Magenta),
            Print("RESULT:\n"),
            ResetColor
        )?;

        let result = match screen.result() {
            Some(result) => result,
            None => {
                let error = screen.input_error().unwrap_or("no result");
                execute!(
                    out,
                    SetForegroundColor(Color::Red),
                    Print(format!("  {}\n\n", error)),
                    ResetColor
                )?;
                return Ok(());
            }
        };

        self.render_verdict(out, "Weight:", &format!("{:.1} lb", result.total_weight), result.weight_status)?;
        self.render_verdict(out, "CG:", &format!("{:.2} in", result.center_of_gravity), result.cg_status)?;

        let overall = match result.overall_status {
            Status::Neutral => String::new(),
            Status::Ok => "CG OK".to_string(),
            Status::Fail => "CG FAIL".to_string(),
        };
        self.render_verdict(out, "Status:", &overall, result.overall_status)?;

        execute!(out, Print("\n"))?;
        Ok(())
    }

    fn render_verdict(&self, out: &mut impl Write, label: &str, value: &str, status: Status) -> Result<()> {
        let (fg, bg) = status_colors(status);

        execute!(
            out,
            Print(format!("  {:<8} ", label)),
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(format!(" {:>12} ", value)),
            ResetColor,
            Print(format!(" {}\n", status.label()))
        )?;

        Ok(())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gps::GpsSource,
        screen::EnvelopeField,
        wnb::catalog,
    };

    fn rendered(screen: &WnbScreen<GpsKeepAlive>) -> String {
        let mut out = Vec::new();
        TerminalDisplay::new().render(&mut out, screen, None, None).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn screen() -> WnbScreen<GpsKeepAlive> {
        WnbScreen::new(GpsKeepAlive::new(GpsSource::None))
    }

    #[test]
    fn test_render_ok_profile() {
        let mut screen = screen();
        screen.load_named("C172R").unwrap();
        let text = rendered(&screen);

        assert!(text.contains("Weight & Balance - Cessna C172R N172R"));
        assert!(text.contains("Empty Weight"));
        assert!(text.contains("2300.0 lb"));
        assert!(text.contains("CG OK"));
    }

    #[test]
    fn test_render_failure() {
        let mut screen = screen();
        screen.load_named("C172R").unwrap();
        screen.set_envelope(EnvelopeField::Gross, "2000");
        let text = rendered(&screen);
        assert!(text.contains("CG FAIL"));
        assert!(text.contains("FAIL"));
    }

    #[test]
    fn test_render_input_error() {
        let mut screen = screen();
        screen.set_location(0, "abc").unwrap();
        let text = rendered(&screen);
        assert!(text.contains("Invalid number in station 0 location"));
    }

    #[test]
    fn test_hidden_summary() {
        let mut screen = screen();
        screen.toggle_summary();
        let text = rendered(&screen);
        assert!(!text.contains("ENVELOPE:"));
        assert!(!text.contains("RESULT:"));
        assert!(text.contains("STATIONS:"));
    }

    #[test]
    fn test_reload_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("load.json");
        std::fs::write(&path, catalog::piper_pa23_250().to_json().unwrap()).unwrap();

        let mut screen = screen();
        let mut last = None;
        assert!(reload_profile(&mut screen, &path, &mut last).unwrap());
        assert_eq!(screen.form().model, "PA23-250");
        assert!(!reload_profile(&mut screen, &path, &mut last).unwrap());

        std::fs::write(&path, "{").unwrap();
        assert!(reload_profile(&mut screen, &path, &mut last).is_err());
        assert_eq!(screen.form().model, "PA23-250");
    }

    #[test]
    fn test_reload_keeps_edits_until_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("load.json");
        let contents = catalog::cessna_172r().to_json().unwrap();
        std::fs::write(&path, &contents).unwrap();

        let mut screen = screen();
        screen.populate(&AircraftProfile::from_json(&contents).unwrap());
        screen.set_weight(2, "150").unwrap();

        let mut last = Some(contents);
        assert!(!reload_profile(&mut screen, &path, &mut last).unwrap());
        assert_eq!(screen.form().stations[2].weight, "150");

        std::fs::write(&path, catalog::piper_pa23_250().to_json().unwrap()).unwrap();
        assert!(reload_profile(&mut screen, &path, &mut last).unwrap());
        assert_eq!(screen.form().model, "PA23-250");
    }
}
