use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

// ── Events from pipeline to console ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Log(String),
    Warning(String),

    LookupsStarted { total: usize },
    /// Sent before the request for `title` goes out.
    LookupStarted { title: String },
    FilmFound { title: String, year: String, genre: String, runtime: String },
    /// No usable record. `reason` carries the API's own message, if any.
    FilmNotFound { reason: Option<String> },
    LookupFailed { kind: &'static str, message: String },
    LookupsComplete { found: usize, total: usize },

    FileWritten { what: &'static str, path: PathBuf },
    WriteFailed { target: String, message: String },

    Finished { written: usize, failed: usize },
}

// ── EventSink trait ─────────────────────────────────────────────────────────

/// Abstraction for sending pipeline events.
pub trait EventSink: Send + Sync {
    fn send(&self, event: UiEvent);
}

// ── Console sink ────────────────────────────────────────────────────────────

#[derive(Default)]
struct ConsoleState {
    pb: Option<ProgressBar>,
    /// Title whose result line hasn't been printed yet (progress bar mode only).
    pending_title: Option<String>,
}

pub struct ConsoleSink {
    state: Mutex<ConsoleState>,
}

impl ConsoleSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(ConsoleState::default()),
        })
    }

    fn make_pb(total: u64) -> ProgressBar {
        let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stdout());
        let style = ProgressStyle::default_bar()
            .template("  {spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }
}

impl ConsoleState {
    fn visible_pb(&self) -> Option<&ProgressBar> {
        self.pb.as_ref().filter(|pb| !pb.is_hidden())
    }

    /// Print a full line, above the progress bar when one is showing.
    fn line(&mut self, text: String) {
        let prefix = self
            .pending_title
            .take()
            .map(|title| format!("Lookup {} : ", title))
            .unwrap_or_default();
        match self.visible_pb() {
            Some(pb) => pb.println(format!("{}{}", prefix, text)),
            None => println!("{}{}", prefix, text),
        }
    }

    fn advance(&self) {
        if let Some(pb) = &self.pb {
            pb.inc(1);
        }
    }
}

impl EventSink for ConsoleSink {
    fn send(&self, event: UiEvent) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match event {
            UiEvent::Log(msg) => state.line(msg),
            UiEvent::Warning(msg) => state.line(format!("WARNING: {}", msg).yellow().to_string()),

            UiEvent::LookupsStarted { total } => {
                state.pb = Some(Self::make_pb(total as u64));
            }
            UiEvent::LookupStarted { title } => match state.visible_pb().cloned() {
                Some(pb) => {
                    pb.set_message(title.clone());
                    state.pending_title = Some(title);
                }
                None => {
                    print!("Lookup {} : ", title);
                    let _ = io::stdout().flush();
                }
            },
            UiEvent::FilmFound { title, year, genre, runtime } => {
                state.line(format!(
                    "{} {} {} {}",
                    title.dark_magenta(),
                    year.dark_yellow(),
                    genre.dark_blue(),
                    runtime.dark_green()
                ));
                state.advance();
            }
            UiEvent::FilmNotFound { reason } => {
                let text = match reason {
                    Some(reason) => format!("No film info found ({})", reason),
                    None => "No film info found".to_string(),
                };
                state.line(text.red().to_string());
                state.advance();
            }
            UiEvent::LookupFailed { kind, message } => {
                let text = format!("Encountered exception fetching webrequest: {}:{}", kind, message);
                state.line(text.on_dark_red().to_string());
            }
            UiEvent::LookupsComplete { found, total } => {
                if let Some(pb) = state.pb.take() {
                    pb.finish_and_clear();
                }
                state.line(format!("  {} of {} films found", found, total));
            }

            UiEvent::FileWritten { what, path } => {
                let text = format!("{} written to {}", what, path.display());
                state.line(text.green().to_string());
            }
            UiEvent::WriteFailed { target, message } => {
                let text = format!("Encountered exception while writing to {}: {}", target, message);
                state.line(text.on_dark_red().to_string());
            }

            UiEvent::Finished { written, failed } => {
                if failed == 0 {
                    state.line(format!("\n=== Complete: {} file(s) written ===", written));
                } else {
                    state.line(format!(
                        "\n=== Complete: {} file(s) written, {} failed ===",
                        written, failed
                    ));
                }
            }
        }
    }
}

// ── Recording sink (tests) ──────────────────────────────────────────────────

#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<UiEvent>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl EventSink for RecordingSink {
    fn send(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}
