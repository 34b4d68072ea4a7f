use crate::*;
use std::fmt::Write;
use std::path::Path;
use std::path::PathBuf;

/// Persists the event log of a [`GameState`].
///
/// With a path, the full trace is written in the chosen [`Format`].
/// Without one, JSON goes to stdout in full and the other formats print
/// a short summary.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLogger {
    path: Option<PathBuf>,
    format: Format,
}

impl EventLogger {
    /// Unknown formats are rejected here, before anything is played.
    pub fn new(path: Option<PathBuf>, format: &str) -> Result<Self, GameError> {
        Ok(Self {
            path,
            format: Format::try_from(format)?,
        })
    }
    pub fn file(path: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            path: Some(path.into()),
            format,
        }
    }
    pub fn stdout(format: Format) -> Self {
        Self { path: None, format }
    }
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
    pub fn format(&self) -> Format {
        self.format
    }

    /// Writes the trace to its destination.
    pub fn dump(&self, state: &GameState) -> anyhow::Result<()> {
        match &self.path {
            Some(path) => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    std::fs::create_dir_all(dir)?;
                }
                std::fs::write(path, self.render(state)?)?;
                log::info!("[logger] wrote {} trace to {}", self.format, path.display());
            }
            None => match self.format {
                Format::Json => println!("{}", self.render(state)?),
                _ => println!("{}", Self::summary(state)),
            },
        }
        Ok(())
    }

    /// The exact text a file export would contain.
    pub fn render(&self, state: &GameState) -> anyhow::Result<String> {
        match self.format {
            Format::Json => Ok(serde_json::to_string_pretty(&LogFile::from(state))?),
            Format::Csv => Self::csv(state),
            Format::Text => Self::text(state),
        }
    }

    /// Reads a JSON export back.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<LogFile> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn summary(state: &GameState) -> String {
        format!(
            "Event Log Summary:\n  Total events: {}\n  Total rounds: {}\n  Players: {}\n  Status: {}",
            state.event_log().len(),
            state.round_history().len(),
            state.players().join(", "),
            state.status()
        )
    }
}

impl EventLogger {
    fn csv(state: &GameState) -> anyhow::Result<String> {
        let mut out = String::from("round,event,details,status\n");
        for event in state.event_log() {
            writeln!(
                out,
                "{},{},{},{}",
                event.round,
                event.event,
                quote(&serde_json::to_string(&event.details)?),
                event.status
            )?;
        }
        Ok(out)
    }

    fn text(state: &GameState) -> anyhow::Result<String> {
        let mut out = String::new();
        writeln!(out, "Game Experiment Log")?;
        writeln!(out, "==================")?;
        writeln!(out)?;
        writeln!(out, "Experiment Info:")?;
        writeln!(out, "  Rounds: {}", state.num_rounds())?;
        writeln!(out, "  Players: {}", state.players().join(", "))?;
        writeln!(out, "  Sequential: {}", state.sequential())?;
        writeln!(out, "  Status: {}", state.status())?;
        writeln!(out)?;
        writeln!(out, "Event Log:")?;
        writeln!(out, "----------")?;
        for event in state.event_log() {
            writeln!(out, "Round {} - {}", event.round, event.event)?;
            if event.details.as_object().is_some_and(|d| !d.is_empty()) {
                writeln!(
                    out,
                    "  Details: {}",
                    serde_json::to_string_pretty(&event.details)?
                )?;
            }
            writeln!(out)?;
        }
        writeln!(out, "Round History:")?;
        writeln!(out, "-------------")?;
        for round in state.round_history() {
            writeln!(out, "Round {}:", round.round)?;
            writeln!(out, "  Actions: {}", serde_json::to_string(&round.actions)?)?;
            writeln!(out, "  Rewards: {}", serde_json::to_string(&round.rewards)?)?;
            writeln!(out)?;
        }
        Ok(out)
    }
}

/// Quotes a CSV field when it contains a delimiter, quote or newline.
fn quote(field: &str) -> String {
    match field.contains([',', '"', '\n']) {
        true => format!("\"{}\"", field.replace('"', "\"\"")),
        false => field.to_string(),
    }
}
