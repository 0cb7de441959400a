use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Financial summary of poker tournament results from hand-history exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tourney-report",
    about = "Financial summary of poker tournament results from hand-history exports",
    version
)]
pub struct Settings {
    /// Tournament summary files, or directories holding an unpacked export
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output format
    #[arg(long, default_value = "json", value_parser = ["json", "summary"])]
    pub format: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Logging level
    #[arg(
        long,
        env = "TOURNEY_REPORT_LOG",
        default_value = "WARNING",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"]
    )]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply overrides.
    pub fn load() -> Self {
        Self::parse().resolved()
    }

    /// Same as [`Settings::load`] but from an explicit argument list.
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::try_parse_from(args)?.resolved())
    }

    /// `true` when the human-readable summary was requested.
    pub fn wants_summary(&self) -> bool {
        self.format == "summary"
    }

    /// `--debug` overrides the log level.
    fn resolved(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
