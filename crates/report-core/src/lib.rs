//! Shared types for the tournament report: the parsed record model, the
//! request-level error type, monetary rounding and formatting helpers, and
//! the command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{ReportError, Result};
pub use models::TournamentRecord;
