//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, input handling,
//! and the command runners.

pub mod account_cmd;
pub mod alerter;
pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod record_app;
pub mod signals;
pub mod symbols_cmd;

// Re-export commonly used types
pub use alerter::PresenterAlerter;
pub use app::{run_interpret, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, InterpretOptions, RecordOptions};
pub use presenter::Presenter;
pub use record_app::run_record;
