//! CLI argument definitions using Clap

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::gesture::LockThreshold;
use crate::domain::recording::Duration;
use crate::domain::symbols::CategoryFilter;

/// DreamTalk - record your dreams and have them interpreted
#[derive(Parser, Debug)]
#[command(name = "dreamtalk")]
#[command(version)]
#[command(about = "Dream journal: hold-to-record capture and AI dream interpretation")]
#[command(long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interpret a dream description (reads stdin when TEXT is omitted)
    Interpret(InterpretArgs),
    /// Record a dream with the hold-to-record control
    Record(RecordArgs),
    /// Sign in, sign up, sign out, or show the current account
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// List journaled dreams, newest first
    History {
        /// Maximum number of dreams to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
    /// Browse the built-in dream symbol library
    Symbols(SymbolsArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InterpretArgs {
    /// The dream, as you remember it
    pub text: Option<String>,

    /// Save the dream and its interpretation to the journal
    #[arg(short, long)]
    pub save: bool,

    /// Print the interpretation as JSON
    #[arg(long)]
    pub json: bool,

    /// Language of the interpretation (e.g. Turkish, English)
    #[arg(short = 'L', long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Attach a recording (as produced by `dreamtalk record`) to the saved dream
    #[arg(long, value_name = "PATH", requires = "save")]
    pub audio: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SymbolsArgs {
    /// Only symbols whose title or meaning contains this text
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// One of: all, nature, animals, objects
    #[arg(short, long, default_value = "all")]
    pub category: CategoryFilter,

    /// Print the matches as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Upward slide distance that locks the recording
    #[arg(long, value_name = "POINTS")]
    pub lock_threshold: Option<String>,

    /// Stop automatically after this long (e.g. 90s, 5m)
    #[arg(long, value_name = "TIME")]
    pub max_duration: Option<String>,

    /// Disable haptic feedback (terminal bell)
    #[arg(long)]
    pub no_haptics: bool,

    /// Print the finished recording as JSON
    #[arg(long)]
    pub json: bool,
}

/// Account action subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AccountAction {
    /// Sign in with email and password
    SignIn {
        #[arg(long)]
        email: String,
        /// Password (prompted on stdin when omitted)
        #[arg(long, env = "DREAMTALK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    SignUp {
        #[arg(long)]
        email: String,
        /// Name shown on your profile
        #[arg(long)]
        name: String,
        /// Password (prompted on stdin when omitted)
        #[arg(long, env = "DREAMTALK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and forget the stored session
    SignOut,
    /// Show the signed-in account and profile
    Status,
}

/// Config action subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed interpret options
#[derive(Debug, Clone)]
pub struct InterpretOptions {
    pub text: String,
    pub save: bool,
    pub json: bool,
    pub audio: Option<String>,
}

/// Parsed record options
#[derive(Debug, Clone, Copy)]
pub struct RecordOptions {
    pub lock_threshold: LockThreshold,
    pub max_duration: Duration,
    pub haptics: bool,
    pub json: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "openai_api_key",
    "openai_model",
    "language",
    "supabase_url",
    "supabase_anon_key",
    "lock_threshold",
    "max_duration",
    "haptics",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
