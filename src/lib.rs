//! DreamTalk - dream journaling core
//!
//! This crate records dreams from the microphone with a hold-to-record,
//! slide-to-lock control and interprets dream descriptions with OpenAI,
//! optionally keeping them in a Supabase-backed journal.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, pure state machines, journal rows, and errors
//! - **Application**: Port traits, the permission gate, the recording session,
//!   the interaction state machine, and the interpret use case
//! - **Infrastructure**: Adapter implementations (cpal, OpenAI, Supabase, XDG config, etc.)
//! - **CLI**: Command-line interface, argument parsing, and terminal input handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
