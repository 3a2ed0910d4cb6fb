//! Input and signal handling for the record command
//!
//! A terminal has no finger on a button, so the hold-to-record control is
//! driven by short commands typed on stdin. Shutdown signals discard the
//! recording the same way losing focus does.

use std::io::BufRead;
use std::thread;

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::debug;

/// One control input for the record loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordInput {
    /// Let go of the control (empty line)
    Release,
    /// Slide upward by this many points (`u <points>`)
    Slide(f64),
    /// Slide straight past the lock threshold (`l`)
    Lock,
    /// Press the stop control (`s`, or end of input)
    Stop,
    /// Discard the recording (`c`, SIGINT, SIGTERM)
    Cancel,
}

/// Help line shown when recording starts
pub const INPUT_HELP: &str =
    "Enter: release | l: lock | u <points>: slide up | s: stop | c or Ctrl-C: discard";

/// Parse one line typed by the user. Unknown input yields `None`.
pub fn parse_input_line(line: &str) -> Option<RecordInput> {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    match parts.next().map(str::to_lowercase).as_deref() {
        None => Some(RecordInput::Release),
        Some("l") | Some("lock") => Some(RecordInput::Lock),
        Some("s") | Some("stop") => Some(RecordInput::Stop),
        Some("c") | Some("cancel") | Some("q") => Some(RecordInput::Cancel),
        Some("u") | Some("up") => {
            let points: f64 = parts.next()?.parse().ok()?;
            (points.is_finite() && points >= 0.0).then_some(RecordInput::Slide(points))
        }
        Some(_) => None,
    }
}

/// Record input handler
///
/// Merges stdin commands and OS shutdown signals (SIGINT/SIGTERM) into a
/// single channel for the record loop.
pub struct RecordInputHandler {
    receiver: mpsc::Receiver<RecordInput>,
}

impl RecordInputHandler {
    /// Start reading stdin and listening for shutdown signals.
    pub async fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(16);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            eprintln!();
            eprintln!("{} Received SIGINT (discard)", "↓".cyan());
            let _ = tx_int.send(RecordInput::Cancel).await;
        });

        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!("{} Received SIGTERM (discard)", "↓".cyan());
            let _ = tx_term.send(RecordInput::Cancel).await;
        });

        // A plain thread so a pending read never holds up runtime shutdown.
        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match parse_input_line(&line) {
                    Some(input) => {
                        if tx.blocking_send(input).is_err() {
                            return;
                        }
                    }
                    None => debug!(input = %line, "unrecognised record command"),
                }
            }
            let _ = tx.blocking_send(RecordInput::Stop);
        });

        Ok(Self { receiver: rx })
    }

    /// Build a handler over an existing channel
    pub fn from_receiver(receiver: mpsc::Receiver<RecordInput>) -> Self {
        Self { receiver }
    }

    /// Wait for the next input
    pub async fn recv(&mut self) -> Option<RecordInput> {
        self.receiver.recv().await
    }
}
