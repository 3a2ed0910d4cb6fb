//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::interaction::InteractionState;
use crate::domain::interpretation::InterpretationResult;
use crate::domain::journal::{Dream, DreamStatus};
use crate::domain::recording::{format_elapsed, Artifact, Duration};
use crate::domain::symbols::{LibrarySymbol, MAX_POPULARITY};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// A handle other tasks can print through without tearing the spinner
    pub fn spinner_handle(&self) -> Option<ProgressBar> {
        self.spinner.clone()
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the actual result)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format the live recording line: `Recording 0:07 / 5:00 [locked]`
    pub fn format_recording(&self, state: InteractionState, elapsed: u64, max: Duration) -> String {
        let label = match state {
            InteractionState::Locked => "Recording (locked)",
            InteractionState::Finalizing => "Finishing",
            _ => "Recording",
        };
        format!(
            "{} {} / {}",
            label,
            format_elapsed(elapsed).bold(),
            format_elapsed(max.as_secs())
        )
    }

    /// Format the slide-to-lock indicator
    pub fn format_lock_progress(&self, progress: f64) -> String {
        let bar_width = 10;
        let filled = ((progress.clamp(0.0, 1.0)) * bar_width as f64).round() as usize;
        format!(
            "lock [{}{}]",
            "█".repeat(filled).cyan(),
            "░".repeat(bar_width - filled)
        )
    }

    /// Print a finished recording
    pub fn artifact(&self, artifact: &Artifact) {
        self.output(&artifact.uri);
        eprintln!(
            "{} {} recorded ({})",
            "●".red(),
            format_elapsed(artifact.duration_seconds),
            artifact.human_readable_size()
        );
    }

    /// Print a full interpretation in readable form
    pub fn interpretation(&self, result: &InterpretationResult) {
        self.output(&format!("{}\n{}\n", "Summary".bold().cyan(), result.summary));
        self.output(&format!(
            "{}\n{}\n",
            "Interpretation".bold().cyan(),
            result.interpretation
        ));

        if !result.symbols.is_empty() {
            self.output(&"Symbols".bold().cyan().to_string());
            for symbol in &result.symbols {
                self.output(&format!(
                    "  {} {}: {}",
                    "•".cyan(),
                    symbol.symbol.bold(),
                    symbol.meaning
                ));
            }
            self.output("");
        }

        let mood = &result.mood;
        if !mood.primary.is_empty() {
            let mut line = mood.primary.clone();
            if !mood.secondary.is_empty() {
                line.push_str(&format!(" ({})", mood.secondary.join(", ")));
            }
            if !mood.emotional_tone.is_empty() {
                line.push_str(&format!(" - {}", mood.emotional_tone));
            }
            self.output(&format!("{}\n{}\n", "Mood".bold().cyan(), line));
        }

        if !result.themes.is_empty() {
            self.output(&format!(
                "{}\n{}\n",
                "Themes".bold().cyan(),
                result.themes.join(", ")
            ));
        }

        if !result.suggestions.is_empty() {
            self.output(&"Suggestions".bold().cyan().to_string());
            for suggestion in &result.suggestions {
                self.output(&format!("  {} {}", "•".cyan(), suggestion));
            }
        }
    }

    /// One journal line per dream
    /// Library entry: header line with category and rating, then the meaning
    pub fn symbol(&self, symbol: &LibrarySymbol) {
        self.output(&format!(
            "{} {} {} {}",
            symbol.glyph,
            symbol.title.bold(),
            format!("({})", symbol.category).dimmed(),
            popularity_stars(symbol.popularity).yellow()
        ));
        self.output(&format!("  {}\n", symbol.meaning));
    }

    pub fn dream_line(&self, dream: &Dream) -> String {
        let status = match dream.status {
            DreamStatus::Completed => dream.status.to_string().green(),
            DreamStatus::Processing => dream.status.to_string().yellow(),
            DreamStatus::Failed => dream.status.to_string().red(),
        };
        let headline = dream
            .interpretation_summary
            .as_deref()
            .or(dream.title.as_deref())
            .unwrap_or(&dream.content);
        let date = dream.created_at.get(..10).unwrap_or(&dream.created_at);
        let favorite = if dream.is_favorite { " ★" } else { "" };
        format!(
            "{} [{}] {}{}",
            date.dimmed(),
            status,
            truncate(headline, 72),
            favorite
        )
    }
}

fn popularity_stars(popularity: u8) -> String {
    let filled = popularity.min(MAX_POPULARITY) as usize;
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(MAX_POPULARITY as usize - filled)
    )
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorten to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
