//! DreamTalk CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dreamtalk::cli::{
    account_cmd::{handle_account_command, handle_history},
    app::{
        journal_client, load_merged_config, read_dream_text, run_interpret, EXIT_ERROR,
        EXIT_USAGE_ERROR,
    },
    args::{Cli, Commands, InterpretArgs, RecordArgs},
    config_cmd::handle_config_command,
    presenter::Presenter,
    record_app::run_record,
    symbols_cmd::handle_symbols,
    InterpretOptions, RecordOptions,
};
use dreamtalk::domain::config::AppConfig;
use dreamtalk::domain::gesture::LockThreshold;
use dreamtalk::domain::recording::Duration;
use dreamtalk::infrastructure::XdgConfigStore;

const NO_JOURNAL: &str =
    "Dream journal is not configured. Set supabase_url and supabase_anon_key via 'dreamtalk config set'";

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "dreamtalk=warn",
        1 => "dreamtalk=debug",
        _ => "dreamtalk=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let presenter = Presenter::new();

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Interpret(args) => interpret(args, &presenter).await,
        Commands::Record(args) => record(args, &presenter).await,
        Commands::Symbols(args) => {
            if let Err(e) = handle_symbols(&args, &presenter) {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Account { action } => {
            let config = load_merged_config(AppConfig::empty()).await;
            let Some(client) = journal_client(&config).await else {
                presenter.error(NO_JOURNAL);
                return ExitCode::from(EXIT_ERROR);
            };
            if let Err(e) = handle_account_command(action, &client, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::History { limit } => {
            let config = load_merged_config(AppConfig::empty()).await;
            let Some(client) = journal_client(&config).await else {
                presenter.error(NO_JOURNAL);
                return ExitCode::from(EXIT_ERROR);
            };
            if let Err(e) = handle_history(&client, limit, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
    }
}

async fn interpret(args: InterpretArgs, presenter: &Presenter) -> ExitCode {
    let cli_config = AppConfig {
        language: args.language.clone(),
        ..Default::default()
    };
    let config = load_merged_config(cli_config).await;

    let text = match read_dream_text(args.text, presenter) {
        Ok(text) => text,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let options = InterpretOptions {
        text,
        save: args.save,
        json: args.json,
        audio: args.audio,
    };

    run_interpret(options, &config).await
}

async fn record(args: RecordArgs, presenter: &Presenter) -> ExitCode {
    // Validate CLI values before merging so a bad flag is a usage error
    let lock_threshold = match args.lock_threshold.as_deref().map(str::parse::<LockThreshold>) {
        Some(Ok(threshold)) => Some(threshold.points()),
        Some(Err(e)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => None,
    };
    let max_duration = match args.max_duration.as_deref().map(str::parse::<Duration>) {
        Some(Ok(duration)) => Some(duration.to_string()),
        Some(Err(e)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => None,
    };

    let cli_config = AppConfig {
        lock_threshold,
        max_duration,
        haptics: if args.no_haptics { Some(false) } else { None },
        ..Default::default()
    };
    let config = load_merged_config(cli_config).await;

    let options = RecordOptions {
        lock_threshold: config.lock_threshold_or_default(),
        max_duration: config.max_duration_or_default(),
        haptics: config.haptics_or_default(),
        json: args.json,
    };

    run_record(options).await
}
