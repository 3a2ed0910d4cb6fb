//! Runner for the interpret command and shared config loading

use std::env;
use std::io::{IsTerminal, Read};
use std::process::ExitCode;

use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::application::{InterpretCallbacks, InterpretDreamUseCase, InterpretInput};
use crate::domain::config::AppConfig;
use crate::domain::journal::InputType;
use crate::infrastructure::config::data_dir;
use crate::infrastructure::{OpenAiInterpreter, SupabaseClient, XdgConfigStore};

use super::args::InterpretOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Overrides the OpenAI endpoint, e.g. for a proxy
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Run one dream interpretation
pub async fn run_interpret(options: InterpretOptions, config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let interpreter = build_interpreter(config);
    let journal = if options.save {
        journal_client(config).await
    } else {
        None
    };

    let use_case = InterpretDreamUseCase::new(interpreter, journal);

    let input = InterpretInput {
        text: options.text,
        input_type: if options.audio.is_some() {
            InputType::Voice
        } else {
            InputType::Text
        },
        audio_url: options.audio,
        save: options.save,
    };

    presenter.start_spinner("Preparing...");
    let callbacks = match presenter.spinner_handle() {
        Some(bar) => {
            let start_bar = bar.clone();
            InterpretCallbacks {
                on_interpreting_start: Some(Box::new(move || {
                    start_bar.set_message("Interpreting your dream...");
                })),
                on_interpreting_end: Some(Box::new(move || {
                    bar.set_message("Interpretation received");
                })),
            }
        }
        None => InterpretCallbacks::default(),
    };

    match use_case.execute(input, callbacks).await {
        Ok(output) => {
            presenter.stop_spinner();
            debug!(estimated_tokens = output.estimated_tokens, "dream interpreted");

            if options.json {
                match serde_json::to_string_pretty(&output.result) {
                    Ok(json) => presenter.output(&json),
                    Err(e) => {
                        presenter.error(&format!("Failed to encode interpretation: {}", e));
                        return ExitCode::from(EXIT_ERROR);
                    }
                }
            } else {
                presenter.interpretation(&output.result);
            }

            if let Some(dream) = output.dream {
                presenter.success(&format!("Saved to your journal ({})", dream.id));
            }

            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail("Interpretation failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Resolve the dream text from the argument or stdin
pub fn read_dream_text(text: Option<String>, presenter: &Presenter) -> Result<String, String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        presenter.info("Describe your dream, then press Ctrl-D");
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .map_err(|e| format!("Failed to read dream from stdin: {}", e))?;
    Ok(buffer)
}

/// OpenAI adapter from the merged config
pub fn build_interpreter(config: &AppConfig) -> OpenAiInterpreter {
    let interpreter = OpenAiInterpreter::new(config.openai_api_key.clone())
        .with_model(config.openai_model_or_default())
        .with_language(config.language_or_default());

    match env::var(OPENAI_BASE_URL_ENV) {
        Ok(url) if !url.is_empty() => interpreter.with_base_url(url),
        _ => interpreter,
    }
}

/// Supabase client with the persisted session restored, if the backend is configured
pub async fn journal_client(config: &AppConfig) -> Option<SupabaseClient> {
    let (url, anon_key) = config.supabase()?;
    let client = SupabaseClient::new(url, anon_key).with_session_file(data_dir().join("session.json"));
    client.restore_session().await;
    Some(client)
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let file_config = XdgConfigStore::new().load_or_empty().await;

    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

fn env_config() -> AppConfig {
    let var = |name: &str| env::var(name).ok().filter(|s| !s.is_empty());
    AppConfig {
        openai_api_key: var("OPENAI_API_KEY"),
        openai_model: var("OPENAI_MODEL"),
        supabase_url: var("SUPABASE_URL"),
        supabase_anon_key: var("SUPABASE_ANON_KEY"),
        ..Default::default()
    }
}
