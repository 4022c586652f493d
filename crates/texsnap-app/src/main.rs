use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use texsnap_app::cli::{Cli, Command, OutputArgs, TokenCommand};
use texsnap_app::controller::AppController;
use texsnap_app::state::AppState;
use texsnap_app::{logging, profile};
use texsnap_config::{SettingsStore, TOKEN_KEY};
use texsnap_ocr::SimpleTexClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    let config = profile::load_config(cli.config.as_deref())?;

    let (requests, output): (_, OutputArgs) = match cli.command {
        Command::Token(command) => {
            let mut settings = profile::load_settings(&config)?;
            return run_token_command(command, &mut settings);
        }
        Command::Capture(args) => (args.requests()?, args.output),
        Command::Recognize(args) => (args.requests(), args.output),
    };

    let token = profile::resolve_token(&config)?;
    if token.is_none() {
        tracing::warn!("No service token configured, run `texsnap token set <TOKEN>`");
    }

    let recognizer = SimpleTexClient::new(
        config.ocr.api_url.clone(),
        token.unwrap_or_default(),
        Duration::from_secs(config.ocr.timeout_seconds),
    )
    .context("Failed to build the HTTP client")?;

    let document = profile::load_document(output.document.as_deref(), &config)?;
    let request_queue = config.request_queue;
    let state = Arc::new(AppState::new(config, document));

    let outcome = AppController::new(state, request_queue)
        .run(Arc::new(recognizer), requests)
        .await?;

    for recognition in &outcome.recognitions {
        tracing::info!("Confidence: {}%", recognition.score_percent());
        println!("{}", recognition.latex);
    }

    if !outcome.failures.is_empty() {
        anyhow::bail!(outcome.failures.join("; "));
    }

    Ok(())
}

fn run_token_command(command: TokenCommand, settings: &mut SettingsStore) -> anyhow::Result<()> {
    match command {
        TokenCommand::Set { token } => {
            settings.set(TOKEN_KEY, token.trim());
            settings.save()?;
            println!("Token saved to {}", settings.path().display());
        }
        TokenCommand::Show => match settings.token() {
            Some(token) => println!("{}", profile::mask_token(token)),
            None => println!("No token stored"),
        },
        TokenCommand::Clear => {
            if settings.remove(TOKEN_KEY).is_some() {
                settings.save()?;
            }
            println!("Token cleared");
        }
    }

    Ok(())
}
