//! promptline binary: one capture -> request -> report cycle

use clap::Parser;
use promptline::api::OpenAIClient;
use promptline::cli::Cli;
use promptline::config::{self, Config};
use promptline::input::{self, Capture, KeyBindings};
use promptline::ui;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment, so the credential
    // and overrides in it are visible to config loading
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();

    if let Err(e) = run().await {
        ui::display_error(&e.to_string());
        if e.is_fatal() {
            std::process::exit(1);
        }
        // Request-phase failures have been reported; exit 0
    }
}

async fn run() -> promptline::Result<()> {
    let config = Config::load().await?;
    let system_prompt = config::load_system_prompt().await?;

    let bindings = KeyBindings::default();
    if input::is_interactive() {
        ui::show_banner(&bindings);
    }

    let user_prompt = match input::capture(bindings)? {
        Capture::Submitted(text) => text,
        Capture::Aborted => {
            ui::display_aborted();
            return Ok(());
        }
    };

    if user_prompt.trim().is_empty() {
        println!("Empty prompt. Exiting.");
        return Ok(());
    }

    let client = OpenAIClient::new(config)?;

    let spinner = ui::create_spinner("Thinking...");
    let result = client.complete(&system_prompt, &user_prompt).await;
    spinner.finish_and_clear();

    ui::display_completion(&result?);

    Ok(())
}
