use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use promptgen::cli::{Cli, Commands};
use promptgen::{ChatClient, FilePromptUseCase, InlinePromptUseCase, MockChatClient, OpenAiChatClient};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    // stdout carries the generated text, so logs go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let model = OpenAiChatClient::configured_model(cli.model.clone());

    let client: Arc<dyn ChatClient> = if cli.mock_client {
        info!("Using mock chat client");
        Arc::new(MockChatClient::new())
    } else {
        let client = OpenAiChatClient::from_env();
        info!(
            "Using OpenAI chat client at {} (api key set: {})",
            client.url(),
            client.has_api_key()
        );
        Arc::new(client)
    };

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Inline => {
            let use_case = InlinePromptUseCase::new(client, model);
            use_case.execute(&mut stdout).await?;
        }

        Commands::File { prompt, output } => {
            let use_case = FilePromptUseCase::new(client, model)
                .with_prompt_path(prompt)
                .with_output_path(output);
            use_case.execute(&mut stdout).await?;
        }
    }

    Ok(())
}
