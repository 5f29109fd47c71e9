//! Interactive conversation loop against the inference service.
//!
//! Usage: `promptline` to chat, `promptline --health` to probe the service.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use promptline::inference::InferenceClient;
use promptline::performance::PerformanceMeter;
use promptline::pipeline::{PipelineOptions, PromptPipeline};
use promptline::storage::settings::load_settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    tracing::info!(
        api_url = %settings.api_url,
        model = %settings.default_model,
        "Settings loaded"
    );

    let client = InferenceClient::new(&settings)?;

    if std::env::args().skip(1).any(|arg| arg == "--health") {
        let health = client.health().await?;
        println!("{:?}: {}", health.status, health.message);
        if !health.is_healthy() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let meter = Arc::new(PerformanceMeter::new(settings.encoding)?);
    let pipeline = PromptPipeline::new(
        Arc::new(client),
        meter,
        PipelineOptions::from_settings(&settings),
    );

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"Prompt: ").await?;
        stdout.flush().await?;

        let Some(prompt) = lines.next_line().await? else {
            break;
        };
        if matches!(prompt.trim().to_lowercase().as_str(), "quit" | "exit") {
            println!("Exiting the conversation.");
            break;
        }

        match pipeline.process(&prompt).await {
            Some(response) => {
                if let Some(sample) = response.performance {
                    println!("{}", sample);
                }
                println!("{}", response.text);
            }
            None => println!("None"),
        }
    }

    Ok(())
}
