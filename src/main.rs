use std::path::PathBuf;

use clap::Parser;
use portfolio_chat::config::{ConfigError, WidgetConfig};
use portfolio_chat::console::{self, Command};
use portfolio_chat::delay::TokioDelay;
use portfolio_chat::transcript::TranscriptError;
use portfolio_chat::widget::{ChatWidget, WidgetEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "portfolio-chat", about = "Scripted portfolio chat widget in the terminal")]
struct Cli {
    /// Seed for the greeting draw; random when absent.
    #[arg(long, env = "CHAT_SEED")]
    seed: Option<u64>,

    /// Write the conversation log as JSON lines on exit.
    #[arg(long, env = "CHAT_TRANSCRIPT")]
    transcript: Option<PathBuf>,

    /// Open the widget immediately.
    #[arg(long)]
    open: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = WidgetConfig::from_env()?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let widget = ChatWidget::new(config, TokioDelay, rng);
    info!(
        session = %widget.id(),
        greeting_delay = ?config.greeting_delay,
        reply_delay = ?config.reply_delay,
        "chat widget ready"
    );

    let renderer = tokio::spawn(render_events(widget.subscribe()));
    println!("{}", console::HELP);
    if cli.open {
        widget.open();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match console::parse_command(&line) {
            Command::Open => {
                widget.open();
            }
            Command::Close => widget.close(),
            Command::Toggle => {
                widget.toggle();
            }
            Command::Quick(index) => {
                if widget.quick_reply(index).is_none() {
                    println!("quick replies are only offered under the greeting");
                }
            }
            Command::Log => {
                for entry in widget.snapshot().log() {
                    println!("{}", console::format_entry(entry));
                }
            }
            Command::Help => println!("{}", console::HELP),
            Command::Quit => break,
            Command::Say(text) => {
                widget.submit(&text);
            }
            Command::Unknown(raw) => println!("unknown command: {raw}"),
        }
    }

    console::shut_down(&widget, cli.transcript.as_deref()).await?;

    // The renderer ends once the last sender is gone. A greeting timer that was
    // flushed early still holds a clone until it fires.
    drop(widget);
    if let Err(err) = renderer.await {
        warn!(error = %err, "renderer task failed");
    }
    Ok(())
}

async fn render_events(mut rx: Receiver<WidgetEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                for line in console::render_event(&event) {
                    println!("{line}");
                }
            }
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "renderer fell behind widget events"),
            Err(RecvError::Closed) => break,
        }
    }
}
