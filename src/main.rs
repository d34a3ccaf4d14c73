use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

mod domain;
mod application;
mod infrastructure;

use infrastructure::config::Config;
use infrastructure::adapters::console::{ConsoleSurface, DialogChrome};
use application::errors::DialogError;
use application::services::{CommandService, ConversationController, DialogEvent, PageShell, RandomReply};
use domain::entities::CommandOutcome;
use domain::traits::Surface;

#[derive(Parser)]
#[command(name = "ask-ai")]
#[command(about = "Mock Ask AI chat dialog for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Page title (overrides config)
    #[arg(short, long)]
    title: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the dialog
    Run,
    /// Show version
    Version,
    /// Print the default config
    InitConfig,
}

fn main() {
    // Initialize logging, kept off stdout so it does not tear the dialog
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            if let Err(e) = run_dialog(cli.config, cli.title) {
                tracing::error!("Dialog failed: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("ask-ai v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn load_config(config_path: &str, title_override: Option<String>) -> Config {
    let mut config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path)
            .map(Config::with_env)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            })
    } else {
        Config::load_env()
    };

    if let Some(title) = title_override {
        config.page.title = title;
    }
    config
}

fn run_dialog(config_path: String, title_override: Option<String>) -> Result<(), DialogError> {
    let config = load_config(&config_path, title_override);
    config.validate()?;
    tracing::info!("Opening dialog: {}", config.page.title);

    let shell = PageShell::new(Some(config.page.title.clone()));
    let surface = ConsoleSurface::new(shell, DialogChrome::from(&config));

    let mut commands = CommandService::new(&config.dialog.command_prefix);
    commands.register_defaults();

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(async {
        let (tx, events) = mpsc::unbounded_channel();
        let controller = ConversationController::with_events(
            Arc::new(RandomReply::new(config.reply.length)),
            config.reply.delay(),
            tx,
        );

        let result = run_console_dialog(&surface, &controller, &commands, events).await;
        controller.dispose();
        result
    });

    // a pending stdin read must not hold the process open
    rt.shutdown_background();
    result
}

async fn run_console_dialog<S: Surface>(
    surface: &S,
    controller: &ConversationController,
    commands: &CommandService,
    mut events: mpsc::UnboundedReceiver<DialogEvent>,
) -> Result<(), DialogError> {
    surface.start().await?;
    surface.render(&controller.view()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    DialogEvent::MessageAppended(id) => tracing::debug!("Message appended: {}", id),
                    DialogEvent::ScrollTo(_) | DialogEvent::OpenChanged(_) => {
                        surface.render(&controller.view()).await?;
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("Input closed");
                    break;
                };

                if let Some((name, args)) = commands.parse(&line) {
                    match commands.handle(controller, &name, &args) {
                        Ok(CommandOutcome::Quit) => break,
                        Ok(CommandOutcome::Notice(text)) => surface.notice(&text).await?,
                        Ok(CommandOutcome::Done) => {}
                        Err(e) => surface.notice(&format!("Error: {}", e)).await?,
                    }
                } else if controller.is_open() {
                    controller.set_input(line);
                    controller.submit_input();
                } else {
                    surface.notice(&format!("Dialog is closed, type {}open first", commands.prefix())).await?;
                }
            }
        }
    }

    Ok(())
}

fn init_config() {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("Failed to render default config: {}", e),
    }
}
