//! Carousel CLI and HTTP server entry point.
//!
//! Binary name: `crsl`
//!
//! Parses CLI arguments, loads configuration and persisted history,
//! then dispatches to a command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use carousel_types::llm::MessageRole;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "crsl", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli.config).await?;

    match cli.command {
        Commands::Serve { host, port } => {
            serve(state, host, port).await?;
        }

        Commands::History => {
            let transcript = state.engine.transcript().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&transcript)?);
            } else if transcript.is_empty() {
                println!("No conversation history.");
            } else {
                for message in transcript.messages() {
                    let role = match message.role {
                        MessageRole::User => console::style("you").cyan(),
                        MessageRole::Assistant => console::style("assistant").green(),
                        MessageRole::System => console::style("system").dim(),
                    };
                    println!("{role}: {}", message.content);
                }
            }
        }

        Commands::Clear => {
            state.engine.clear().await?;
            if cli.json {
                println!("{}", serde_json::json!({ "status": "Chat cleared" }));
            } else {
                println!("  {} Chat cleared", console::style("✓").green());
            }
        }

        Commands::Models => {
            let models = state.engine.models();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&models)?);
            } else {
                let mut table = comfy_table::Table::new();
                table.set_header(vec!["#", "Model"]);
                for (i, model) in models.iter().enumerate() {
                    table.add_row(vec![(i + 1).to_string(), model.clone()]);
                }
                println!("{table}");
            }
        }

        Commands::Personas => {
            let personas = state.engine.personas();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(personas.list())?);
            } else {
                let mut table = comfy_table::Table::new();
                table.set_header(vec!["Key", "Name", "Prompt"]);
                for persona in personas.list() {
                    let key = if persona.key == personas.default_key() {
                        format!("{} (default)", persona.key)
                    } else {
                        persona.key.clone()
                    };
                    table.add_row(vec![key, persona.name.clone(), persona.prompt.clone()]);
                }
                println!("{table}");
            }
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Bind the listener and run the HTTP server until shutdown.
async fn serve(state: AppState, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| state.config.server.host.clone());
    let port = port.unwrap_or(state.config.server.port);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Carousel listening on {}",
        console::style("🎠").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
