//! Testable CLI - Main entry point

mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use testable_core::PluginRegistry;
use testable_foundation::TestableConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Testable - discover, inspect and invoke registered plugins
#[derive(Parser, Debug)]
#[command(name = "testable")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all registered plugins
    List,
    /// Find plugins by display name
    Find {
        /// Exact display name
        name: String,
    },
    /// Show one plugin's operations and fields
    Show {
        /// Plugin identity (UUID) or storage key
        plugin: String,
    },
    /// Invoke an operation
    Invoke {
        /// Plugin identity (UUID) or storage key
        plugin: String,
        /// Operation name
        operation: String,
        /// Positional arguments, each parsed as JSON (plain text becomes a string)
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
    },
    /// Read a field's current value
    Field {
        /// Plugin identity (UUID) or storage key
        plugin: String,
        /// Field name
        field: String,
    },
    /// Run discovery again and print what was registered, skipped or rejected
    Discover,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let config = TestableConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}", e);
        TestableConfig::default()
    });

    // Initialize logging (stdout은 결과 출력용)
    let log_level = if args.debug {
        "debug".to_string()
    } else {
        config.log_level.clone().unwrap_or_else(|| "warn".to_string())
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
    install_panic_hook(args.debug);

    let registry = PluginRegistry::discovered(config);
    let output = commands::Output::new(args.json);

    match args.command {
        Command::List => commands::list(&registry, output),
        Command::Find { name } => commands::find(&registry, &name, output),
        Command::Show { plugin } => commands::show(&registry, &plugin, output),
        Command::Invoke {
            plugin,
            operation,
            args,
        } => commands::invoke(registry, plugin, operation, args, output).await,
        Command::Field { plugin, field } => commands::field(&registry, &plugin, &field, output),
        Command::Discover => commands::discover(&registry, output),
    }
}

/// panic 메시지를 stderr 대신 debug 로그로 보냄 (`--debug`이면 기본 hook 유지)
fn install_panic_hook(debug: bool) {
    if debug {
        return;
    }
    std::panic::set_hook(Box::new(|info| {
        let message = panic_text(info.payload());
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::debug!(%location, "Panic: {}", message);
    }));
}

fn panic_text(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic".to_string())
}
