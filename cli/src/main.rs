//! relayout CLI — save and rebuild hy3 tiling layouts.

use std::env;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use relayout_core::command::Command;
use relayout_core::response::Response;
use relayout_core::sys::Sys;
use relayout_core::types::config::Settings;
use relayout_core::wm::hyprctl::Hyprctl;
use tracing::debug;
use tracing_subscriber::EnvFilter;


#[derive(Parser)]
#[command(name = "relayout", version)]
#[command(about = "Save and rebuild hy3 tiling layouts")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Config file (default: $RELAYOUT_CONFIG, then ~/.config/relayout/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Layout document to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    layout: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}


#[derive(Subcommand)]
enum Commands {
    /// Capture every workspace to the layout file
    Save {
        /// Print the captured layout instead of writing it
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
    /// Rebuild a workspace's tiling tree
    Restore {
        /// Workspace to rebuild (default: the focused one)
        #[arg(short, long, value_name = "ID")]
        workspace: Option<i32>,
        /// Force this many windows in the top row
        #[arg(short, long, value_name = "N")]
        top: Option<usize>,
        /// Rebuild every saved workspace and restore each monitor's workspace
        #[arg(short, long)]
        all: bool,
        /// Print the command plan without running it
        #[arg(short = 'n', long)]
        dry_run: bool,
        /// Print the planned window commands as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarise the saved layout
    Show,
    /// Show help for a command or topic
    Help { topic: Option<String> },
}


fn main() {
    let cli = Cli::parse();
    init_logging();

    let settings = match load_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("relayout: {}", e);
            process::exit(1);
        }
    };

    let (cmd, json) = match cli.command {
        Commands::Save { dry_run } => (Command::Save { dry_run }, false),
        Commands::Restore {
            workspace,
            top,
            all,
            dry_run,
            json,
        } => (
            Command::Restore {
                workspace,
                top,
                all,
                dry_run,
            },
            json,
        ),
        Commands::Show => (Command::Show, false),
        Commands::Help { topic } => (Command::Help { topic }, false),
    };

    let mut sys = Sys::new(Hyprctl::default(), settings);
    let response = sys.execute(cmd);

    if json && !matches!(response, Response::Error { .. }) {
        match serde_json::to_string_pretty(sys.pending_actions()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("relayout: {}", e);
                process::exit(1);
            }
        }
        process::exit(response.exit_code());
    }

    match &response {
        Response::Ok { output } | Response::Noop { output } => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Response::Error { message } => eprintln!("relayout error: {}", message),
    }
    process::exit(response.exit_code());
}


fn init_logging() {
    let directives =
        env::var("RUST_LOG").unwrap_or_else(|_| "relayout_cli=info,relayout_core=info".to_owned());
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::builder().parse_lossy(directives))
        .init();
}


fn load_settings(cli: &Cli) -> relayout_core::Result<Settings> {
    let path = cli
        .config
        .clone()
        .or_else(|| env::var_os("RELAYOUT_CONFIG").map(PathBuf::from))
        .unwrap_or_else(Settings::default_path);
    debug!(path = %path.display(), "loading config");
    let mut settings = Settings::load(&path)?;
    if let Some(layout) = &cli.layout {
        settings.layout_path = layout.clone();
    }
    Ok(settings)
}
