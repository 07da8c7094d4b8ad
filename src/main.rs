//! Optimization GUI - Desktop front-end for the cut optimizer
//!
//! This is the main entry point. It handles:
//! 1. CLI argument parsing (--config, --script, etc.)
//! 2. Loading the launcher configuration
//! 3. Launching the GTK4/Libadwaita window

use anyhow::Result;
use clap::Parser;
use optimize_gui::config::AppConfig;
use optimize_gui::ui;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Optimization.. for the rest of us
#[derive(Parser, Debug)]
#[command(name = "optimize-gui")]
#[command(about = "Pick a supercuts file and run the cut optimizer")]
#[command(version)]
struct Args {
    /// Path to config.toml (default: <config dir>/optimize-gui/config.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Interpreter used to run the optimizer script
    #[arg(long, value_name = "PROGRAM")]
    interpreter: Option<String>,

    /// Optimizer script, relative to the working directory
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Append the Step 1 file to the optimizer command line
    #[arg(long)]
    pass_selected_file: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Layer CLI overrides on top of the loaded config
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(ref interpreter) = self.interpreter {
            config.launcher.interpreter = interpreter.clone();
        }

        if let Some(ref script) = self.script {
            config.launcher.script = script.clone();
        }

        if self.pass_selected_file {
            config.launcher.pass_selected_file = true;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let _ = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();

    info!("Optimization GUI v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if config.launcher.pass_selected_file {
        info!("Selected file will be appended to the optimizer command");
    }

    run_gui(config)
}

fn run_gui(config: AppConfig) -> Result<()> {
    if std::env::var("DISPLAY").is_err() && std::env::var("WAYLAND_DISPLAY").is_err() {
        eprintln!("Error: No display server detected (X11 or Wayland).");
        eprintln!();
        eprintln!("If you're running via SSH, enable X11 forwarding with:");
        eprintln!("  ssh -X user@host");
        std::process::exit(1);
    }

    if let Err(e) = gtk::init() {
        eprintln!("Failed to initialize GTK4: {}", e);
        eprintln!("Please ensure GTK4 is installed on your system.");
        std::process::exit(1);
    }

    if let Err(e) = adw::init() {
        eprintln!("Failed to initialize Libadwaita: {}", e);
        eprintln!("Please ensure Libadwaita is installed on your system.");
        std::process::exit(1);
    }

    let app = ui::app::OptimizationApplication::new(config);
    let exit_code = app.run();

    std::process::exit(exit_code.into());
}
