//! Ripplekit CLI
//!
//! Drive a ripple decorator from the terminal, either headless on a manual
//! clock or in real time on a tokio runtime.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use ripplekit_core::TouchSignal;
use ripplekit_decorator::{load_config, to_toml, DecoratorConfig, RippleDecorator};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod play;
mod report;
mod simulate;

#[derive(Parser)]
#[command(name = "ripplekit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ripple decorator animation engine", long_about = None)]
struct Cli {
    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run headless on a manual clock and print every evaluated frame
    Simulate(RunArgs),

    /// Play in real time and log a summary of every frame
    Play(RunArgs),

    /// Print the default configuration as TOML
    Defaults,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Touch signal to deliver
    #[arg(short, long, value_enum, default_value = "tap")]
    pub signal: SignalArg,

    /// Start programmatically, bypassing trigger bindings
    #[arg(long)]
    pub programmatic: bool,

    /// Touch position
    #[arg(short, long, default_value_t = 0.0)]
    pub x: f32,

    #[arg(short, long, default_value_t = 0.0)]
    pub y: f32,

    /// Surface size
    #[arg(long, default_value_t = 320.0)]
    pub width: f32,

    #[arg(long, default_value_t = 120.0)]
    pub height: f32,

    /// Print frames as JSON lines
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SignalArg {
    Down,
    Up,
    Tap,
}

impl From<SignalArg> for TouchSignal {
    fn from(signal: SignalArg) -> Self {
        match signal {
            SignalArg::Down => TouchSignal::PressDown,
            SignalArg::Up => TouchSignal::PressUp,
            SignalArg::Tap => TouchSignal::Tap,
        }
    }
}

impl RunArgs {
    pub fn load_config(&self) -> Result<DecoratorConfig> {
        match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load {}", path.display())),
            None => Ok(DecoratorConfig::default()),
        }
    }

    /// Deliver the requested start to a decorator
    pub fn trigger(&self, decorator: &mut RippleDecorator) {
        if self.programmatic {
            decorator.do_animation(self.x, self.y);
            return;
        }
        let decision = decorator.on_touch_signal(self.signal.into(), self.x, self.y);
        if decision.is_empty() {
            tracing::warn!(
                "{:?} matches neither the ripple nor the zoom trigger",
                self.signal
            );
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so frame output stays clean
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate(args) => simulate::run(&args),
        Commands::Play(args) => play::run(&args),
        Commands::Defaults => cmd_defaults(),
    }
}

fn cmd_defaults() -> Result<()> {
    let text = to_toml(&DecoratorConfig::default()).context("Failed to render defaults")?;
    print!("{text}");
    Ok(())
}
