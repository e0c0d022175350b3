use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sandpiper_hal::{Hardware, Platform};
use sandpiper_robot::{build_root, RobotConfig, TickDriver};

#[derive(Parser)]
#[command(name = "sandpiper", version, about = "Beach-cleaning robot decision core")]
struct Cli {
    /// Debug-level logging; `RUST_LOG` still takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the decision loop until Ctrl-C (or a tick limit).
    Run {
        /// YAML config file; built-in defaults when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop after this many ticks.
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the configured tick cadence, in hertz.
        #[arg(long)]
        hz: Option<u32>,
    },
    /// Detect the platform and bring the hardware up and back down.
    Check,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run { config, ticks, hz } => run(config, ticks, hz).await,
        Command::Check => check(),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<RobotConfig> {
    match path {
        Some(path) => RobotConfig::load(&path),
        None => Ok(RobotConfig::default()),
    }
}

fn bring_up_hardware() -> anyhow::Result<Hardware> {
    let platform = Platform::detect();
    info!(?platform, "platform detected");
    let hardware = Hardware::for_platform(platform).context("building hardware")?;
    hardware.setup().context("hardware setup")?;
    Ok(hardware)
}

fn check() -> anyhow::Result<()> {
    let hardware = bring_up_hardware()?;
    hardware.disable();
    info!("hardware check passed");
    Ok(())
}

async fn run(config: Option<PathBuf>, ticks: Option<u64>, hz: Option<u32>) -> anyhow::Result<()> {
    let mut cfg = load_config(config)?;
    if let Some(hz) = hz {
        cfg.tick_hz = hz;
    }

    let hardware = bring_up_hardware()?;
    let mut driver = TickDriver::new(build_root(&hardware, &cfg), cfg.tick_hz);

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!(%err, "failed to listen for ctrl-c");
                return;
            }
            info!("shutdown requested");
            shutdown.store(true, Ordering::Relaxed);
        });
    }

    // The tick loop blocks through each period; keep it off the runtime
    // threads. Motors are disabled on the way out no matter how the loop
    // ended.
    tokio::task::spawn_blocking(move || {
        driver.run(&shutdown, ticks);
        hardware.disable();
    })
    .await
    .context("tick loop task")?;

    Ok(())
}
