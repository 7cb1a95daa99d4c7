use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use thermoview::{
    config, utils::terminal, PollingDisplay, TemperatureFormatter, TemperatureReader,
    TerminalSurface,
};

/// How often visibility is re-checked while nothing is scheduled
const IDLE_PROBE_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "thermoview")]
#[command(about = "Live CPU and battery temperature readout", long_about = None)]
struct Cli {
    /// Config file to use instead of the default lookup
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the default config to the user config dir and exit
    #[arg(long)]
    init_config: bool,

    /// Print a single reading and exit
    #[arg(long, conflicts_with = "cycles")]
    once: bool,

    /// Stop after this many refresh cycles
    #[arg(short = 'n', long, value_name = "N")]
    cycles: Option<u64>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Keep polling while the job is in the background
    #[arg(long)]
    ignore_visibility: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.init_config {
        match config::ensure_user_config_exists()? {
            Some(path) => println!("Created config at {}", path.display()),
            None => println!("Config already exists"),
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("Failed to load config")?;

    let reader = TemperatureReader::from_config(&config.sources);
    let mut surface = TerminalSurface::new(io::stdout());
    if !cli.no_color && terminal::stdout_is_tty() {
        surface = surface.with_colors(&config.display);
    }
    let formatter = TemperatureFormatter::from_config(&config.display);
    let delay = config.poll.refresh_delay();
    info!("refreshing every {:?}", delay);

    let mut display = PollingDisplay::new(reader, surface, formatter, delay);
    let limit = if cli.once { Some(1) } else { cli.cycles };

    loop {
        let visible = cli.ignore_visibility || cli.once || terminal::is_foreground();
        let now = Instant::now();
        if visible != display.is_active() {
            info!("surface {}", if visible { "visible" } else { "hidden" });
        }
        display.set_visible(visible, now)?;
        display.tick(now)?;

        if limit.is_some_and(|max| display.cycles() >= max) {
            break;
        }

        let wake = display.next_due().unwrap_or_else(|| now + IDLE_PROBE_INTERVAL);
        thread::sleep(wake.saturating_duration_since(Instant::now()));
    }

    Ok(())
}
