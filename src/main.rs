#![deny(unsafe_code)]

mod app;
mod color;
mod config;
mod constants;
mod geometry;
mod input;
mod normalize;
mod overlay;
mod queue;
mod x11;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keyosd")]
#[command(version)]
#[command(about = "On-screen keyboard and mouse input display for X11", long_about = None)]
struct Cli {
    /// Path to the configuration file (default: XDG config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// List available input devices and exit
    #[arg(long)]
    list_devices: bool,
}

fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    if cli.list_devices {
        let devices = input::devices::list_input_devices()?;
        if devices.is_empty() {
            println!(
                "No input devices found under {}",
                constants::paths::DEV_INPUT_BY_ID
            );
        }
        for (id, friendly_name) in devices {
            println!("{id}  ({friendly_name})");
        }
        return Ok(());
    }

    let config_path = cli.config.unwrap_or_else(config::Settings::default_path);
    let settings = config::Settings::load(&config_path);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime");

    rt.block_on(app::run(settings))
}
