//! Application setup and drain loop

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::signal::unix::{SignalKind, signal};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};
use x11rb::connection::Connection;

use crate::config::Settings;
use crate::constants::timing;
use crate::input::{EvdevBackend, InputBackend, devices};
use crate::overlay::{self, DisplayConfig, LabelRenderer, OverlayWindow};
use crate::queue::InputQueue;
use crate::x11::{self, OverlayContext};

pub async fn run(settings: Settings) -> Result<()> {
    // 1. Connect to the X server
    let (conn, screen_num, atoms) = x11::initialize().context("Failed to initialize X11")?;
    let screen = &conn.setup().roots[screen_num];

    // 2. Resolve display style and font
    let display_config = DisplayConfig::from_settings(&settings);
    let renderer = LabelRenderer::resolve(
        &settings.appearance.font_family,
        settings.appearance.font_size,
    )
    .context("Failed to initialize label renderer")?;
    info!(
        font = %settings.appearance.font_family,
        size = settings.appearance.font_size,
        "Label renderer initialized"
    );

    // 3. Spawn input listeners. An input visualizer is inert without input
    // access, so a permission failure is fatal rather than a degraded mode.
    if !EvdevBackend::is_available() {
        devices::print_permission_error();
        anyhow::bail!("Input devices are not accessible");
    }
    let queue = InputQueue::new();
    let _listeners =
        EvdevBackend::spawn(queue.clone()).context("Failed to start input listeners")?;

    // 4. Register signal handlers
    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to register SIGINT handler")?;
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;

    // 5. Run the drain loop
    let ctx = OverlayContext {
        conn: &conn,
        screen,
        atoms: &atoms,
    };

    let mut interval = tokio::time::interval(Duration::from_millis(timing::DRAIN_INTERVAL_MS));
    // A stalled tick must not burst-catch-up past one overlay per period.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut overlays: Vec<OverlayWindow> = Vec::new();

    info!("keyosd running");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                drain_tick(&ctx, &renderer, &display_config, &queue, &mut overlays)?;
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down");
                break;
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down");
                break;
            }
        }
    }

    // Destroy whatever is still visible before exiting.
    overlays.clear();
    conn.flush()
        .context("Failed to flush X11 connection during shutdown")?;

    Ok(())
}

/// One drain period: reap expired overlays, then show at most one queued
/// symbol. Popping one per tick bounds overlay creation at 20/s; input
/// bursts wait in the queue and appear on subsequent ticks, in order.
fn drain_tick<'a>(
    ctx: &OverlayContext<'a>,
    renderer: &LabelRenderer,
    config: &DisplayConfig,
    queue: &InputQueue,
    overlays: &mut Vec<OverlayWindow<'a>>,
) -> Result<()> {
    // Drain pending X11 events. Nothing is acted on, but this surfaces
    // asynchronous errors for windows the server already discarded.
    while let Some(event) = ctx
        .conn
        .poll_for_event()
        .context("Failed to poll for X11 event")?
    {
        debug!(event = ?event, "X11 event");
    }

    let now = Instant::now();
    overlays.retain(|overlay| !overlay.expired(now));

    if let Some(symbol) = queue.pop_oldest() {
        match overlay::show_symbol(ctx, renderer, config, &symbol, now) {
            Ok(window) => overlays.push(window),
            Err(e) => error!(symbol = %symbol, error = %e, "Failed to show overlay"),
        }
    }

    ctx.conn.flush().context("Failed to flush X11 connection")?;

    Ok(())
}
