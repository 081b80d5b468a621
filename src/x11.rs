//! X11 connection and cached state

use anyhow::{Context, Result};
use tracing::info;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Atom, ConnectionExt, Screen};
use x11rb::rust_connection::RustConnection;

/// Shared per-call context for overlay window operations
pub struct OverlayContext<'a> {
    pub conn: &'a RustConnection,
    pub screen: &'a Screen,
    pub atoms: &'a CachedAtoms,
}

/// Pre-cached X11 atoms to avoid repeated roundtrips
pub struct CachedAtoms {
    pub net_wm_pid: Atom,
    pub net_wm_state: Atom,
    pub net_wm_state_above: Atom,
    pub wm_class: Atom,
}

impl CachedAtoms {
    pub fn new(conn: &RustConnection) -> Result<Self> {
        Ok(Self {
            net_wm_pid: conn
                .intern_atom(false, b"_NET_WM_PID")
                .context("Failed to intern _NET_WM_PID atom")?
                .reply()
                .context("Failed to get reply for _NET_WM_PID atom")?
                .atom,
            net_wm_state: conn
                .intern_atom(false, b"_NET_WM_STATE")
                .context("Failed to intern _NET_WM_STATE atom")?
                .reply()
                .context("Failed to get reply for _NET_WM_STATE atom")?
                .atom,
            net_wm_state_above: conn
                .intern_atom(false, b"_NET_WM_STATE_ABOVE")
                .context("Failed to intern _NET_WM_STATE_ABOVE atom")?
                .reply()
                .context("Failed to get reply for _NET_WM_STATE_ABOVE atom")?
                .atom,
            wm_class: conn
                .intern_atom(false, b"WM_CLASS")
                .context("Failed to intern WM_CLASS atom")?
                .reply()
                .context("Failed to get reply for WM_CLASS atom")?
                .atom,
        })
    }
}

/// Connect to the X server and cache the atoms the overlay code needs
pub fn initialize() -> Result<(RustConnection, usize, CachedAtoms)> {
    let (conn, screen_num) = x11rb::connect(None)
        .context("Failed to connect to X11 server. Is DISPLAY set correctly?")?;

    let screen = &conn.setup().roots[screen_num];
    info!(
        screen = screen_num,
        width = screen.width_in_pixels,
        height = screen.height_in_pixels,
        "Connected to X11 server"
    );

    let atoms = CachedAtoms::new(&conn).context("Failed to cache X11 atoms at startup")?;

    Ok((conn, screen_num, atoms))
}
