//! Overlay window realization and cleanup
//!
//! One `OverlayWindow` per displayed symbol. The rendered label is uploaded
//! to a server-side pixmap used as the window background, so the server
//! repaints on expose and the client never handles window events.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    AtomEnum, ConnectionExt, CreateGCAux, CreateWindowAux, ImageFormat, Pixmap, PropMode, Window,
    WindowClass,
};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as WrapperExt;

use crate::constants::x11;
use crate::geometry::Position;
use crate::overlay::font::Label;
use crate::x11::OverlayContext;

/// A mapped overlay window with its destruction deadline
pub struct OverlayWindow<'a> {
    conn: &'a RustConnection,
    window: Window,
    pixmap: Pixmap,
    deadline: Instant,
}

/// X11 window coordinates are 16-bit; anchor math is not
fn clamp_coord(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

impl<'a> OverlayWindow<'a> {
    /// Upload the label, create an override-redirect window with it as
    /// background, stamp the standard properties, and map it.
    pub fn create(
        ctx: &OverlayContext<'a>,
        label: &Label,
        position: Position,
        deadline: Instant,
    ) -> Result<Self> {
        let conn = ctx.conn;
        let width = label.dimensions.width;
        let height = label.dimensions.height;

        let pixmap = conn
            .generate_id()
            .context("Failed to generate X11 pixmap ID")?;
        conn.create_pixmap(ctx.screen.root_depth, pixmap, ctx.screen.root, width, height)
            .context("Failed to create label pixmap")?;

        // Release server resources if anything below errors out, so a failed
        // overlay does not leak the pixmap or a half-initialized window.
        struct CreationGuard<'c> {
            conn: &'c RustConnection,
            pixmap: Pixmap,
            window: Option<Window>,
            should_cleanup: bool,
        }

        impl Drop for CreationGuard<'_> {
            fn drop(&mut self) {
                if self.should_cleanup {
                    if let Some(window) = self.window
                        && let Err(e) = self.conn.destroy_window(window)
                    {
                        debug!(window = window, error = %e, "Failed to destroy window after creation failure");
                    }
                    if let Err(e) = self.conn.free_pixmap(self.pixmap) {
                        debug!(pixmap = self.pixmap, error = %e, "Failed to free pixmap after creation failure");
                    }
                    let _ = self.conn.flush();
                }
            }
        }

        let mut creation_guard = CreationGuard {
            conn,
            pixmap,
            window: None,
            should_cleanup: true,
        };

        let gc = conn.generate_id().context("Failed to generate X11 GC ID")?;
        conn.create_gc(gc, pixmap, &CreateGCAux::new())
            .context("Failed to create graphics context")?;
        conn.put_image(
            ImageFormat::Z_PIXMAP,
            pixmap,
            gc,
            width,
            height,
            0,
            0,
            0,
            ctx.screen.root_depth,
            &label.data,
        )
        .context("Failed to upload label pixels")?;
        conn.free_gc(gc).context("Failed to free graphics context")?;

        let window = conn
            .generate_id()
            .context("Failed to generate X11 window ID")?;
        conn.create_window(
            ctx.screen.root_depth,
            window,
            ctx.screen.root,
            clamp_coord(position.x),
            clamp_coord(position.y),
            width,
            height,
            0,
            WindowClass::INPUT_OUTPUT,
            ctx.screen.root_visual,
            &CreateWindowAux::new()
                .override_redirect(x11::OVERRIDE_REDIRECT)
                .background_pixmap(pixmap),
        )
        .context("Failed to create overlay window")?;
        creation_guard.window = Some(window);

        let pid = std::process::id();
        conn.change_property32(
            PropMode::REPLACE,
            window,
            ctx.atoms.net_wm_pid,
            AtomEnum::CARDINAL,
            &[pid],
        )
        .context("Failed to set _NET_WM_PID on overlay window")?;

        conn.change_property8(
            PropMode::REPLACE,
            window,
            ctx.atoms.wm_class,
            AtomEnum::STRING,
            b"keyosd\0keyosd\0",
        )
        .context("Failed to set WM_CLASS on overlay window")?;

        conn.change_property32(
            PropMode::REPLACE,
            window,
            ctx.atoms.net_wm_state,
            AtomEnum::ATOM,
            &[ctx.atoms.net_wm_state_above],
        )
        .context("Failed to set overlay window always-on-top")?;

        conn.map_window(window)
            .context("Failed to map overlay window")?;

        debug!(
            window = window,
            x = position.x,
            y = position.y,
            width = width,
            height = height,
            "Mapped overlay window"
        );

        creation_guard.should_cleanup = false;

        Ok(Self {
            conn,
            window,
            pixmap,
            deadline,
        })
    }

    /// Whether the display duration has elapsed
    pub fn expired(&self, now: Instant) -> bool {
        deadline_passed(self.deadline, now)
    }
}

/// An overlay lives until the drain tick at or after its deadline. A zero
/// duration makes the deadline the creation instant itself, so the window
/// goes away on the next tick.
fn deadline_passed(deadline: Instant, now: Instant) -> bool {
    now >= deadline
}

impl Drop for OverlayWindow<'_> {
    fn drop(&mut self) {
        // The server may have discarded the window already; cleanup failures
        // only get a debug log.
        if let Err(e) = self.conn.destroy_window(self.window) {
            debug!(window = self.window, error = %e, "Failed to destroy overlay window");
        }
        if let Err(e) = self.conn.free_pixmap(self.pixmap) {
            debug!(pixmap = self.pixmap, error = %e, "Failed to free label pixmap");
        }
    }
}
