//! Point-and-click outline drawing for an SVG surface.
//!
//! This crate is compiled to WebAssembly and runs in the browser. The user
//! clicks (or taps) to drop circle markers; successive markers are joined by a
//! polyline outline, and a dashed preview segment follows the pointer from the
//! most recent marker, optionally snapped to fixed angle increments.
//!
//! All interaction logic lives in [`engine::EngineCore`], which never touches
//! the DOM and is tested natively. [`engine::Engine`] binds it to an
//! `<svg>` element: it owns the event listeners and forwards the resulting
//! [`engine::Action`]s to [`render`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser-bound engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Markers, the outline, and the reference point store |
//! | [`surface`] | Points and device-to-surface coordinate mapping |
//! | [`snap`] | Angle snapping against the reference point |
//! | [`input`] | Pointer samples and the live preview state machine |
//! | [`config`] | Board configuration and view-box parsing |
//! | [`error`] | Error types |
//! | [`render`] | SVG DOM updates |
//! | [`listeners`] | Owned DOM event subscriptions |
//! | [`consts`] | Shared defaults (marker radius, snap step, colors) |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod input;
pub mod listeners;
pub mod render;
pub mod scene;
pub mod snap;
pub mod surface;

/// Route `log` output to the browser console and install the panic hook.
///
/// Safe to call more than once; repeated logger registration is reported and
/// otherwise ignored.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {err}");
    }
}
