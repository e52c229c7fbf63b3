// Library crate: exposes the viewer state, settings and key bindings for tests.
// Window, panels and painting stay in the binary crate.

pub mod error;
pub mod i18n;
pub mod keymap;
pub mod state;

pub use error::ViewerError;
