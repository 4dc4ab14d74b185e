//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, the user's
//! filter and search state, the open detail and the playback controller.

mod model;

pub use model::*;
