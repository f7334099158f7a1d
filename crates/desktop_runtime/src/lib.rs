//! Browser desktop runtime: window manager, lock gate, persisted buckets and the Leptos shell.

pub mod apps;
pub mod buckets;
pub mod components;
mod effect_executor;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod session;
pub mod shortcuts;
pub mod tasks;
pub mod window_manager;

pub use components::{DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use persistence::{export_buckets, import_buckets, load_bucket, reset_buckets, save_bucket};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
