//! UI layer for the case explorer: app shell and the table geometry bridge.

pub mod app;
pub mod table;

pub use app::{ExplorerApp, PersistedExplorerSettings, SETTINGS_STORAGE_KEY};
