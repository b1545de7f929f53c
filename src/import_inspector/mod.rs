pub mod config;
pub mod correction;
pub mod editor;
pub mod error;
pub mod field;
pub mod material;
pub mod panel;
pub mod present;
pub mod preview;
pub mod reconcile;
pub mod scope;
pub mod session;
pub mod settings;
pub mod state;
pub mod store;
pub mod ui;

pub const INSPECTOR_CONFIG_PATH: &str = "config/import_inspector.ron";
pub const DEFAULT_SELECTION_PATH: &str = "config/import_selection.ron";
pub const BONE_MARKER_SIZE: f32 = 0.025;
