pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod gif;
pub mod history;
pub mod input;
pub mod logging;
pub mod render;
pub mod state;
pub mod sticker;
pub mod transform;
pub mod upload;

pub use editor::StickerEditor;
pub use error::{EditorError, EditorResult};

/// Entrypoint used by host integrations: sets up logging, reads the user
/// config and returns an empty editor.
pub fn launch() -> StickerEditor {
    logging::init();
    let config = config::load_editor_config();
    tracing::info!(
        scale_min = config.scale_min,
        scale_max = config.scale_max,
        "starting sticker editor"
    );
    StickerEditor::new(config)
}
