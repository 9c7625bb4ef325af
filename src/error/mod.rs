use crate::config::ConfigError;
use crate::gif::GifError;
use crate::state::StateError;
use crate::sticker::ModelError;
use crate::upload::UploadError;
use thiserror::Error;

pub type EditorResult<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Gif(#[from] GifError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
