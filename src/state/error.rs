use super::event::GestureEvent;
use super::model::GestureMode;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("invalid gesture transition: from {from:?} using event {event:?}")]
    InvalidTransition {
        from: GestureMode,
        event: GestureEvent,
    },
}
