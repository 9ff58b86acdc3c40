use thiserror::Error;

pub type ScrollbarResult<T> = Result<T, ScrollbarError>;

#[derive(Debug, Error)]
pub enum ScrollbarError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid thumb frame: {0}")]
    InvalidFrame(String),

    #[error("pointer {pointer_id} is not captured by the stage")]
    PointerCaptureLost { pointer_id: i32 },
}
