use crate::wheel::surface::{FindMode, SurfaceName};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WheelError {
    #[error("wheel is not initialized")]
    NotInitialized,
    #[error("no surface found by {mode} '{name}', the wheel stays disabled")]
    SurfaceNotFound { mode: FindMode, name: SurfaceName },
    #[error("item index {index} is out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("view factory produced no view for item {index}, rebuild stopped")]
    ViewCreation { index: usize },
}
