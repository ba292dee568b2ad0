use crate::squares::Square;
use thiserror::Error;

// ---------------------------------------------
// Error Handling
// ---------------------------------------------
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Invalid position descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Illegal move: {origin} to {destination}")]
    IllegalMove { origin: Square, destination: Square },

    #[error("No pawn is waiting for promotion")]
    NoPendingPromotion,

    #[error("Cannot promote to '{0}'")]
    InvalidPromotion(char),
}

pub type ChessResult<T> = std::result::Result<T, ChessError>;

impl ChessError {
    pub(crate) fn descriptor<S: Into<String>>(msg: S) -> ChessError {
        ChessError::InvalidDescriptor(msg.into())
    }
}
