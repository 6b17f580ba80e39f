use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least {min}x{min}")]
    BoardTooSmall { min: u8 },
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: u16, cells: u16 },
    #[error("At least one mine is required")]
    NoMines,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
