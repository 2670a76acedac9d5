/// everything that can go wrong at the table or inside a solver.
///
/// state machine errors leave the game untouched and are always
/// caller-recoverable. InvalidState marks a corrupted input and fails
/// only the offending request. Timeout is special: solver entry points
/// prefer returning their best-so-far answer on expiry, so it surfaces
/// only when the deadline was already spent before any solving could
/// start and there is nothing to return at all.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("illegal action: {0}")]
    IllegalAction(String),
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    #[error("hand has ended")]
    HandEnded,
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("solver deadline expired")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, Error>;
