use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid seed character {0:?} (allowed: 1-9 and A-Z without O)")]
    InvalidSeedChar(char),

    #[error("invalid seed length {0} (must be 1..=8)")]
    InvalidSeedLength(usize),

    #[error("seed id {0} is outside the seed space")]
    SeedIdOutOfRange(u64),

    #[error("unknown item '{0}'")]
    UnknownItem(String),
}

pub type Result<T> = std::result::Result<T, Error>;
