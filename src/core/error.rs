use thiserror::Error;

/// Errors raised while parsing a card from its two-character notation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing card")]
    TooFewChars,
}
