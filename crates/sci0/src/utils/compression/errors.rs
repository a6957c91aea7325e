#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unexpected end of compressed input")]
pub struct UnexpectedEndOfInput;
