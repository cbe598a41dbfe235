use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TleError {
    #[error("unparseable element set")]
    Unparseable,
    #[error("line {line} must be exactly 69 characters, got {len}")]
    LineLength { line: u8, len: usize },
    #[error("line {line} must start with \"{line} \"")]
    LinePrefix { line: u8 },
    #[error("line {line} contains non-ASCII characters")]
    NonAscii { line: u8 },
    #[error("invalid mean motion field: {0:?}")]
    MeanMotion(String),
    #[error("mean motion {0} does not fit an 11-column field")]
    FieldOverflow(f64),
}
