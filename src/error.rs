use thiserror::Error;

#[derive(Error, Debug)]
pub enum IpeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to allocate string table of {requested} bytes")]
    Alloc { requested: usize },

    #[error("String contains a NUL byte at position {position}")]
    InteriorNul { position: usize },

    #[error("Invalid entry range: start {start} is past end {end}")]
    InvalidRange { start: u32, end: u32 },

    #[error("String table would exceed the addressable offset range ({used} bytes used)")]
    OffsetOverflow { used: usize },

    #[error("String offset {offset} is outside the string table")]
    OffsetOutOfBounds { offset: u32 },

    #[error("String at offset {offset} is not NUL-terminated")]
    Unterminated { offset: u32 },

    #[error("Invalid output format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, IpeError>;
