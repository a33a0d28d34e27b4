use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZipError {
    /// Got error while decompressing object
    #[error("got error while decompressing object")]
    DecompressionError,

    /// Got EOF while reading data
    #[error("got EOF while parsing zip")]
    EOF,

    /// Provided file not found in zip
    #[error("file not exist in zip: {0}")]
    FileNotFound(String),

    /// Can't operate without EOCD
    #[error("can't find EOCD in zip")]
    NotFoundEOCD,

    /// Generic parsing error
    #[error("got error while parsing zip archive")]
    ParseError,

    /// Only stored and deflated entries can be read
    #[error("unsupported compression method: {0}")]
    UnsupportedCompression(u16),

    #[error("can't read archive: {0}")]
    Io(#[from] std::io::Error),
}
