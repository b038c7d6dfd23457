use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("cannot write {format} data: {details}")]
    Write { format: Format, details: String },

    #[error("underlying bio-forge I/O error: {0}")]
    BioForgeIo(String),

    #[error("bio-forge topology building failed: {0}")]
    BioForgeTopology(String),

    #[error("failed to convert data model: {0}")]
    Conversion(#[from] super::util::ConversionError),
}

impl From<bio_forge::io::Error> for Error {
    fn from(e: bio_forge::io::Error) -> Self {
        Error::BioForgeIo(e.to_string())
    }
}

impl From<bio_forge::ops::Error> for Error {
    fn from(e: bio_forge::ops::Error) -> Self {
        Error::BioForgeTopology(e.to_string())
    }
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn write(format: Format, details: impl Into<String>) -> Self {
        Self::Write {
            format,
            details: details.into(),
        }
    }
}
