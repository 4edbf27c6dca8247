/// Represents all possible errors that can occur while reading a card file.
///
/// Every variant is terminal for the file being decoded: the reader never
/// hands back a partially decoded file. Empty index slots and unsupported
/// OLE objects are ordinary results, not errors.
#[derive(Debug)]
pub enum CardError {
    /// The file could not be opened or read, or a read came up short.
    Io(std::io::Error),
    /// The first three bytes are neither `RRG` nor `MGC`.
    UnrecognizedSignature([u8; 3]),
    /// An encoding name that does not map to a supported source encoding.
    UnsupportedEncoding(String),
}

/// Provides a user-friendly string representation for each error variant in `CardError`.
impl std::fmt::Display for CardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardError::Io(err) => write!(f, "I/O error: {err}"),
            CardError::UnrecognizedSignature(signature) => write!(
                f,
                "Not a Windows card file, signature {} ({})",
                String::from_utf8_lossy(signature),
                hex::encode_upper(signature)
            ),
            CardError::UnsupportedEncoding(name) => write!(f, "Unsupported encoding: {name}"),
        }
    }
}

impl std::error::Error for CardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CardError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Allows automatic conversion from `std::io::Error` to `CardError`.
impl From<std::io::Error> for CardError {
    fn from(error: std::io::Error) -> Self {
        CardError::Io(error)
    }
}
