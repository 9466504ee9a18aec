use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    /// A row whose structure contradicts the archive schema. Fatal to the
    /// whole normalization pass: the archive is assumed authoritative, so a
    /// structurally broken row means the export itself needs fixing.
    #[error("Malformed row at index {index}: {reason}")]
    MalformedRow { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, LibraryError>;
