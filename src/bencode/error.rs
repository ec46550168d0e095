use thiserror::Error;

/// Errors reported by the bencode codec.
///
/// Typed-accessor misses (wrong kind, missing key) are not errors here;
/// they come back in-band as `None` so callers can keep their defaults.
///
/// # Examples
///
/// ```
/// use benvar::{decode, BencodeError};
///
/// assert_eq!(decode(b"i04e"), Err(BencodeError::IllegalSequence));
/// assert_eq!(decode(b""), Err(BencodeError::IllegalSequence));
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BencodeError {
    /// The input violates the bencode grammar: a malformed or overflowing
    /// integer, a string length over the 128 MiB limit or past the end of
    /// the buffer, a dict key at a non-string position, an unmatched
    /// container terminator, empty input, or a container left open at
    /// end of buffer.
    #[error("illegal bencode sequence")]
    IllegalSequence,

    /// Caller error at the API boundary, such as serializing an unset
    /// variant.
    #[error("invalid argument")]
    InvalidArgument,
}
