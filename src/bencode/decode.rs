use bytes::Bytes;
use tracing::trace;

use crate::quark::Quark;
use crate::variant::{Dict, VarStr, Variant};

use super::error::BencodeError;
use super::scan::{scan_int, scan_str};

/// A container under construction. Its children accumulate here and the
/// container only becomes a [`Variant`] once its `e` terminator arrives.
enum Open {
    List(Vec<Variant>),
    Dict {
        dict: Dict,
        pending_key: Option<Quark>,
    },
}

impl Open {
    fn close(self) -> Result<Variant, BencodeError> {
        match self {
            Open::List(items) => Ok(Variant::List(items)),
            Open::Dict {
                dict,
                pending_key: None,
            } => Ok(Variant::Dict(dict)),
            // a key with no value: odd number of children
            Open::Dict {
                pending_key: Some(_),
                ..
            } => Err(BencodeError::IllegalSequence),
        }
    }
}

/// Decodes one bencode value from the start of `buf`.
///
/// Trailing bytes after a complete top-level value are not an error; they
/// are simply left unread. Use [`decode_prefix`] to learn where the value
/// ended.
///
/// # Errors
///
/// [`BencodeError::IllegalSequence`] on empty input, malformed tokens,
/// a dict key at a non-string position, or a container left open at the
/// end of the buffer. Nothing of the partial tree survives a failure.
///
/// # Examples
///
/// ```
/// use benvar::{decode, Quark};
///
/// let value = decode(b"i64e").unwrap();
/// assert_eq!(value.as_int(), Some(64));
///
/// let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
/// let dict = value.as_dict().unwrap();
/// assert_eq!(dict.find_str(Quark::new(b"cow")), Some("moo"));
/// ```
pub fn decode(buf: &[u8]) -> Result<Variant, BencodeError> {
    decode_prefix(buf).map(|(value, _)| value)
}

/// Decodes one bencode value and returns it with the offset at which
/// parsing stopped, so callers can detect trailing bytes.
///
/// The tree is built iteratively: open containers live on an explicit
/// heap-backed stack, so nesting depth is bounded by memory rather than
/// by the call stack. Input like a million nested lists parses fine.
///
/// String values reference one shared copy of the input instead of
/// allocating per string; short strings are stored inline.
///
/// # Examples
///
/// ```
/// use benvar::decode_prefix;
///
/// // the top-level list closes at offset 2; the rest is left unread
/// let (value, end) = decode_prefix(b"leee").unwrap();
/// assert!(value.as_list().unwrap().is_empty());
/// assert_eq!(end, 2);
/// ```
pub fn decode_prefix(buf: &[u8]) -> Result<(Variant, usize), BencodeError> {
    let mut stack: Vec<Open> = Vec::new();
    let mut top: Option<Variant> = None;
    let mut shared: Option<Bytes> = None;
    let mut pos = 0;

    while pos < buf.len() {
        if top.is_some() && stack.is_empty() {
            break;
        }

        match buf[pos] {
            b'i' => {
                let (value, used) = scan_int(&buf[pos..])?;
                pos += used;
                place(Variant::Int(value), &mut stack, &mut top)?;
            }
            b'l' => {
                pos += 1;
                stack.push(Open::List(Vec::new()));
            }
            b'd' => {
                pos += 1;
                stack.push(Open::Dict {
                    dict: Dict::new(),
                    pending_key: None,
                });
            }
            b'e' => {
                pos += 1;
                let open = stack.pop().ok_or(BencodeError::IllegalSequence)?;
                place(open.close()?, &mut stack, &mut top)?;
            }
            b'0'..=b'9' => {
                let (bytes, used) = scan_str(&buf[pos..])?;
                let start = pos + used - bytes.len();
                pos += used;

                // a string directly under a dict with no key yet IS the key
                if let Some(Open::Dict {
                    pending_key: pending_key @ None,
                    ..
                }) = stack.last_mut()
                {
                    *pending_key = Some(Quark::new(bytes));
                } else {
                    let shared = shared.get_or_insert_with(|| Bytes::copy_from_slice(buf));
                    let value = VarStr::from_bytes(shared.slice(start..start + bytes.len()));
                    place(Variant::Str(value), &mut stack, &mut top)?;
                }
            }
            stray => {
                // invalid bencoded text at a token boundary; march past it
                trace!(offset = pos, byte = stray, "skipping stray byte");
                pos += 1;
            }
        }
    }

    match top {
        Some(value) if stack.is_empty() => Ok((value, pos)),
        _ => Err(BencodeError::IllegalSequence),
    }
}

fn place(
    value: Variant,
    stack: &mut Vec<Open>,
    top: &mut Option<Variant>,
) -> Result<(), BencodeError> {
    match stack.last_mut() {
        None => {
            if top.is_some() {
                return Err(BencodeError::IllegalSequence);
            }
            *top = Some(value);
        }
        Some(Open::List(items)) => items.push(value),
        Some(Open::Dict { dict, pending_key }) => match pending_key.take() {
            Some(key) => dict.add(key, value),
            // ints, lists, dicts cannot be keys
            None => return Err(BencodeError::IllegalSequence),
        },
    }
    Ok(())
}
