use crate::variant::walk::{walk, Visitor};
use crate::variant::Variant;

use super::error::BencodeError;

/// Serializes a variant tree to canonical bencode.
///
/// Canonical means dict keys come out in ascending byte-lexicographic
/// order whatever their in-memory order, and integers carry no redundant
/// leading zeros and no negative zero. Bools become integers 1/0. Reals,
/// which bencode has no production for, become fixed-point decimal
/// strings with six fractional digits; a consumer has to know which keys
/// hold reals to read them back.
///
/// Serialization cannot fail on a well-formed tree.
///
/// # Errors
///
/// [`BencodeError::InvalidArgument`] if `top` is unset.
///
/// # Examples
///
/// ```
/// use benvar::{decode, encode};
///
/// // keys re-serialize in sorted order
/// let value = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap();
/// assert_eq!(encode(&value).unwrap(), b"d3:cow3:moo4:spam4:eggse");
/// ```
pub fn encode(top: &Variant) -> Result<Vec<u8>, BencodeError> {
    if top.is_unset() {
        return Err(BencodeError::InvalidArgument);
    }
    let mut writer = BencWriter { out: Vec::new() };
    walk(top, &mut writer, true);
    Ok(writer.out)
}

struct BencWriter {
    out: Vec<u8>,
}

impl BencWriter {
    fn put_raw_str(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes.len().to_string().as_bytes());
        self.out.push(b':');
        self.out.extend_from_slice(bytes);
    }
}

impl Visitor for BencWriter {
    fn on_int(&mut self, value: i64) {
        self.out.push(b'i');
        self.out.extend_from_slice(value.to_string().as_bytes());
        self.out.push(b'e');
    }

    fn on_bool(&mut self, value: bool) {
        self.out
            .extend_from_slice(if value { b"i1e" } else { b"i0e" });
    }

    fn on_real(&mut self, value: f64) {
        self.put_raw_str(format!("{value:.6}").as_bytes());
    }

    fn on_string(&mut self, bytes: &[u8]) {
        self.put_raw_str(bytes);
    }

    fn on_dict_begin(&mut self, _len: usize) {
        self.out.push(b'd');
    }

    fn on_list_begin(&mut self, _len: usize) {
        self.out.push(b'l');
    }

    fn on_container_end(&mut self) {
        self.out.push(b'e');
    }
}
