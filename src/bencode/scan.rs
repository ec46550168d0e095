use super::error::BencodeError;

/// Longest single byte string the codec will accept. Anything bigger is
/// rejected before allocation.
pub const MAX_STR_LENGTH: usize = 128 * 1024 * 1024;

/// Scans one integer literal at the start of `buf`.
///
/// The grammar is `i`, an optional `-`, a digit run, `e`. `i0e` is valid
/// but leading zeros on anything else are not, and neither is `i-0e`:
/// content-addressed data depends on every value having exactly one
/// encoding. Values must fit a signed 64-bit integer.
///
/// On success returns the value and the number of bytes consumed.
///
/// # Examples
///
/// ```
/// use benvar::bencode::scan_int;
///
/// assert_eq!(scan_int(b"i64e"), Ok((64, 4)));
/// assert_eq!(scan_int(b"i-3etrailing"), Ok((-3, 4)));
/// assert!(scan_int(b"i04e").is_err());
/// assert!(scan_int(b"i64").is_err());
/// ```
pub fn scan_int(buf: &[u8]) -> Result<(i64, usize), BencodeError> {
    if buf.first() != Some(&b'i') {
        return Err(BencodeError::IllegalSequence);
    }

    let end = buf
        .iter()
        .position(|&b| b == b'e')
        .ok_or(BencodeError::IllegalSequence)?;
    let body = &buf[1..end];

    let (negative, magnitude) = match body.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, body),
    };

    if magnitude.is_empty() || !magnitude.iter().all(|b| b.is_ascii_digit()) {
        return Err(BencodeError::IllegalSequence);
    }

    // No leading zeroes, and no negative zero.
    if magnitude[0] == b'0' && (negative || magnitude.len() > 1) {
        return Err(BencodeError::IllegalSequence);
    }

    let text = std::str::from_utf8(body).map_err(|_| BencodeError::IllegalSequence)?;
    let value: i64 = text.parse().map_err(|_| BencodeError::IllegalSequence)?;

    Ok((value, end + 1))
}

/// Scans one byte-string literal at the start of `buf`.
///
/// The grammar is a decimal length, `:`, then that many raw bytes; there
/// are no delimiters around the data. Leading zeros on the length are
/// tolerated, matching common peer implementations (deliberately
/// asymmetric with [`scan_int`]). The declared length must stay within
/// [`MAX_STR_LENGTH`] and within the buffer.
///
/// On success returns a slice into `buf` and the number of bytes
/// consumed; nothing is allocated.
///
/// # Examples
///
/// ```
/// use benvar::bencode::scan_str;
///
/// assert_eq!(scan_str(b"4:spam"), Ok((&b"spam"[..], 6)));
/// assert_eq!(scan_str(b"0:"), Ok((&b""[..], 2)));
/// assert!(scan_str(b"5:spam").is_err());
/// ```
pub fn scan_str(buf: &[u8]) -> Result<(&[u8], usize), BencodeError> {
    if !matches!(buf.first(), Some(b) if b.is_ascii_digit()) {
        return Err(BencodeError::IllegalSequence);
    }

    let colon = buf
        .iter()
        .position(|&b| b == b':')
        .ok_or(BencodeError::IllegalSequence)?;
    let digits = &buf[..colon];

    if !digits.iter().all(|b| b.is_ascii_digit()) {
        return Err(BencodeError::IllegalSequence);
    }

    let text = std::str::from_utf8(digits).map_err(|_| BencodeError::IllegalSequence)?;
    let len: usize = text.parse().map_err(|_| BencodeError::IllegalSequence)?;

    if len > MAX_STR_LENGTH {
        return Err(BencodeError::IllegalSequence);
    }

    let start = colon + 1;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= buf.len())
        .ok_or(BencodeError::IllegalSequence)?;

    Ok((&buf[start..end], end))
}
