use std::fmt;
use std::hash::{Hash, Hasher};

use bytes::Bytes;

/// Longest byte string stored inline without touching the heap.
const INLINE_CAP: usize = 16;

/// A variant byte string.
///
/// Storage comes in three modes: short strings are kept inline by value,
/// longer owned strings share a refcounted heap buffer ([`Bytes`]), and
/// `'static` data is referenced in place. The mode is an implementation
/// detail: every read returns the same byte view regardless, and equality
/// and hashing are byte-wise across modes.
#[derive(Clone)]
pub struct VarStr(Repr);

#[derive(Clone)]
enum Repr {
    Inline { len: u8, buf: [u8; INLINE_CAP] },
    Shared(Bytes),
    Static(&'static [u8]),
}

impl VarStr {
    /// Copies `bytes` into inline or heap storage.
    pub fn new(bytes: &[u8]) -> VarStr {
        match Self::inline(bytes) {
            Some(s) => s,
            None => VarStr(Repr::Shared(Bytes::copy_from_slice(bytes))),
        }
    }

    /// Takes ownership of `bytes` without copying, unless the string is
    /// short enough to store inline.
    pub fn from_bytes(bytes: Bytes) -> VarStr {
        match Self::inline(&bytes) {
            Some(s) => s,
            None => VarStr(Repr::Shared(bytes)),
        }
    }

    /// References `bytes` in place, copying nothing.
    pub fn from_static(bytes: &'static [u8]) -> VarStr {
        VarStr(Repr::Static(bytes))
    }

    fn inline(bytes: &[u8]) -> Option<VarStr> {
        if bytes.len() > INLINE_CAP {
            return None;
        }
        let mut buf = [0u8; INLINE_CAP];
        buf[..bytes.len()].copy_from_slice(bytes);
        Some(VarStr(Repr::Inline {
            len: bytes.len() as u8,
            buf,
        }))
    }

    /// The byte view, whatever the storage mode.
    pub fn as_slice(&self) -> &[u8] {
        match &self.0 {
            Repr::Inline { len, buf } => &buf[..*len as usize],
            Repr::Shared(bytes) => bytes,
            Repr::Static(bytes) => bytes,
        }
    }

    /// The bytes as UTF-8, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_slice()).ok()
    }

    /// Owned storage suitable for a holder that may outlive this string.
    ///
    /// Inline strings are copied; shared and static storage is handed over
    /// without copying.
    pub fn to_bytes(&self) -> Bytes {
        match &self.0 {
            Repr::Inline { len, buf } => Bytes::copy_from_slice(&buf[..*len as usize]),
            Repr::Shared(bytes) => bytes.clone(),
            Repr::Static(bytes) => Bytes::from_static(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for VarStr {
    fn eq(&self, other: &VarStr) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for VarStr {}

impl Hash for VarStr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for VarStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_slice()))
    }
}

impl From<&str> for VarStr {
    fn from(s: &str) -> VarStr {
        VarStr::new(s.as_bytes())
    }
}

impl From<&[u8]> for VarStr {
    fn from(bytes: &[u8]) -> VarStr {
        VarStr::new(bytes)
    }
}

impl From<Bytes> for VarStr {
    fn from(bytes: Bytes) -> VarStr {
        VarStr::from_bytes(bytes)
    }
}
