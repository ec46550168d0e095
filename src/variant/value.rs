use std::mem;

use bytes::Bytes;

use super::dict::Dict;
use super::string::VarStr;

/// A variant tree node.
///
/// This is the in-memory form of any bencoded payload: scalars, byte
/// strings, lists, and dictionaries, with bools and reals layered on top
/// for the session's config and RPC stores (bencode itself has neither).
/// A container owns its children; there is no sharing between trees and
/// no cycles.
///
/// # Examples
///
/// ```
/// use benvar::{Quark, Variant};
///
/// let mut dict = Variant::dict_with_capacity(2);
/// if let Variant::Dict(d) = &mut dict {
///     d.add_int(Quark::new(b"port"), 51413);
///     d.add_bool(Quark::new(b"dht-enabled"), true);
/// }
///
/// let d = dict.as_dict().unwrap();
/// assert_eq!(d.find_int(Quark::new(b"port")), Some(51413));
/// // bools read back as ints and vice versa
/// assert_eq!(d.find_int(Quark::new(b"dht-enabled")), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Variant {
    /// The uninitialized state. Not serializable; never produced by the
    /// parser.
    #[default]
    Unset,
    /// A signed 64-bit integer.
    Int(i64),
    /// A boolean; serialized as integer 1/0.
    Bool(bool),
    /// A 64-bit float; serialized as a fixed-point decimal string.
    Real(f64),
    /// A byte string.
    Str(VarStr),
    /// An ordered list of child variants.
    List(Vec<Variant>),
    /// An insertion-ordered dictionary keyed by interned strings.
    Dict(Dict),
}

impl Variant {
    /// Creates a byte-string variant from UTF-8 text.
    pub fn string(s: &str) -> Variant {
        Variant::Str(VarStr::new(s.as_bytes()))
    }

    /// Creates a byte-string variant, copying `bytes`.
    pub fn bytes(bytes: &[u8]) -> Variant {
        Variant::Str(VarStr::new(bytes))
    }

    /// Creates an empty list pre-sized for `n` children. The hint is
    /// advisory, not a limit.
    pub fn list_with_capacity(n: usize) -> Variant {
        Variant::List(Vec::with_capacity(n))
    }

    /// Creates an empty dict pre-sized for `n` entries. The hint is
    /// advisory, not a limit.
    pub fn dict_with_capacity(n: usize) -> Variant {
        Variant::Dict(Dict::with_capacity(n))
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Variant::Unset)
    }

    /// Reads the value as an integer.
    ///
    /// Bools read as 0/1. Reals never narrow to ints.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Variant::Int(i) => Some(*i),
            Variant::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Reads the value as a bool.
    ///
    /// Ints read as `false` iff zero. The literal strings `"true"` and
    /// `"false"` read as bools; no other string does.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Bool(b) => Some(*b),
            Variant::Int(i) => Some(*i != 0),
            Variant::Str(s) => match s.as_slice() {
                b"true" => Some(true),
                b"false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Reads the value as a real. Ints widen losslessly; strings never
    /// parse as numerics.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Variant::Real(d) => Some(*d),
            Variant::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Reads the value as a byte view, if it is a string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Variant::Str(s) => Some(s.as_slice()),
            _ => None,
        }
    }

    /// Reads the value as UTF-8 text, if it is a string holding valid
    /// UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::Str(s) => s.as_str(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Variant>> {
        match self {
            Variant::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Variant>> {
        match self {
            Variant::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Variant::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Variant::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    pub fn into_dict(mut self) -> Option<Dict> {
        match &mut self {
            Variant::Dict(d) => Some(mem::take(d)),
            _ => None,
        }
    }

    /// Consumes the value and returns the list, if it is one.
    pub fn into_list(mut self) -> Option<Vec<Variant>> {
        match &mut self {
            Variant::List(l) => Some(mem::take(l)),
            _ => None,
        }
    }
}

// A tree a million containers deep must drop without recursing a million
// frames: children are drained onto a heap worklist first, so each node
// drops empty.
impl Drop for Variant {
    fn drop(&mut self) {
        if !matches!(self, Variant::List(_) | Variant::Dict(_)) {
            return;
        }
        let mut worklist: Vec<Variant> = Vec::new();
        drain_children(self, &mut worklist);
        while let Some(mut node) = worklist.pop() {
            drain_children(&mut node, &mut worklist);
        }
    }
}

fn drain_children(node: &mut Variant, worklist: &mut Vec<Variant>) {
    match node {
        Variant::List(items) => worklist.append(items),
        Variant::Dict(dict) => {
            worklist.extend(dict.take_entries().into_iter().map(|(_, value)| value));
        }
        _ => {}
    }
}

impl From<i64> for Variant {
    fn from(i: i64) -> Variant {
        Variant::Int(i)
    }
}

impl From<bool> for Variant {
    fn from(b: bool) -> Variant {
        Variant::Bool(b)
    }
}

impl From<f64> for Variant {
    fn from(d: f64) -> Variant {
        Variant::Real(d)
    }
}

impl From<&str> for Variant {
    fn from(s: &str) -> Variant {
        Variant::string(s)
    }
}

impl From<Bytes> for Variant {
    fn from(bytes: Bytes) -> Variant {
        Variant::Str(VarStr::from_bytes(bytes))
    }
}

impl From<VarStr> for Variant {
    fn from(s: VarStr) -> Variant {
        Variant::Str(s)
    }
}

impl From<Vec<Variant>> for Variant {
    fn from(l: Vec<Variant>) -> Variant {
        Variant::List(l)
    }
}

impl From<Dict> for Variant {
    fn from(d: Dict) -> Variant {
        Variant::Dict(d)
    }
}
