//! Typed variant tree
//!
//! The in-memory representation of bencoded payloads: `.torrent` files,
//! RPC requests and responses, and the session's settings store all parse
//! into and serialize out of this one tree shape.

mod dict;
mod merge;
mod string;
mod value;

pub(crate) mod walk;

pub use dict::Dict;
pub use string::VarStr;
pub use value::Variant;

#[cfg(test)]
mod tests;
