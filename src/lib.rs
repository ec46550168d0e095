//! benvar - bencode codec and variant tree
//!
//! The in-memory and wire representation of BitTorrent session data:
//! `.torrent` metainfo, RPC payloads, and settings snapshots all travel
//! through one typed tree and one strict codec.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 bencode decoding/encoding with canonical output
//! - [`variant`] - Typed tagged tree: scalars, byte strings, lists, dicts
//! - [`quark`] - Process-wide interning of dictionary keys
//! - [`json`] - JSON rendering sharing the bencode serializer's contract

pub mod bencode;
pub mod json;
pub mod quark;
pub mod variant;

pub use bencode::{decode, decode_prefix, encode, BencodeError};
pub use json::encode_json;
pub use quark::Quark;
pub use variant::{Dict, VarStr, Variant};
