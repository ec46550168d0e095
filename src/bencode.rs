//! Bencode encoding and decoding (BEP-3)
//!
//! Bencode is the encoding used by BitTorrent for `.torrent` files and
//! loosely structured peer data; this session also uses it for its RPC
//! and settings stores. The decoder is strict about the scalar grammar
//! (a `.torrent` whose integers re-encode differently would change its
//! info-hash) and is safe on adversarial input: string lengths are
//! checked before allocation and nesting depth never touches the call
//! stack.

mod decode;
mod encode;
mod error;
mod scan;

pub use decode::{decode, decode_prefix};
pub use encode::encode;
pub use error::BencodeError;
pub use scan::{scan_int, scan_str, MAX_STR_LENGTH};
