//! Interned dictionary keys.
//!
//! Dictionary keys and other frequently repeated short strings are interned
//! into a process-wide table and referred to by a small integer id, the
//! [`Quark`]. Interning the same bytes always yields the same id, so key
//! comparison inside a [`Dict`](crate::variant::Dict) is an integer compare
//! rather than a byte compare.
//!
//! The session/RPC field names the surrounding code uses all the time are
//! pre-registered as a closed, sorted set, so their ids are compile-time
//! constants (see [`keys`]). Everything else goes through the dynamic table,
//! which is never torn down: interned bytes live for the rest of the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use tracing::trace;

/// An interned byte string.
///
/// Equal byte sequences intern to equal quarks, unequal sequences to
/// distinct quarks, and ids are stable for the life of the process.
///
/// # Examples
///
/// ```
/// use benvar::Quark;
///
/// let a = Quark::new(b"announce");
/// let b = Quark::new(b"announce");
/// assert_eq!(a, b);
/// assert_eq!(a.as_bytes(), b"announce");
/// assert_eq!(a, benvar::quark::keys::ANNOUNCE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quark(u32);

/// Pre-registered well-known keys.
///
/// The constants index into the same table `Quark::new` consults, so
/// `Quark::new(b"announce") == keys::ANNOUNCE` holds without taking a lock.
pub mod keys {
    use super::Quark;

    /// The empty string.
    pub const NONE: Quark = Quark(0);

    pub const ACTIVITY_DATE: Quark = Quark(1);
    pub const ADDED_DATE: Quark = Quark(2);
    pub const ALT_SPEED_DOWN: Quark = Quark(3);
    pub const ALT_SPEED_ENABLED: Quark = Quark(4);
    pub const ALT_SPEED_UP: Quark = Quark(5);
    pub const ANNOUNCE: Quark = Quark(6);
    pub const ANNOUNCE_LIST: Quark = Quark(7);
    pub const ARGUMENTS: Quark = Quark(8);
    pub const BIND_ADDRESS_IPV4: Quark = Quark(9);
    pub const BIND_ADDRESS_IPV6: Quark = Quark(10);
    pub const BLOCKLIST_ENABLED: Quark = Quark(11);
    pub const COMMENT: Quark = Quark(12);
    pub const CORRUPT: Quark = Quark(13);
    pub const CREATED_BY: Quark = Quark(14);
    pub const CREATION_DATE: Quark = Quark(15);
    pub const DHT_ENABLED: Quark = Quark(16);
    pub const DONE_DATE: Quark = Quark(17);
    pub const DOWNLOAD_DIR: Quark = Quark(18);
    pub const DOWNLOADED_EVER: Quark = Quark(19);
    pub const ENCODING: Quark = Quark(20);
    pub const ENCRYPTION: Quark = Quark(21);
    pub const ERROR: Quark = Quark(22);
    pub const ERROR_STRING: Quark = Quark(23);
    pub const ETA: Quark = Quark(24);
    pub const FILES: Quark = Quark(25);
    pub const FILES_WANTED: Quark = Quark(26);
    pub const HASH_STRING: Quark = Quark(27);
    pub const ID: Quark = Quark(28);
    pub const IDLE_SEEDING_LIMIT: Quark = Quark(29);
    pub const INCOMPLETE_DIR: Quark = Quark(30);
    pub const INCOMPLETE_DIR_ENABLED: Quark = Quark(31);
    pub const INFO: Quark = Quark(32);
    pub const IS_FINISHED: Quark = Quark(33);
    pub const LEFT_UNTIL_DONE: Quark = Quark(34);
    pub const LENGTH: Quark = Quark(35);
    pub const LPD_ENABLED: Quark = Quark(36);
    pub const MAGNET_LINK: Quark = Quark(37);
    pub const MESSAGE_LEVEL: Quark = Quark(38);
    pub const METHOD: Quark = Quark(39);
    pub const NAME: Quark = Quark(40);
    pub const PATH: Quark = Quark(41);
    pub const PEER_LIMIT_GLOBAL: Quark = Quark(42);
    pub const PEER_LIMIT_PER_TORRENT: Quark = Quark(43);
    pub const PEER_PORT: Quark = Quark(44);
    pub const PEER_PORT_RANDOM_ON_START: Quark = Quark(45);
    pub const PEERS: Quark = Quark(46);
    pub const PEX_ENABLED: Quark = Quark(47);
    pub const PIECE_LENGTH: Quark = Quark(48);
    pub const PIECES: Quark = Quark(49);
    pub const PORT_FORWARDING_ENABLED: Quark = Quark(50);
    pub const PRIVATE: Quark = Quark(51);
    pub const RATIO_LIMIT: Quark = Quark(52);
    pub const RATIO_LIMIT_ENABLED: Quark = Quark(53);
    pub const RESULT: Quark = Quark(54);
    pub const RPC_AUTHENTICATION_REQUIRED: Quark = Quark(55);
    pub const RPC_BIND_ADDRESS: Quark = Quark(56);
    pub const RPC_ENABLED: Quark = Quark(57);
    pub const RPC_PASSWORD: Quark = Quark(58);
    pub const RPC_PORT: Quark = Quark(59);
    pub const RPC_USERNAME: Quark = Quark(60);
    pub const RPC_WHITELIST: Quark = Quark(61);
    pub const SEED_RATIO_LIMIT: Quark = Quark(62);
    pub const SIZE_WHEN_DONE: Quark = Quark(63);
    pub const SOURCE: Quark = Quark(64);
    pub const SPEED_LIMIT_DOWN: Quark = Quark(65);
    pub const SPEED_LIMIT_DOWN_ENABLED: Quark = Quark(66);
    pub const SPEED_LIMIT_UP: Quark = Quark(67);
    pub const SPEED_LIMIT_UP_ENABLED: Quark = Quark(68);
    pub const START_ADDED_TORRENTS: Quark = Quark(69);
    pub const STATUS: Quark = Quark(70);
    pub const TORRENTS: Quark = Quark(71);
    pub const TOTAL_SIZE: Quark = Quark(72);
    pub const TRASH_ORIGINAL_TORRENT_FILES: Quark = Quark(73);
    pub const UMASK: Quark = Quark(74);
    pub const UPLOADED_EVER: Quark = Quark(75);
    pub const URL_LIST: Quark = Quark(76);
    pub const UTP_ENABLED: Quark = Quark(77);
    pub const VERSION: Quark = Quark(78);
}

// Must stay sorted byte-lexicographically and in sync with `keys`:
// `Quark::new` binary-searches it and the constants index into it.
static WELL_KNOWN: &[&[u8]] = &[
    b"",
    b"activity-date",
    b"added-date",
    b"alt-speed-down",
    b"alt-speed-enabled",
    b"alt-speed-up",
    b"announce",
    b"announce-list",
    b"arguments",
    b"bind-address-ipv4",
    b"bind-address-ipv6",
    b"blocklist-enabled",
    b"comment",
    b"corrupt",
    b"created by",
    b"creation date",
    b"dht-enabled",
    b"done-date",
    b"download-dir",
    b"downloadedEver",
    b"encoding",
    b"encryption",
    b"error",
    b"errorString",
    b"eta",
    b"files",
    b"files-wanted",
    b"hashString",
    b"id",
    b"idle-seeding-limit",
    b"incomplete-dir",
    b"incomplete-dir-enabled",
    b"info",
    b"isFinished",
    b"leftUntilDone",
    b"length",
    b"lpd-enabled",
    b"magnetLink",
    b"message-level",
    b"method",
    b"name",
    b"path",
    b"peer-limit-global",
    b"peer-limit-per-torrent",
    b"peer-port",
    b"peer-port-random-on-start",
    b"peers",
    b"pex-enabled",
    b"piece length",
    b"pieces",
    b"port-forwarding-enabled",
    b"private",
    b"ratio-limit",
    b"ratio-limit-enabled",
    b"result",
    b"rpc-authentication-required",
    b"rpc-bind-address",
    b"rpc-enabled",
    b"rpc-password",
    b"rpc-port",
    b"rpc-username",
    b"rpc-whitelist",
    b"seedRatioLimit",
    b"sizeWhenDone",
    b"source",
    b"speed-limit-down",
    b"speed-limit-down-enabled",
    b"speed-limit-up",
    b"speed-limit-up-enabled",
    b"start-added-torrents",
    b"status",
    b"torrents",
    b"totalSize",
    b"trash-original-torrent-files",
    b"umask",
    b"uploadedEver",
    b"url-list",
    b"utp-enabled",
    b"version",
];

struct Interner {
    ids: HashMap<&'static [u8], u32>,
    names: Vec<&'static [u8]>,
}

fn table() -> &'static RwLock<Interner> {
    static TABLE: OnceLock<RwLock<Interner>> = OnceLock::new();
    TABLE.get_or_init(|| {
        RwLock::new(Interner {
            ids: HashMap::new(),
            names: Vec::new(),
        })
    })
}

impl Quark {
    /// Interns `bytes`, assigning a fresh id on first sight.
    ///
    /// Never fails and is safe to call from multiple threads. Repeated
    /// interning of well-known keys and of already-seen strings takes no
    /// write lock.
    pub fn new(bytes: &[u8]) -> Quark {
        if let Ok(index) = WELL_KNOWN.binary_search_by(|name| (**name).cmp(bytes)) {
            return Quark(index as u32);
        }

        if let Some(&id) = table().read().ids.get(bytes) {
            return Quark(id);
        }

        let mut interner = table().write();
        if let Some(&id) = interner.ids.get(bytes) {
            return Quark(id);
        }

        let name: &'static [u8] = Box::leak(bytes.to_vec().into_boxed_slice());
        let id = (WELL_KNOWN.len() + interner.names.len()) as u32;
        interner.names.push(name);
        interner.ids.insert(name, id);
        trace!(id, name = %String::from_utf8_lossy(name), "interned quark");
        Quark(id)
    }

    /// Returns the quark for `bytes` if it has already been interned,
    /// without interning it.
    pub fn find(bytes: &[u8]) -> Option<Quark> {
        if let Ok(index) = WELL_KNOWN.binary_search_by(|name| (**name).cmp(bytes)) {
            return Some(Quark(index as u32));
        }
        table().read().ids.get(bytes).copied().map(Quark)
    }

    /// Returns the interned byte sequence.
    pub fn as_bytes(self) -> &'static [u8] {
        let index = self.0 as usize;
        if index < WELL_KNOWN.len() {
            WELL_KNOWN[index]
        } else {
            table().read().names[index - WELL_KNOWN.len()]
        }
    }

    /// Returns the interned bytes as UTF-8, if they are valid UTF-8.
    pub fn as_str(self) -> Option<&'static str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }
}

impl fmt::Display for Quark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}
