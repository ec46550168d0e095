//! Dictionary-overwrite merge, used to lay loaded settings over defaults.

use super::dict::Dict;
use super::value::Variant;

impl Variant {
    /// Overwrites entries of this dict with deep copies of `src`'s
    /// entries. A no-op unless both sides are dicts.
    pub fn merge(&mut self, src: &Variant) {
        if let (Variant::Dict(dest), Variant::Dict(src)) = (self, src) {
            dest.merge(src);
        }
    }
}

impl Dict {
    /// Merges `src` into this dict, entry by entry in `src`'s storage
    /// order:
    ///
    /// - dict over dict merges recursively, keeping keys `src` lacks;
    /// - list over list replaces the whole list, never element-wise;
    /// - anything else replaces the first matching slot with a deep copy;
    /// - keys new to this dict are appended.
    ///
    /// Keys absent from `src` are never deleted.
    pub fn merge(&mut self, src: &Dict) {
        for (key, value) in src.iter() {
            match self.position(key) {
                Some(index) => match (self.value_at_mut(index), value) {
                    (Variant::Dict(dest_child), Variant::Dict(src_child)) => {
                        dest_child.merge(src_child);
                    }
                    (slot, _) => *slot = value.clone(),
                },
                None => self.add(key, value.clone()),
            }
        }
    }
}
