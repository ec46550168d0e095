use crate::quark::Quark;

use super::value::Variant;

/// An insertion-ordered dictionary of `(Quark, Variant)` pairs.
///
/// Storage order is insertion order; the canonical key-sorted order only
/// appears at serialization time. `add` always appends, so duplicate keys
/// may coexist (a merge can produce them); lookups return the first match
/// in storage order. Callers wanting overwrite semantics remove-then-add,
/// or merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict {
    entries: Vec<(Quark, Variant)>,
}

impl Dict {
    pub fn new() -> Dict {
        Dict::default()
    }

    /// Pre-sizes storage for `n` entries. Advisory, not a limit.
    pub fn with_capacity(n: usize) -> Dict {
        Dict {
            entries: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quark, &Variant)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Returns the first entry stored under `key`.
    pub fn get(&self, key: Quark) -> Option<&Variant> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: Quark) -> Option<&mut Variant> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Appends an entry. Any existing entry under the same key stays put
    /// and keeps winning lookups.
    pub fn add(&mut self, key: Quark, value: impl Into<Variant>) {
        self.entries.push((key, value.into()));
    }

    pub fn add_int(&mut self, key: Quark, value: i64) {
        self.add(key, Variant::Int(value));
    }

    pub fn add_bool(&mut self, key: Quark, value: bool) {
        self.add(key, Variant::Bool(value));
    }

    pub fn add_real(&mut self, key: Quark, value: f64) {
        self.add(key, Variant::Real(value));
    }

    pub fn add_str(&mut self, key: Quark, value: &str) {
        self.add(key, Variant::string(value));
    }

    /// Removes and returns the first entry stored under `key`.
    pub fn remove(&mut self, key: Quark) -> Option<Variant> {
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Typed lookup; coerces the way [`Variant::as_int`] does.
    pub fn find_int(&self, key: Quark) -> Option<i64> {
        self.get(key)?.as_int()
    }

    /// Typed lookup; coerces the way [`Variant::as_bool`] does.
    pub fn find_bool(&self, key: Quark) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// Typed lookup; coerces the way [`Variant::as_real`] does.
    pub fn find_real(&self, key: Quark) -> Option<f64> {
        self.get(key)?.as_real()
    }

    pub fn find_bytes(&self, key: Quark) -> Option<&[u8]> {
        self.get(key)?.as_bytes()
    }

    pub fn find_str(&self, key: Quark) -> Option<&str> {
        self.get(key)?.as_str()
    }

    pub fn find_list(&self, key: Quark) -> Option<&Vec<Variant>> {
        self.get(key)?.as_list()
    }

    pub fn find_list_mut(&mut self, key: Quark) -> Option<&mut Vec<Variant>> {
        self.get_mut(key)?.as_list_mut()
    }

    pub fn find_dict(&self, key: Quark) -> Option<&Dict> {
        self.get(key)?.as_dict()
    }

    pub fn find_dict_mut(&mut self, key: Quark) -> Option<&mut Dict> {
        self.get_mut(key)?.as_dict_mut()
    }

    pub(crate) fn position(&self, key: Quark) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    pub(crate) fn entry_at(&self, index: usize) -> (Quark, &Variant) {
        let (key, value) = &self.entries[index];
        (*key, value)
    }

    pub(crate) fn value_at_mut(&mut self, index: usize) -> &mut Variant {
        &mut self.entries[index].1
    }

    pub(crate) fn take_entries(&mut self) -> Vec<(Quark, Variant)> {
        std::mem::take(&mut self.entries)
    }

    /// Child visit order: identity, or ascending byte-lexicographic key
    /// order when sorting. The sort is stable, so duplicate keys keep
    /// their storage order.
    pub(crate) fn visit_order(&self, sorted: bool) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        if sorted {
            order.sort_by(|&a, &b| {
                self.entries[a]
                    .0
                    .as_bytes()
                    .cmp(self.entries[b].0.as_bytes())
            });
        }
        order
    }
}
