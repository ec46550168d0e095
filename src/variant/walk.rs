//! Depth-first traversal driving both serializers.
//!
//! The walker threads an explicit heap-backed stack through the tree
//! instead of the call stack: nesting depth is bounded by available
//! memory, not by thread stack size.

use super::dict::Dict;
use super::value::Variant;

/// Callbacks invoked in emission order.
///
/// Dict entries arrive as a key string followed by the value's own
/// callbacks; both serializers rely on that framing.
pub(crate) trait Visitor {
    fn on_int(&mut self, value: i64);
    fn on_bool(&mut self, value: bool);
    fn on_real(&mut self, value: f64);
    fn on_string(&mut self, bytes: &[u8]);
    fn on_dict_begin(&mut self, len: usize);
    fn on_list_begin(&mut self, len: usize);
    fn on_container_end(&mut self);
}

enum Frame<'a> {
    List {
        items: &'a [Variant],
        pos: usize,
    },
    Dict {
        dict: &'a Dict,
        order: Vec<usize>,
        pos: usize,
    },
}

/// Visits `top` depth-first.
///
/// With `sort_dicts` set (both serializers set it) dict children are
/// visited in ascending byte-lexicographic key order, the canonical form
/// the wire format mandates; lists visit in storage order. `Unset`
/// children are omitted entirely, key included.
pub(crate) fn walk<'a, V: Visitor>(top: &'a Variant, visitor: &mut V, sort_dicts: bool) {
    let mut stack: Vec<Frame<'a>> = Vec::new();
    visit_node(top, visitor, &mut stack, sort_dicts);

    while let Some(frame) = stack.last_mut() {
        let child: &'a Variant;
        match frame {
            Frame::List { items, pos } => {
                let items: &'a [Variant] = *items;
                if *pos >= items.len() {
                    visitor.on_container_end();
                    stack.pop();
                    continue;
                }
                child = &items[*pos];
                *pos += 1;
            }
            Frame::Dict { dict, order, pos } => {
                let dict: &'a Dict = *dict;
                if *pos >= order.len() {
                    visitor.on_container_end();
                    stack.pop();
                    continue;
                }
                let index = order[*pos];
                *pos += 1;
                let (key, value) = dict.entry_at(index);
                if value.is_unset() {
                    continue;
                }
                visitor.on_string(key.as_bytes());
                child = value;
            }
        }
        visit_node(child, visitor, &mut stack, sort_dicts);
    }
}

fn visit_node<'a, V: Visitor>(
    node: &'a Variant,
    visitor: &mut V,
    stack: &mut Vec<Frame<'a>>,
    sort_dicts: bool,
) {
    match node {
        Variant::Unset => {}
        Variant::Int(i) => visitor.on_int(*i),
        Variant::Bool(b) => visitor.on_bool(*b),
        Variant::Real(d) => visitor.on_real(*d),
        Variant::Str(s) => visitor.on_string(s.as_slice()),
        Variant::List(items) => {
            visitor.on_list_begin(items.len());
            stack.push(Frame::List { items, pos: 0 });
        }
        Variant::Dict(dict) => {
            visitor.on_dict_begin(dict.len());
            stack.push(Frame::Dict {
                dict,
                order: dict.visit_order(sort_dicts),
                pos: 0,
            });
        }
    }
}
