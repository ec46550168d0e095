//! JSON rendering of variant trees.
//!
//! The sister back-end to [`bencode`](crate::bencode): the same walker,
//! the same canonical key order, so a settings snapshot serializes to
//! either format deterministically. Emit-only; the session reads its
//! stores back through the bencode decoder.

use serde_json::{Map, Number, Value};

use crate::bencode::BencodeError;
use crate::variant::walk::{walk, Visitor};
use crate::variant::Variant;

/// Serializes a variant tree to compact JSON.
///
/// Ints and bools map to native JSON scalars, reals to JSON numbers
/// (`null` when non-finite), and byte strings decode lossily to UTF-8
/// text. Dict keys come out in the same ascending byte order the bencode
/// serializer uses.
///
/// # Errors
///
/// [`BencodeError::InvalidArgument`] if `top` is unset.
///
/// # Examples
///
/// ```
/// use benvar::{decode, encode_json};
///
/// let value = decode(b"d5:helloi1e5:worldi2ee").unwrap();
/// assert_eq!(encode_json(&value).unwrap(), r#"{"hello":1,"world":2}"#);
/// ```
pub fn encode_json(top: &Variant) -> Result<String, BencodeError> {
    if top.is_unset() {
        return Err(BencodeError::InvalidArgument);
    }
    let mut builder = JsonBuilder {
        stack: Vec::new(),
        root: None,
    };
    walk(top, &mut builder, true);
    Ok(builder.root.unwrap_or(Value::Null).to_string())
}

enum Holder {
    Array(Vec<Value>),
    Object {
        map: Map<String, Value>,
        pending_key: Option<String>,
    },
}

struct JsonBuilder {
    stack: Vec<Holder>,
    root: Option<Value>,
}

impl JsonBuilder {
    fn put(&mut self, value: Value) {
        match self.stack.last_mut() {
            None => self.root = Some(value),
            Some(Holder::Array(items)) => items.push(value),
            Some(Holder::Object { map, pending_key }) => {
                if let Some(key) = pending_key.take() {
                    map.insert(key, value);
                }
            }
        }
    }
}

impl Visitor for JsonBuilder {
    fn on_int(&mut self, value: i64) {
        self.put(Value::from(value));
    }

    fn on_bool(&mut self, value: bool) {
        self.put(Value::Bool(value));
    }

    fn on_real(&mut self, value: f64) {
        self.put(Number::from_f64(value).map_or(Value::Null, Value::Number));
    }

    fn on_string(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes).into_owned();
        // inside an object, a string with no key pending is the key
        if let Some(Holder::Object {
            pending_key: pending_key @ None,
            ..
        }) = self.stack.last_mut()
        {
            *pending_key = Some(text);
        } else {
            self.put(Value::String(text));
        }
    }

    fn on_dict_begin(&mut self, _len: usize) {
        self.stack.push(Holder::Object {
            map: Map::new(),
            pending_key: None,
        });
    }

    fn on_list_begin(&mut self, len: usize) {
        self.stack.push(Holder::Array(Vec::with_capacity(len)));
    }

    fn on_container_end(&mut self) {
        let Some(holder) = self.stack.pop() else {
            return;
        };
        let value = match holder {
            Holder::Array(items) => Value::Array(items),
            Holder::Object { map, .. } => Value::Object(map),
        };
        self.put(value);
    }
}
