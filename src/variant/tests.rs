use bytes::Bytes;

use crate::bencode::encode;
use crate::quark::Quark;

use super::*;

#[test]
fn test_typed_reads_and_coercions() {
    let value = Variant::Int(30);
    assert_eq!(value.as_int(), Some(30));
    assert_eq!(value.as_real(), Some(30.0));
    assert_eq!(value.as_bool(), Some(true));
    assert_eq!(value.as_bytes(), None);

    assert_eq!(Variant::Int(0).as_bool(), Some(false));

    let value = Variant::Bool(true);
    assert_eq!(value.as_bool(), Some(true));
    assert_eq!(value.as_int(), Some(1));
    assert_eq!(Variant::Bool(false).as_int(), Some(0));

    // reals never narrow to ints
    let value = Variant::Real(3.5);
    assert_eq!(value.as_real(), Some(3.5));
    assert_eq!(value.as_int(), None);
    assert_eq!(value.as_bool(), None);

    let value = Variant::string("foo");
    assert_eq!(value.as_bytes(), Some(&b"foo"[..]));
    assert_eq!(value.as_str(), Some("foo"));
    assert_eq!(value.as_bool(), None);
    assert_eq!(value.as_int(), None);
    assert_eq!(value.as_real(), None);

    // only the literal strings "true" and "false" read as bools
    assert_eq!(Variant::string("true").as_bool(), Some(true));
    assert_eq!(Variant::string("false").as_bool(), Some(false));
    assert_eq!(Variant::string("yes").as_bool(), None);
}

#[test]
fn test_string_storage_modes_are_equivalent() {
    let inline = VarStr::new(b"short");
    let heap = VarStr::from_bytes(Bytes::from(b"this string is long enough to need the heap".to_vec()));
    let fixed = VarStr::from_static(b"anything");

    assert_eq!(inline.as_slice(), b"short");
    assert_eq!(heap.as_slice(), &b"this string is long enough to need the heap"[..]);
    assert_eq!(fixed.as_slice(), b"anything");

    // a static view references the original memory; a copy does not
    static DATA: &[u8] = b"anything";
    assert!(std::ptr::eq(
        VarStr::from_static(DATA).as_slice().as_ptr(),
        DATA.as_ptr()
    ));
    assert!(!std::ptr::eq(VarStr::new(DATA).as_slice().as_ptr(), DATA.as_ptr()));

    // equality is byte-wise across modes
    assert_eq!(VarStr::new(b"anything"), fixed);
    assert_eq!(VarStr::from_static(b"short"), inline);

    // promotion to owned storage keeps the bytes
    assert_eq!(&inline.to_bytes()[..], b"short");
    assert_eq!(&fixed.to_bytes()[..], b"anything");
}

#[test]
fn test_conversions() {
    assert_eq!(Variant::from(42i64), Variant::Int(42));
    assert_eq!(Variant::from(true), Variant::Bool(true));
    assert_eq!(Variant::from(0.5), Variant::Real(0.5));
    assert_eq!(Variant::from("spam"), Variant::string("spam"));
    assert_eq!(
        Variant::from(Bytes::from_static(b"spam")),
        Variant::bytes(b"spam")
    );
    assert_eq!(
        Variant::from(VarStr::from_static(b"spam")),
        Variant::string("spam")
    );

    let s = VarStr::from("spam");
    assert_eq!(s.len(), 4);
    assert!(!s.is_empty());
    assert!(VarStr::from(&b""[..]).is_empty());
}

#[test]
fn test_dict_first_match_wins() {
    let key = Quark::new(b"dup");
    let mut dict = Dict::new();
    dict.add_int(key, 1);
    dict.add_int(key, 2);
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.find_int(key), Some(1));

    // removing the first match exposes the second
    assert_eq!(dict.remove(key).and_then(|v| v.as_int()), Some(1));
    assert_eq!(dict.find_int(key), Some(2));
    assert_eq!(dict.remove(key).and_then(|v| v.as_int()), Some(2));
    assert!(dict.remove(key).is_none());
}

#[test]
fn test_dict_typed_lookups() {
    let key_bool = Quark::new(b"this-is-a-bool");
    let key_real = Quark::new(b"this-is-a-real");
    let key_int = Quark::new(b"this-is-an-int");
    let key_str = Quark::new(b"this-is-a-string");
    let key_unknown = Quark::new(b"this-is-a-missing-entry");

    let mut dict = Dict::new();
    dict.add_bool(key_bool, true);
    dict.add_int(key_int, 1234);
    dict.add_real(key_real, 0.3);
    dict.add_str(key_str, "this-is-a-string");

    assert_eq!(dict.find_str(key_str), Some("this-is-a-string"));
    assert_eq!(dict.find_bytes(key_str), Some(&b"this-is-a-string"[..]));
    assert_eq!(dict.find_str(key_bool), None);
    assert_eq!(dict.find_str(key_real), None);
    assert_eq!(dict.find_str(key_int), None);
    assert_eq!(dict.find_str(key_unknown), None);

    assert_eq!(dict.find_bool(key_bool), Some(true));
    assert_eq!(dict.find_bool(key_real), None);
    assert_eq!(dict.find_bool(key_str), None);
    // ints read as bools: false iff zero
    assert_eq!(dict.find_bool(key_int), Some(true));

    assert_eq!(dict.find_real(key_real), Some(0.3));
    assert_eq!(dict.find_real(key_int), Some(1234.0));
    assert_eq!(dict.find_real(key_bool), None);
    assert_eq!(dict.find_real(key_str), None);

    assert_eq!(dict.find_int(key_int), Some(1234));
    assert_eq!(dict.find_int(key_bool), Some(1));
    assert_eq!(dict.find_int(key_real), None);
    assert_eq!(dict.find_int(key_str), None);
}

#[test]
fn test_bool_and_int_recast() {
    let key1 = Quark::new(b"key1");
    let key2 = Quark::new(b"key2");
    let key3 = Quark::new(b"key3");
    let key4 = Quark::new(b"key4");

    let mut dict = Dict::with_capacity(4);
    dict.add_bool(key1, false);
    dict.add_bool(key2, true);
    dict.add_int(key3, 0);
    dict.add_int(key4, 1);

    assert_eq!(dict.find_bool(key1), Some(false));
    assert_eq!(dict.find_bool(key2), Some(true));
    assert_eq!(dict.find_bool(key3), Some(false));
    assert_eq!(dict.find_bool(key4), Some(true));

    assert_eq!(dict.find_int(key1), Some(0));
    assert_eq!(dict.find_int(key2), Some(1));
    assert_eq!(dict.find_int(key3), Some(0));
    assert_eq!(dict.find_int(key4), Some(1));
}

#[test]
fn test_find_containers() {
    let lists = Quark::new(b"lists");
    let dicts = Quark::new(b"dicts");
    let mut dict = Dict::new();
    dict.add(lists, vec![Variant::Int(1), Variant::Int(2)]);
    dict.add(dicts, Dict::new());

    assert_eq!(dict.find_list(lists).map(|l| l.len()), Some(2));
    assert!(dict.find_dict(dicts).is_some());
    assert!(dict.find_list(dicts).is_none());
    assert!(dict.find_dict(lists).is_none());

    dict.find_list_mut(lists).unwrap().push(Variant::Int(3));
    assert_eq!(dict.find_list(lists).map(|l| l.len()), Some(3));

    dict.find_dict_mut(dicts)
        .unwrap()
        .add_int(Quark::new(b"inner"), 1);
    assert_eq!(dict.find_dict(dicts).map(|d| d.len()), Some(1));
}

#[test]
fn test_into_containers() {
    let value = Variant::from(vec![Variant::Int(1)]);
    assert_eq!(value.into_list().map(|l| l.len()), Some(1));

    let mut d = Dict::new();
    d.add_int(Quark::new(b"x"), 7);
    let value = Variant::from(d);
    let d = value.into_dict().unwrap();
    assert_eq!(d.find_int(Quark::new(b"x")), Some(7));

    assert!(Variant::Int(3).into_dict().is_none());
    assert!(Variant::Int(3).into_list().is_none());
}

#[test]
fn test_merge_overwrites_and_appends() {
    let i1 = Quark::new(b"i1");
    let i2 = Quark::new(b"i2");
    let i3 = Quark::new(b"i3");
    let i4 = Quark::new(b"i4");
    let s5 = Quark::new(b"s5");
    let s6 = Quark::new(b"s6");
    let s7 = Quark::new(b"s7");
    let s8 = Quark::new(b"s8");

    // initial dictionary (default values)
    let mut dest = Variant::dict_with_capacity(10);
    {
        let d = dest.as_dict_mut().unwrap();
        d.add_int(i1, 1);
        d.add_int(i2, 2);
        d.add_int(i4, -35); // remains untouched
        d.add_str(s5, "abc");
        d.add_str(s6, "def");
        d.add_str(s7, "127.0.0.1"); // remains untouched
    }

    // new dictionary, will overwrite items in dest
    let mut src = Variant::dict_with_capacity(10);
    {
        let d = src.as_dict_mut().unwrap();
        d.add_int(i1, 1); // same value
        d.add_int(i2, 4); // new value
        d.add_int(i3, 3); // new key:value
        d.add_str(s5, "abc"); // same value
        d.add_str(s6, "xyz"); // new value
        d.add_str(s8, "ghi"); // new key:value
    }

    dest.merge(&src);

    let d = dest.as_dict().unwrap();
    assert_eq!(d.find_int(i1), Some(1));
    assert_eq!(d.find_int(i2), Some(4));
    assert_eq!(d.find_int(i3), Some(3));
    assert_eq!(d.find_int(i4), Some(-35));
    assert_eq!(d.find_str(s5), Some("abc"));
    assert_eq!(d.find_str(s6), Some("xyz"));
    assert_eq!(d.find_str(s7), Some("127.0.0.1"));
    assert_eq!(d.find_str(s8), Some("ghi"));
}

#[test]
fn test_merge_nested_dicts_recurse() {
    let outer = Quark::new(b"outer");
    let kept = Quark::new(b"kept");
    let replaced = Quark::new(b"replaced");

    let mut dest = Dict::new();
    let mut dest_inner = Dict::new();
    dest_inner.add_int(kept, 1);
    dest_inner.add_int(replaced, 2);
    dest.add(outer, dest_inner);

    let mut src = Dict::new();
    let mut src_inner = Dict::new();
    src_inner.add_int(replaced, 20);
    src.add(outer, src_inner);

    dest.merge(&src);

    let inner = dest.find_dict(outer).unwrap();
    assert_eq!(inner.find_int(kept), Some(1));
    assert_eq!(inner.find_int(replaced), Some(20));
}

#[test]
fn test_merge_replaces_lists_wholesale() {
    let key = Quark::new(b"list-key");

    let mut dest = Dict::new();
    dest.add(key, vec![Variant::Int(1), Variant::Int(2), Variant::Int(3)]);

    let mut src = Dict::new();
    src.add(key, vec![Variant::Int(9)]);

    dest.merge(&src);
    let items = dest.find_list(key).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].as_int(), Some(9));
}

#[test]
fn test_merge_replaces_across_kinds() {
    let a = Quark::new(b"scalar-to-dict");
    let b = Quark::new(b"dict-to-scalar");

    let mut dest = Dict::new();
    dest.add_int(a, 1);
    dest.add(b, Dict::new());

    let mut src = Dict::new();
    src.add(a, Dict::new());
    src.add_int(b, 2);

    dest.merge(&src);
    assert!(dest.find_dict(a).is_some());
    assert_eq!(dest.find_int(b), Some(2));
}

#[test]
fn test_merge_ignores_non_dicts() {
    let mut dest = Variant::Int(1);
    let mut src = Variant::dict_with_capacity(1);
    src.as_dict_mut()
        .unwrap()
        .add_int(Quark::new(b"ignored"), 2);

    dest.merge(&src);
    assert_eq!(dest, Variant::Int(1));

    let mut dict_dest = Variant::dict_with_capacity(0);
    dict_dest.merge(&Variant::Int(1));
    assert!(dict_dest.as_dict().unwrap().is_empty());
}

#[test]
fn test_serialization_order_ignores_storage_order() {
    // every insertion order of the same entries serializes identically
    let keys = [b"b".as_slice(), b"a".as_slice(), b"c".as_slice()];
    let mut first: Option<Vec<u8>> = None;
    for rotation in 0..keys.len() {
        let mut dict = Dict::new();
        for offset in 0..keys.len() {
            let key = keys[(rotation + offset) % keys.len()];
            dict.add_int(Quark::new(key), 1);
        }
        let bytes = encode(&Variant::from(dict)).unwrap();
        assert_eq!(bytes, b"d1:ai1e1:bi1e1:ci1ee");
        match &first {
            Some(prev) => assert_eq!(prev, &bytes),
            None => first = Some(bytes),
        }
    }
}

#[test]
fn test_duplicate_keys_serialize_in_storage_order() {
    let key = Quark::new(b"k");
    let mut dict = Dict::new();
    dict.add_int(key, 1);
    dict.add_int(key, 2);
    assert_eq!(encode(&Variant::from(dict)).unwrap(), b"d1:ki1e1:ki2ee");
}

#[test]
fn test_deep_tree_drops_without_recursing() {
    let mut value = Variant::List(Vec::new());
    for _ in 0..1_000_000 {
        value = Variant::List(vec![value]);
    }
    drop(value);
}
