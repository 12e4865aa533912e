use crate::*;
use proptest::prelude::*;

fn farm() -> OrderedMap<i32, &'static str> {
    let mut m = OrderedMap::new();
    m.put(4, "horse");
    m.put(7, "goat");
    m.put(1, "sheep");
    m.put(9, "cow");
    m.put(2, "donkey");
    m
}

fn preorder_keys<K: Copy, V>(m: &OrderedMap<K, V>) -> Vec<K> {
    m.preorder().map(|(k, _)| *k).collect()
}

fn preorder_text<K, V: std::fmt::Display>(m: &OrderedMap<K, V>) -> String {
    let mut out = Vec::new();
    m.write_preorder(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn farm_test() {
    let mut m = farm();
    assert_eq!(m.get(&4), Some(&"horse"));
    assert_eq!(m.size(), 5);
    assert_eq!(preorder_text(&m), "horse sheep donkey goat cow \n");
    assert_eq!(
        m.iter().collect::<Vec<_>>(),
        [
            (&1, &"sheep"),
            (&2, &"donkey"),
            (&4, &"horse"),
            (&7, &"goat"),
            (&9, &"cow")
        ]
    );

    assert_eq!(m.delete(&1), Some("sheep"));
    assert_eq!(preorder_text(&m), "horse donkey goat cow \n");
    assert_eq!(
        m.iter().collect::<Vec<_>>(),
        [(&2, &"donkey"), (&4, &"horse"), (&7, &"goat"), (&9, &"cow")]
    );

    assert_eq!(m.delete(&9), Some("cow"));
    assert_eq!(
        m.iter().collect::<Vec<_>>(),
        [(&2, &"donkey"), (&4, &"horse"), (&7, &"goat")]
    );
    assert_eq!(m.size(), 3);
    m.validate().unwrap();
}

#[test]
fn put_replaces_value_test() {
    let mut m = farm();
    let shape = preorder_keys(&m);
    assert_eq!(m.put(7, "llama"), Some("goat"));
    assert_eq!(m.get(&7), Some(&"llama"));
    assert_eq!(m.size(), 5);
    assert_eq!(preorder_keys(&m), shape);
    m.validate().unwrap();
}

#[test]
fn delete_missing_test() {
    let mut m = farm();
    let shape = preorder_keys(&m);
    assert_eq!(m.delete(&3), None);
    assert_eq!(m.delete(&100), None);
    assert_eq!(m.size(), 5);
    assert_eq!(preorder_keys(&m), shape);

    let mut e = OrderedMap::<i32, i32>::new();
    assert_eq!(e.delete(&1), None);
    assert!(e.is_empty());

    for k in [4, 7, 1, 9, 2, 4, 3] {
        m.delete(&k);
        assert_eq!(m.get(&k), None);
        m.validate().unwrap();
    }
    assert!(m.is_empty());
}

#[test]
fn two_child_delete_test() {
    let mut m = OrderedMap::new();
    for k in [50, 30, 70, 20, 40, 35, 45, 60, 80] {
        m.put(k, k * 10);
    }
    assert_eq!(m.remove_entry(&50), Some((50, 500)));
    // 45, the largest key left of 50, now sits at the root.
    assert_eq!(preorder_keys(&m), [45, 30, 20, 40, 35, 70, 60, 80]);
    assert_eq!(m.get(&45), Some(&450));
    assert_eq!(m.size(), 8);
    m.validate().unwrap();

    assert_eq!(m.delete(&30), Some(300));
    assert_eq!(preorder_keys(&m), [45, 20, 40, 35, 70, 60, 80]);
    m.validate().unwrap();
}

#[test]
fn predecessor_with_left_child_test() {
    let mut m = OrderedMap::new();
    for k in [10, 5, 15, 3, 7, 6] {
        m.put(k, ());
    }
    m.delete(&10);
    // 7 moves up, its left child 6 takes its old slot.
    assert_eq!(preorder_keys(&m), [7, 5, 3, 6, 15]);
    assert_eq!(m.size(), 5);
    m.validate().unwrap();
}

#[test]
fn sorted_insert_test() {
    let n = 10000;
    let mut m = OrderedMap::<usize, usize>::new();
    for i in 0..n {
        m.put(i, i);
    }
    assert_eq!(m.size(), n);
    assert_eq!(m.height(), n);
    m.validate().unwrap();
    for (k, v) in m.iter() {
        assert!(k == v);
    }
    assert_eq!(m.iter().rev().count(), n);
    for i in (0..n).rev() {
        if i % 2 == 0 {
            assert_eq!(m.delete(&i), Some(i));
        }
    }
    assert_eq!(m.size(), n / 2);
    m.validate().unwrap();
}

#[test]
fn deep_tree_drop_test() {
    let n = 100000;
    let mut m = OrderedMap::<usize, ()>::new();
    // Build a long left-leaning chain without the quadratic cost of put.
    m.root = (0..n).fold(None, |left, key| {
        Some(Box::new(bst::Node {
            key,
            value: (),
            left,
            right: None,
            size: key + 1,
        }))
    });
    assert_eq!(m.size(), n);
    assert_eq!(m.first_key_value(), Some((&0, &())));
    assert_eq!(m.last_key_value(), Some((&(n - 1), &())));
    m.validate().unwrap();
    let mut it = m.into_iter();
    assert_eq!(it.next(), Some((0, ())));
    assert_eq!(it.len(), n - 1);
}

#[test]
fn iter_both_ends_test() {
    let m: OrderedMap<usize, usize> = [5, 2, 8, 1, 3, 7, 9, 0, 4, 6]
        .into_iter()
        .map(|k| (k, k))
        .collect();
    let mut it = m.iter();
    assert_eq!(it.len(), 10);
    assert_eq!(it.next(), Some((&0, &0)));
    assert_eq!(it.next_back(), Some((&9, &9)));
    assert_eq!(it.next(), Some((&1, &1)));
    assert_eq!(it.next_back(), Some((&8, &8)));
    assert_eq!(it.len(), 6);
    assert_eq!(it.map(|(k, _)| *k).collect::<Vec<_>>(), [2, 3, 4, 5, 6, 7]);

    // Restart by creating a new iterator.
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
    assert_eq!(
        m.values().rev().copied().collect::<Vec<_>>(),
        (0..10).rev().collect::<Vec<_>>()
    );
    assert_eq!(OrderedMap::<u8, u8>::new().iter().next(), None);
}

#[test]
fn iter_mut_test() {
    let mut m = farm();
    for (k, v) in m.iter_mut() {
        if *k % 2 == 0 {
            *v = "even";
        }
    }
    assert_eq!(
        m.values().copied().collect::<Vec<_>>(),
        ["sheep", "even", "even", "goat", "cow"]
    );
    for (_k, v) in &mut m {
        *v = "x";
    }
    assert!(m.values().all(|v| *v == "x"));
}

#[test]
fn into_iter_test() {
    let m = farm();
    let v: Vec<_> = m.into_iter().collect();
    assert_eq!(
        v,
        [(1, "sheep"), (2, "donkey"), (4, "horse"), (7, "goat"), (9, "cow")]
    );

    let mut m = OrderedMap::new();
    for i in 0..100 {
        m.put(i.to_string(), vec![i]);
    }
    let mut it = m.into_iter();
    assert_eq!(it.len(), 100);
    assert_eq!(it.next(), Some(("0".to_string(), vec![0])));
    assert_eq!(it.len(), 99);
}

#[test]
fn lookup_test() {
    let mut m = OrderedMap::new();
    m.put("b".to_string(), 2);
    m.put("a".to_string(), 1);
    m.put("c".to_string(), 3);
    assert!(m.contains_key("a"));
    assert!(!m.contains_key("d"));
    assert_eq!(m.get_key_value("c"), Some((&"c".to_string(), &3)));
    *m.get_mut("b").unwrap() += 10;
    assert_eq!(m["b"], 12);
    assert_eq!(m.first_key_value(), Some((&"a".to_string(), &1)));
    assert_eq!(m.last_key_value(), Some((&"c".to_string(), &3)));
    m.clear();
    assert!(m.is_empty());
    assert_eq!(m.size(), 0);
    assert_eq!(m.height(), 0);
    assert_eq!(m.first_key_value(), None);
    assert_eq!(m.last_key_value(), None);
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_test() {
    let m = farm();
    let _v: &str = m[&3];
}

#[test]
fn validate_test() {
    let mut m = farm();
    m.validate().unwrap();

    m.root.as_mut().unwrap().size += 1;
    assert_eq!(
        m.validate(),
        Err(InvariantError::SizeMismatch {
            expected: 5,
            found: 6
        })
    );
    m.root.as_mut().unwrap().size -= 1;

    m.root.as_mut().unwrap().key = 100;
    let e = m.validate().unwrap_err();
    assert_eq!(e, InvariantError::Unordered { position: 3 });
    assert_eq!(e.to_string(), "key at in-order position 3 is out of order");
}

#[test]
fn trait_test() {
    let m = farm();
    let c = m.clone();
    assert_eq!(preorder_keys(&c), preorder_keys(&m));
    assert_eq!(c, m);
    assert_eq!(
        format!("{:?}", m),
        r#"{1: "sheep", 2: "donkey", 4: "horse", 7: "goat", 9: "cow"}"#
    );

    let mut e = OrderedMap::from([(2, 'b'), (1, 'a')]);
    e.extend([(3, 'c'), (1, 'z')]);
    assert_eq!(e.iter().collect::<Vec<_>>(), [(&1, &'z'), (&2, &'b'), (&3, &'c')]);
    assert_ne!(e, OrderedMap::from([(1, 'z'), (2, 'b')]));
    assert_eq!(OrderedMap::<i32, i32>::default().len(), 0);
}

#[cfg(feature = "serde")]
#[test]
fn serde_test() {
    let m = farm();
    let s = serde_json::to_string(&m).unwrap();
    assert_eq!(
        s,
        r#"{"4":"horse","1":"sheep","2":"donkey","7":"goat","9":"cow"}"#
    );
    let d: OrderedMap<i32, String> = serde_json::from_str(&s).unwrap();
    assert_eq!(preorder_keys(&d), preorder_keys(&m));
    assert_eq!(d.get(&9).map(String::as_str), Some("cow"));
}

#[derive(Debug, Clone)]
enum Op {
    Put(u8, u16),
    Delete(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
        any::<u8>().prop_map(Op::Delete),
    ]
}

proptest! {
    // Random puts and deletes agree with std BTreeMap.
    #[test]
    fn std_model_test(ops in prop::collection::vec(op(), 0..300)) {
        let mut m = OrderedMap::new();
        let mut s = std::collections::BTreeMap::new();
        for op in ops {
            match op {
                Op::Put(k, v) => {
                    prop_assert_eq!(m.put(k, v), s.insert(k, v));
                }
                Op::Delete(k) => {
                    prop_assert_eq!(m.delete(&k), s.remove(&k));
                }
            }
            prop_assert_eq!(m.size(), s.len());
            prop_assert!(m.validate().is_ok());
        }
        prop_assert!(m.iter().eq(s.iter()));
        prop_assert!(m.iter().rev().eq(s.iter().rev()));
        for k in 0..=u8::MAX {
            prop_assert_eq!(m.get(&k), s.get(&k));
        }
    }

    // Any insertion order yields the same ascending sequence.
    #[test]
    fn round_trip_test(keys in prop::collection::hash_set(any::<i32>(), 0..200)) {
        let m: OrderedMap<i32, i64> = keys.iter().map(|&k| (k, k as i64 * 3)).collect();
        let mut sorted: Vec<i32> = keys.into_iter().collect();
        sorted.sort_unstable();
        prop_assert_eq!(m.len(), sorted.len());
        for k in &sorted {
            prop_assert_eq!(m.get(k), Some(&(*k as i64 * 3)));
        }
        prop_assert_eq!(m.into_iter().map(|(k, _)| k).collect::<Vec<_>>(), sorted);
    }
}
