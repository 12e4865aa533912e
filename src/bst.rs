/// Ordered map implemented as a plain (unbalanced) binary search tree.
///
/// General guide to implementation:
///
/// [`OrderedMap`] owns an optional root `Node`, each node owns its children outright,
/// and every node caches the size of the subtree rooted at it, so [`OrderedMap::size`] is O(1).
///
/// Insertion, lookup and deletion walk down from the root with a loop rather than recursion,
/// and dropping the map frees nodes with an explicit stack, so a degenerate tree ( sorted input )
/// cannot exhaust the call stack.
///
/// A node with two children is deleted by moving its in-order predecessor's key and value into it,
/// then splicing the predecessor out of the left subtree.
pub struct OrderedMap<K, V> {
    pub(crate) root: Link<K, V>,
}
impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        dispose(self.root.take());
    }
}
impl<K, V> OrderedMap<K, V> {
    /// Returns a new, empty map.
    #[must_use]
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Clear the map.
    pub fn clear(&mut self) {
        dispose(self.root.take());
    }

    /// Get number of key-value pairs in the map.
    #[must_use]
    pub fn size(&self) -> usize {
        Node::size_of(&self.root)
    }

    /// Get number of key-value pairs in the map, same as [`OrderedMap::size`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Is the map empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest path from the root, 0 for an empty map.
    ///
    /// Equals [`OrderedMap::size`] when keys were inserted in sorted order.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut result = 0;
        let mut stk: Vec<(&Node<K, V>, usize)> = Vec::new();
        stk.extend(self.root.as_deref().map(|n| (n, 1)));
        while let Some((node, depth)) = stk.pop() {
            result = result.max(depth);
            stk.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stk.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        result
    }

    /// Insert key-value pair into map, or if key is already in map, replaces value and returns old value.
    ///
    /// A replaced value keeps its node, so the shape of the tree is unchanged.
    pub fn put(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        if let Some(slot) = self.get_mut(&key) {
            trace!("put: replace value");
            return Some(std::mem::replace(slot, value));
        }
        // Key is new, so every node on the search path gains one descendant.
        let mut link = &mut self.root;
        while let Some(node) = link {
            node.size += 1;
            link = if key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Node::new(key, value));
        trace!(size = self.size(), "put: new node");
        None
    }

    /// Same as [`OrderedMap::put`].
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        self.put(key, value)
    }

    /// Does the map have an entry for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Get reference to the value corresponding to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|n| &n.value)
    }

    /// Get references to the corresponding key and value.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|n| (&n.key, &n.value))
    }

    /// Get a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Greater => cur = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Get references to first ( smallest ) key and value.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Gets references to last ( largest ) key and value.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root.as_deref().map(|n| {
            let max = n.find_max();
            (&max.key, &max.value)
        })
    }

    /// Remove key-value pair from map, returning just the value.
    /// Does nothing if the key is not present.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_k, v)| v)
    }

    /// Same as [`OrderedMap::delete`].
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.delete(key)
    }

    /// Remove key-value pair from map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        // Sizes are decremented on the way down, so the key must be known to be present.
        if !self.contains_key(key) {
            return None;
        }
        let mut link = &mut self.root;
        loop {
            let ord = match link.as_deref() {
                Some(node) => key.cmp(node.key.borrow()),
                None => return None,
            };
            if ord == Ordering::Equal {
                break;
            }
            if let Some(node) = link {
                node.size -= 1;
                link = if ord == Ordering::Less {
                    &mut node.left
                } else {
                    &mut node.right
                };
            } else {
                return None;
            }
        }
        Node::unlink(link)
    }

    /// Check the ordering and subtree size invariants.
    pub fn validate(&self) -> Result<(), InvariantError>
    where
        K: Ord,
    {
        let mut stk: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stk.pop() {
            let expected = 1 + Node::size_of(&node.left) + Node::size_of(&node.right);
            if node.size != expected {
                return Err(InvariantError::SizeMismatch {
                    expected,
                    found: node.size,
                });
            }
            stk.extend(node.left.as_deref());
            stk.extend(node.right.as_deref());
        }
        let mut prev: Option<&K> = None;
        for (position, (k, _v)) in self.iter().enumerate() {
            if prev.is_some_and(|p| p >= k) {
                return Err(InvariantError::Unordered { position });
            }
            prev = Some(k);
        }
        Ok(())
    }

    /// Get iterator of references to key-value pairs, in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.size())
    }

    /// Get iterator of mutable references to key-value pairs, in ascending key order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let len = self.size();
        IterMut::new(self.root.as_deref_mut(), len)
    }

    /// Get iterator of references to keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Get iterator of references to values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Get iterator that visits key-value pairs in preorder ( node, left subtree, right subtree ).
    ///
    /// Inserting the pairs in this order into an empty map rebuilds the same tree.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_, K, V> {
        Preorder::new(self.root.as_deref())
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }
} // End impl OrderedMap

impl<K, V> OrderedMap<K, V>
where
    V: fmt::Display,
{
    /// Write the values in preorder, each followed by a space, then a line break.
    pub fn write_preorder<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for (_k, v) in self.preorder() {
            write!(out, "{v} ")?;
        }
        writeln!(out)
    }

    /// Print the values in preorder to stdout, see [`OrderedMap::write_preorder`].
    pub fn print_preorder(&self) -> io::Result<()> {
        self.write_preorder(&mut io::stdout().lock())
    }
}

use std::hash::{Hash, Hasher};
impl<K: Hash, V: Hash> Hash for OrderedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for elt in self {
            elt.hash(state);
        }
    }
}
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &OrderedMap<K, V>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}
impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Convert `OrderedMap` to [`IntoIter`].
    fn into_iter(mut self) -> IntoIter<K, V> {
        let len = self.len();
        IntoIter::new(self.root.take(), len)
    }
}
impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
impl<'a, K, V> IntoIterator for &'a mut OrderedMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
impl<K, V> Clone for OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Clone has the same shape as the original.
    fn clone(&self) -> OrderedMap<K, V> {
        let mut map = OrderedMap::new();
        for (k, v) in self.preorder() {
            map.put(k.clone(), v.clone());
        }
        map
    }
}
impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> OrderedMap<K, V> {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.put(k, v);
        }
        map
    }
}
impl<K, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V>
where
    K: Ord,
{
    fn from(arr: [(K, V); N]) -> OrderedMap<K, V> {
        let mut map = OrderedMap::new();
        for (k, v) in arr {
            map.put(k, v);
        }
        map
    }
}
impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}
impl<K, Q, V> std::ops::Index<&Q> for OrderedMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// Panics if the key is not present in the `OrderedMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}
impl<K: Debug, V: Debug> Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(feature = "serde")]
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize,
};

/// Entries are written in preorder, so deserializing rebuilds the same tree shape.
#[cfg(feature = "serde")]
impl<K, V> Serialize for OrderedMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.preorder() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V> {
    marker: PhantomData<fn() -> OrderedMap<K, V>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("OrderedMap")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map = OrderedMap::new();
        while let Some((k, v)) = access.next_entry()? {
            map.put(k, v);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}

use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    fmt::Debug,
    io,
};

#[cfg(feature = "serde")]
use std::marker::PhantomData;

use crate::error::InvariantError;
use crate::iter::{IntoIter, Iter, IterMut, Keys, Preorder, Values};
use crate::log::trace;

/// Optional child ( or root ).
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    /// Number of nodes in the subtree rooted here, including this one.
    pub(crate) size: usize,
}
impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
            size: 1,
        })
    }

    fn size_of(link: &Link<K, V>) -> usize {
        link.as_ref().map_or(0, |n| n.size)
    }

    /// Descend right children to the node with the largest key in this subtree.
    fn find_max(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        node
    }

    /// Detach the node with the largest key from the non-empty subtree at link,
    /// putting its left child ( if any ) in its place.
    /// Sizes of the nodes passed on the way down are decremented.
    fn take_max(mut link: &mut Link<K, V>) -> Option<Box<Self>> {
        loop {
            let descend = link.as_deref().is_some_and(|n| n.right.is_some());
            if !descend {
                break;
            }
            if let Some(node) = link {
                node.size -= 1;
                link = &mut node.right;
            }
        }
        let mut max = link.take()?;
        *link = max.left.take();
        Some(max)
    }

    /// Remove the node at link from the tree, returning its key and value.
    fn unlink(link: &mut Link<K, V>) -> Option<(K, V)> {
        let node = link.as_mut()?;
        if node.left.is_some() && node.right.is_some() {
            node.size -= 1;
            let pred = Self::take_max(&mut node.left)?;
            trace!(size = node.size, "delete: promote predecessor");
            let Node { key, value, .. } = *pred;
            let old_key = std::mem::replace(&mut node.key, key);
            let old_value = std::mem::replace(&mut node.value, value);
            return Some((old_key, old_value));
        }
        let mut node = link.take()?;
        *link = node.left.take().or_else(|| node.right.take());
        trace!(leaf = link.is_none(), "delete: splice out node");
        let Node { key, value, .. } = *node;
        Some((key, value))
    }
}

/// Free a subtree without recursion.
pub(crate) fn dispose<K, V>(link: Link<K, V>) {
    let mut stk: Vec<Box<Node<K, V>>> = link.into_iter().collect();
    while let Some(mut node) = stk.pop() {
        stk.extend(node.left.take());
        stk.extend(node.right.take());
    }
}
