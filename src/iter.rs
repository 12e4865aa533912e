//! Iterators over [`OrderedMap`](crate::OrderedMap).
//!
//! In-order iteration keeps an explicit stack of pending nodes instead of recursing.
//! The forward stack holds the left spine below the next node to visit,
//! the backward stack holds the right spine below the next node from the end.

use crate::bst::{dispose, Link, Node};
use std::{fmt, iter::FusedIterator};

/// Iterator returned by [`OrderedMap::iter`](crate::OrderedMap::iter).
pub struct Iter<'a, K, V> {
    len: usize,
    fwd_stk: Vec<&'a Node<K, V>>,
    bck_stk: Vec<&'a Node<K, V>>,
}
impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut x = Self {
            len,
            fwd_stk: Vec::new(),
            bck_stk: Vec::new(),
        };
        x.push_left(root);
        x.push_right(root);
        x
    }

    fn push_left(&mut self, mut link: Option<&'a Node<K, V>>) {
        while let Some(node) = link {
            self.fwd_stk.push(node);
            link = node.left.as_deref();
        }
    }

    fn push_right(&mut self, mut link: Option<&'a Node<K, V>>) {
        while let Some(node) = link {
            self.bck_stk.push(node);
            link = node.right.as_deref();
        }
    }
}
impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.fwd_stk.pop()?;
        self.len -= 1;
        self.push_left(node.right.as_deref());
        Some((&node.key, &node.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}
impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {
    fn len(&self) -> usize {
        self.len
    }
}
impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.bck_stk.pop()?;
        self.len -= 1;
        self.push_right(node.left.as_deref());
        Some((&node.key, &node.value))
    }
}
impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}
impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            len: self.len,
            fwd_stk: self.fwd_stk.clone(),
            bck_stk: self.bck_stk.clone(),
        }
    }
}
impl<'a, K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// Pending node split into its parts, so the key, value and right subtree can be borrowed separately.
type StkMut<'a, K, V> = (&'a K, &'a mut V, Option<&'a mut Node<K, V>>);

/// Iterator returned by [`OrderedMap::iter_mut`](crate::OrderedMap::iter_mut).
pub struct IterMut<'a, K, V> {
    len: usize,
    stk: Vec<StkMut<'a, K, V>>,
}
impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(root: Option<&'a mut Node<K, V>>, len: usize) -> Self {
        let mut x = Self {
            len,
            stk: Vec::new(),
        };
        x.push_left(root);
        x
    }

    fn push_left(&mut self, mut link: Option<&'a mut Node<K, V>>) {
        while let Some(node) = link {
            let Node {
                key,
                value,
                left,
                right,
                ..
            } = node;
            self.stk.push((&*key, value, right.as_deref_mut()));
            link = left.as_deref_mut();
        }
    }
}
impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<Self::Item> {
        let (k, v, right) = self.stk.pop()?;
        self.len -= 1;
        self.push_left(right);
        Some((k, v))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}
impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {
    fn len(&self) -> usize {
        self.len
    }
}
impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// Consuming iterator of key-value pairs in ascending key order, from `OrderedMap::into_iter`.
pub struct IntoIter<K, V> {
    len: usize,
    stk: Vec<(K, V, Link<K, V>)>,
}
impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>, len: usize) -> Self {
        let mut x = Self {
            len,
            stk: Vec::new(),
        };
        x.push_left(root);
        x
    }

    fn push_left(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            let Node {
                key, value, right, ..
            } = *node;
            self.stk.push((key, value, right));
        }
    }
}
impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for (_k, _v, right) in self.stk.drain(..) {
            dispose(right);
        }
    }
}
impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<Self::Item> {
        let (k, v, right) = self.stk.pop()?;
        self.len -= 1;
        self.push_left(right);
        Some((k, v))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}
impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.len
    }
}
impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Iterator returned by [`OrderedMap::preorder`](crate::OrderedMap::preorder).
pub struct Preorder<'a, K, V> {
    stk: Vec<&'a Node<K, V>>,
}
impl<'a, K, V> Preorder<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        Self {
            stk: root.into_iter().collect(),
        }
    }
}
impl<'a, K, V> Iterator for Preorder<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stk.pop()?;
        // Right is pushed first so the left subtree is visited first.
        self.stk.extend(node.right.as_deref());
        self.stk.extend(node.left.as_deref());
        Some((&node.key, &node.value))
    }
}
impl<'a, K, V> FusedIterator for Preorder<'a, K, V> {}

/// Iterator returned by [`OrderedMap::keys`](crate::OrderedMap::keys).
#[derive(Clone)]
pub struct Keys<'a, K, V>(pub(crate) Iter<'a, K, V>);
impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(k, _)| k)
    }
}
impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {
    fn len(&self) -> usize {
        self.0.len()
    }
}
impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

/// Iterator returned by [`OrderedMap::values`](crate::OrderedMap::values).
#[derive(Clone)]
pub struct Values<'a, K, V>(pub(crate) Iter<'a, K, V>);
impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(_, v)| v)
    }
}
impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {
    fn len(&self) -> usize {
        self.0.len()
    }
}
impl<'a, K, V> FusedIterator for Values<'a, K, V> {}
