use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;
use core::ops::Bound;

use smallvec::SmallVec;

use super::node::{Color, Link, Node, fix_up, is_left_red, is_red, move_red_left, move_red_right, rotate_right, size};

/// Inline capacity of the traversal stack. An LLRB tree of height 64 holds more nodes than
/// fit in memory, so the stack never spills in practice.
const STACK_INLINE: usize = 64;

/// Stack of nodes still to be visited during an in-order walk.
type Stack<'a, K, V> = SmallVec<[&'a Node<K, V>; STACK_INLINE]>;

/// The core left-leaning red-black tree backing `LlrbMap`.
pub(crate) struct RawLlrbMap<K, V> {
    /// The root node, if the tree is non-empty. Black between public operations.
    root: Link<K, V>,
}

impl<K, V> RawLlrbMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { root: None }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) fn len(&self) -> usize {
        size(&self.root)
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.root = None;
    }

    /// Returns the root node, if any.
    pub(crate) fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Returns the entry with the smallest key.
    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry at position `rank` in sorted order.
    pub(crate) fn get_by_rank(&self, mut rank: usize) -> Option<(&K, &V)> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let left = size(&node.left);
            match rank.cmp(&left) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
                Ordering::Greater => {
                    rank -= left + 1;
                    current = node.right.as_deref();
                }
            }
        }
        None
    }

    /// Returns the entry at position `rank` in sorted order, with a mutable value.
    pub(crate) fn get_by_rank_mut(&mut self, mut rank: usize) -> Option<(&K, &mut V)> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            let left = size(&node.left);
            match rank.cmp(&left) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Equal => return Some((&node.key, &mut node.value)),
                Ordering::Greater => {
                    rank -= left + 1;
                    current = node.right.as_deref_mut();
                }
            }
        }
        None
    }

    /// Pops the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let mut root = self.root.take()?;
        if !is_red(&root.left) {
            root.color = Color::Red;
        }
        let (root, removed) = remove_min(root);
        self.set_root(root);
        Some(removed)
    }

    /// Pops the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let mut root = self.root.take()?;
        if !is_red(&root.left) {
            root.color = Color::Red;
        }
        let (root, removed) = remove_max(root);
        self.set_root(root);
        Some(removed)
    }

    /// Installs a new root after a mutation, forcing it black.
    fn set_root(&mut self, mut root: Link<K, V>) {
        if let Some(node) = root.as_deref_mut() {
            node.color = Color::Black;
        }
        self.root = root;
    }
}

impl<K: Ord, V> RawLlrbMap<K, V> {
    /// Finds the node holding `key`.
    fn search<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|node| &node.value)
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|node| (&node.key, &node.value))
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts a key-value pair, returning the previous value if the key was present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, old) = insert(self.root.take(), key, value);
        self.set_root(Some(root));
        old
    }

    /// Removes `key`, returning its entry. Absent keys leave the tree untouched.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // The top-down pass reshapes the tree before it knows whether the key exists.
        if !self.contains_key(key) {
            return None;
        }
        let mut root = self.root.take()?;
        if !is_red(&root.left) {
            root.color = Color::Red;
        }
        let (root, removed) = remove(root, key);
        self.set_root(root);
        Some(removed)
    }

    /// Returns the greatest key less than or equal to `key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(&node.key),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => {
                    best = Some(&node.key);
                    current = node.right.as_deref();
                }
            }
        }
        best
    }

    /// Returns the least key greater than or equal to `key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Less => {
                    best = Some(&node.key);
                    current = node.left.as_deref();
                }
            }
        }
        best
    }

    /// Returns the number of keys strictly less than `key`.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return rank + size(&node.left),
                Ordering::Greater => {
                    rank += 1 + size(&node.left);
                    current = node.right.as_deref();
                }
            }
        }
        rank
    }

    /// Returns the number of keys in `[lo, hi]`.
    pub(crate) fn range_len<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if lo > hi {
            return 0;
        }
        let len = self.rank(hi) - self.rank(lo);
        if self.contains_key(hi) { len + 1 } else { len }
    }

    /// Collects the entries within the given bounds in ascending key order.
    ///
    /// Only subtrees that may hold in-range keys are visited, and the walk stops at the first
    /// key beyond the upper bound.
    pub(crate) fn collect_range<Q>(&self, lo: Bound<&Q>, hi: Bound<&Q>) -> Vec<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut entries = Vec::new();
        if let (Bound::Included(l) | Bound::Excluded(l), Bound::Included(h) | Bound::Excluded(h)) = (lo, hi)
            && l > h
        {
            return entries;
        }

        let mut stack: Stack<'_, K, V> = SmallVec::new();
        push_left_spine(&mut stack, self.root.as_deref(), lo);
        while let Some(node) = stack.pop() {
            let beyond = match hi {
                Bound::Included(h) => h.cmp(node.key.borrow()) == Ordering::Less,
                Bound::Excluded(h) => h.cmp(node.key.borrow()) != Ordering::Greater,
                Bound::Unbounded => false,
            };
            if beyond {
                break;
            }
            entries.push((&node.key, &node.value));
            push_left_spine(&mut stack, node.right.as_deref(), lo);
        }
        entries
    }
}

/// Pushes the left spine of `current`, skipping right past keys below the lower bound.
fn push_left_spine<'a, K, V, Q>(stack: &mut Stack<'a, K, V>, mut current: Option<&'a Node<K, V>>, lo: Bound<&Q>)
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    while let Some(node) = current {
        let below = match lo {
            Bound::Included(l) => l.cmp(node.key.borrow()) == Ordering::Greater,
            Bound::Excluded(l) => l.cmp(node.key.borrow()) != Ordering::Less,
            Bound::Unbounded => false,
        };
        if below {
            current = node.right.as_deref();
        } else {
            stack.push(node);
            current = node.left.as_deref();
        }
    }
}

fn insert<K: Ord, V>(link: Link<K, V>, key: K, value: V) -> (Box<Node<K, V>>, Option<V>) {
    let Some(mut h) = link else {
        return (Node::new(key, value), None);
    };
    let old = match key.cmp(&h.key) {
        Ordering::Less => {
            let (left, old) = insert(h.left.take(), key, value);
            h.left = Some(left);
            old
        }
        Ordering::Greater => {
            let (right, old) = insert(h.right.take(), key, value);
            h.right = Some(right);
            old
        }
        Ordering::Equal => Some(mem::replace(&mut h.value, value)),
    };
    (fix_up(h), old)
}

/// Removes the smallest entry below `h`.
fn remove_min<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, (K, V)) {
    if h.left.is_none() {
        debug_assert!(h.right.is_none(), "`remove_min()` - leaf has a right child");
        return (None, h.into_entry());
    }
    if !is_red(&h.left) && !is_left_red(&h.left) {
        h = move_red_left(h);
    }
    let left = h.left.take().expect("`remove_min()` - left link is absent!");
    let (left, removed) = remove_min(left);
    h.left = left;
    (Some(fix_up(h)), removed)
}

/// Removes the largest entry below `h`.
fn remove_max<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, (K, V)) {
    if is_red(&h.left) {
        h = rotate_right(h);
    }
    if h.right.is_none() {
        debug_assert!(h.left.is_none(), "`remove_max()` - leaf has a left child");
        return (None, h.into_entry());
    }
    if !is_red(&h.right) && !is_left_red(&h.right) {
        h = move_red_right(h);
    }
    let right = h.right.take().expect("`remove_max()` - right link is absent!");
    let (right, removed) = remove_max(right);
    h.right = right;
    (Some(fix_up(h)), removed)
}

/// Removes `key`, which must be present below `h`.
fn remove<K, V, Q>(mut h: Box<Node<K, V>>, key: &Q) -> (Link<K, V>, (K, V))
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let removed = if key.cmp(h.key.borrow()) == Ordering::Less {
        if !is_red(&h.left) && !is_left_red(&h.left) {
            h = move_red_left(h);
        }
        let left = h.left.take().expect("`remove()` - key is absent from the tree!");
        let (left, removed) = remove(left, key);
        h.left = left;
        removed
    } else {
        if is_red(&h.left) {
            h = rotate_right(h);
        }
        if key.cmp(h.key.borrow()) == Ordering::Equal && h.right.is_none() {
            return (None, h.into_entry());
        }
        if !is_red(&h.right) && !is_left_red(&h.right) {
            h = move_red_right(h);
        }
        let right = h.right.take().expect("`remove()` - key is absent from the tree!");
        if key.cmp(h.key.borrow()) == Ordering::Equal {
            // Replace this entry with its in-order successor.
            let (right, (key, value)) = remove_min(right);
            h.right = right;
            (mem::replace(&mut h.key, key), mem::replace(&mut h.value, value))
        } else {
            let (right, removed) = remove(right, key);
            h.right = right;
            removed
        }
    };
    (Some(fix_up(h)), removed)
}

impl<K: Clone, V: Clone> Clone for RawLlrbMap<K, V> {
    fn clone(&self) -> Self {
        Self { root: self.root.clone() }
    }
}
