use alloc::boxed::Box;

/// The color of the link from a node's parent to the node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub(crate) const fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// An exclusively owned child slot. `None` is treated as a black leaf of size zero.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    // The number of nodes in the subtree rooted here, including this one.
    pub(crate) size: usize,
}

impl<K, V> Node<K, V> {
    /// Creates a new red leaf. Every insertion starts as a red link.
    pub(crate) fn new(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
            size: 1,
        })
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Recalculates `size` from the children.
    #[inline]
    pub(crate) fn update_size(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
    }

    /// Flips the color of this node and both of its children.
    ///
    /// Splits a temporary 4-node on the way up, or merges three 2-nodes into a 4-node on the
    /// way down. Shape and sizes are unchanged.
    pub(crate) fn flip_colors(&mut self) {
        self.color = self.color.flipped();
        if let Some(left) = self.left.as_deref_mut() {
            left.color = left.color.flipped();
        }
        if let Some(right) = self.right.as_deref_mut() {
            right.color = right.color.flipped();
        }
    }

    /// Consumes the node, returning its entry. Children, if any, are dropped.
    pub(crate) fn into_entry(self: Box<Self>) -> (K, V) {
        let Node { key, value, .. } = *self;
        (key, value)
    }
}

#[inline]
pub(crate) fn is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_deref().is_some_and(Node::is_red)
}

/// Returns true if `link` and its left child are both present and the child is red.
#[inline]
pub(crate) fn is_left_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_deref().is_some_and(|node| is_red(&node.left))
}

#[inline]
pub(crate) fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_deref().map_or(0, |node| node.size)
}

/// Turns a right-leaning red link into a left-leaning one.
///
/// # Panics
///
/// Panics if `h` has no right child.
pub(crate) fn rotate_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = h.right.take().expect("`rotate_left()` - right link is absent!");
    debug_assert!(x.is_red(), "`rotate_left()` - rotating a black link");
    h.right = x.left.take();
    x.color = h.color;
    h.color = Color::Red;
    x.size = h.size;
    h.update_size();
    x.left = Some(h);
    x
}

/// Turns a left-leaning red link into a right-leaning one.
///
/// # Panics
///
/// Panics if `h` has no left child.
pub(crate) fn rotate_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = h.left.take().expect("`rotate_right()` - left link is absent!");
    debug_assert!(x.is_red(), "`rotate_right()` - rotating a black link");
    h.left = x.right.take();
    x.color = h.color;
    h.color = Color::Red;
    x.size = h.size;
    h.update_size();
    x.right = Some(h);
    x
}

/// Restores the local left-leaning invariants at `h` and recomputes its size.
///
/// Shared by insertion and deletion on the way back up the search path.
pub(crate) fn fix_up<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(&h.right) {
        h = rotate_left(h);
    }
    if is_red(&h.left) && is_left_red(&h.left) {
        h = rotate_right(h);
    }
    if is_red(&h.left) && is_red(&h.right) {
        h.flip_colors();
    }
    h.update_size();
    h
}

/// Pushes a red link into the left subtree so a removal there cannot unbalance the tree.
///
/// Requires `h` to be red with two black children (or the temporarily red root).
pub(crate) fn move_red_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    h.flip_colors();
    if is_left_red(&h.right) {
        let right = h.right.take().expect("`move_red_left()` - right link is absent!");
        h.right = Some(rotate_right(right));
        h = rotate_left(h);
        h.flip_colors();
    }
    h
}

/// Pushes a red link into the right subtree so a removal there cannot unbalance the tree.
pub(crate) fn move_red_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    h.flip_colors();
    if is_left_red(&h.left) {
        h = rotate_right(h);
        h.flip_colors();
    }
    h
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    // A link is a single nullable pointer.
    assert_eq_size!(Link<u64, u64>, Box<Node<u64, u64>>);
    assert_eq_size!(Color, u8);

    fn black(key: i32, left: Link<i32, ()>, right: Link<i32, ()>) -> Link<i32, ()> {
        let mut node = Node::new(key, ());
        node.color = Color::Black;
        node.left = left;
        node.right = right;
        node.update_size();
        Some(node)
    }

    fn red(key: i32, left: Link<i32, ()>, right: Link<i32, ()>) -> Link<i32, ()> {
        let mut node = black(key, left, right).unwrap();
        node.color = Color::Red;
        Some(node)
    }

    #[test]
    fn absent_links_are_black_and_empty() {
        let link: Link<i32, ()> = None;
        assert!(!is_red(&link));
        assert!(!is_left_red(&link));
        assert_eq!(size(&link), 0);
    }

    #[test]
    fn rotate_left_moves_red_link_to_the_left() {
        let h = black(1, None, red(3, red(2, None, None), None)).unwrap();
        let x = rotate_left(h);

        assert_eq!(x.key, 3);
        assert_eq!(x.color, Color::Black);
        assert_eq!(x.size, 3);
        let left = x.left.as_deref().unwrap();
        assert_eq!(left.key, 1);
        assert_eq!(left.color, Color::Red);
        assert_eq!(left.size, 2);
        assert_eq!(left.right.as_deref().map(|n| n.key), Some(2));
        assert!(x.right.is_none());
    }

    #[test]
    fn rotate_right_moves_red_link_to_the_right() {
        let h = black(3, red(2, red(1, None, None), None), black(4, None, None)).unwrap();
        let x = rotate_right(h);

        assert_eq!(x.key, 2);
        assert_eq!(x.color, Color::Black);
        assert_eq!(x.size, 4);
        let right = x.right.as_deref().unwrap();
        assert_eq!(right.key, 3);
        assert_eq!(right.color, Color::Red);
        assert_eq!(right.size, 2);
        assert_eq!(x.left.as_deref().map(|n| n.key), Some(1));
    }

    #[test]
    fn flip_colors_splits_a_four_node() {
        let mut h = black(2, red(1, None, None), red(3, None, None)).unwrap();
        h.flip_colors();

        assert_eq!(h.color, Color::Red);
        assert!(!is_red(&h.left));
        assert!(!is_red(&h.right));
        assert_eq!(h.size, 3);
    }

    #[test]
    fn fix_up_resolves_a_right_leaning_four_node() {
        // 1 -> 2 -> 3 along red right links.
        let h = black(1, None, red(2, None, red(3, None, None))).unwrap();
        let h = fix_up(h);

        assert_eq!(h.key, 2);
        assert!(!is_red(&h.right));
        assert_eq!(h.size, 3);
    }

    #[test]
    #[should_panic(expected = "`rotate_left()` - right link is absent!")]
    fn rotate_left_without_right_child() {
        let _ = rotate_left(Node::new(1, ()));
    }
}
