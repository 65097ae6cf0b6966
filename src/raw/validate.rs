use core::cmp::Ordering;

use super::node::{Node, is_left_red, is_red};
use crate::Violation;

/// Checks every structural invariant of the tree rooted at `root`.
///
/// Verifies the root is black, no red link leans right, no two red links are consecutive,
/// every root-to-leaf path crosses the same number of black links, keys are strictly
/// ascending in order and every subtree size is consistent.
pub(crate) fn validate<K: Ord, V>(root: Option<&Node<K, V>>) -> Result<(), Violation> {
    let Some(root) = root else {
        return Ok(());
    };
    if root.is_red() {
        return Err(Violation::RedRoot);
    }

    // The leftmost spine fixes the black height every other path must match.
    let mut black_height = 0;
    let mut current = Some(root);
    while let Some(node) = current {
        if !node.is_red() {
            black_height += 1;
        }
        current = node.left.as_deref();
    }

    validate_node(root, None, None, 0, black_height).map(|_| ())
}

/// Validates the subtree at `node`, whose keys must lie strictly between `lo` and `hi`.
///
/// `seen` counts the black links above this node and `expected` is the black height every
/// path must reach. Returns the subtree size.
fn validate_node<K: Ord, V>(
    node: &Node<K, V>,
    lo: Option<&K>,
    hi: Option<&K>,
    seen: usize,
    expected: usize,
) -> Result<usize, Violation> {
    if lo.is_some_and(|lo| lo.cmp(&node.key) != Ordering::Less)
        || hi.is_some_and(|hi| hi.cmp(&node.key) != Ordering::Greater)
    {
        return Err(Violation::Unordered);
    }
    if is_red(&node.right) {
        return Err(Violation::RedRightLink);
    }
    if is_red(&node.left) && is_left_red(&node.left) {
        return Err(Violation::ConsecutiveReds);
    }

    let seen = if node.is_red() { seen } else { seen + 1 };
    let left = match node.left.as_deref() {
        Some(left) => validate_node(left, lo, Some(&node.key), seen, expected)?,
        None => check_leaf(seen, expected)?,
    };
    let right = match node.right.as_deref() {
        Some(right) => validate_node(right, Some(&node.key), hi, seen, expected)?,
        None => check_leaf(seen, expected)?,
    };

    let actual = 1 + left + right;
    if node.size != actual {
        return Err(Violation::SizeMismatch {
            recorded: node.size,
            actual,
        });
    }
    Ok(actual)
}

/// An absent child closes a path, which must have crossed exactly `expected` black links.
fn check_leaf(seen: usize, expected: usize) -> Result<usize, Violation> {
    if seen == expected {
        Ok(0)
    } else {
        Err(Violation::UnbalancedBlacks { expected, found: seen })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::raw::node::{Color, Link};

    fn node(key: i32, color: Color, left: Link<i32, ()>, right: Link<i32, ()>) -> Link<i32, ()> {
        let mut node = Node::new(key, ());
        node.color = color;
        node.left = left;
        node.right = right;
        node.update_size();
        Some(node)
    }

    fn leaf(key: i32, color: Color) -> Link<i32, ()> {
        node(key, color, None, None)
    }

    #[test]
    fn empty_tree_is_valid() {
        assert_eq!(validate::<i32, ()>(None), Ok(()));
    }

    #[test]
    fn three_node_is_valid() {
        let root = node(2, Color::Black, leaf(1, Color::Red), None);
        assert_eq!(validate(root.as_deref()), Ok(()));
    }

    #[test]
    fn red_root_is_rejected() {
        let root = leaf(1, Color::Red);
        assert_eq!(validate(root.as_deref()), Err(Violation::RedRoot));
    }

    #[test]
    fn right_leaning_red_is_rejected() {
        let root = node(1, Color::Black, None, leaf(2, Color::Red));
        assert_eq!(validate(root.as_deref()), Err(Violation::RedRightLink));
    }

    #[test]
    fn consecutive_reds_are_rejected() {
        let root = node(3, Color::Black, node(2, Color::Red, leaf(1, Color::Red), None), None);
        assert_eq!(validate(root.as_deref()), Err(Violation::ConsecutiveReds));
    }

    #[test]
    fn black_imbalance_is_rejected() {
        let root = node(2, Color::Black, leaf(1, Color::Black), None);
        assert_eq!(validate(root.as_deref()), Err(Violation::UnbalancedBlacks { expected: 2, found: 1 }));
    }

    #[test]
    fn misordered_keys_are_rejected() {
        let root = node(2, Color::Black, leaf(3, Color::Black), leaf(1, Color::Black));
        assert_eq!(validate(root.as_deref()), Err(Violation::Unordered));
    }

    #[test]
    fn stale_size_is_rejected() {
        let mut root = node(2, Color::Black, leaf(1, Color::Black), leaf(3, Color::Black));
        root.as_deref_mut().unwrap().size = 7;
        assert_eq!(
            validate(root.as_deref()),
            Err(Violation::SizeMismatch {
                recorded: 7,
                actual: 3
            })
        );
    }
}
