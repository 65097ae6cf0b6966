/// A zero-based rank into the sorted order of a map.
///
/// Indexing an [`LlrbMap`](crate::LlrbMap) by `Rank` selects the value whose key has exactly
/// `rank` smaller keys.
///
/// # Examples
///
/// ```
/// use lean_tree::{LlrbMap, Rank};
///
/// let mut map = LlrbMap::new();
/// map.insert("a", 10);
/// map.insert("b", 20);
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
