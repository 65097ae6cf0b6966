use alloc::vec::Vec;
use core::borrow::Borrow;
use core::ops::{Bound, Index, IndexMut};

use super::LlrbMap;
use crate::{Error, Rank};

impl<K, V> LlrbMap<K, V> {
    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// let (key, value) = map.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the key and a mutable reference to the value at position `rank`
    /// in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(10, "a");
    /// map.insert(5, "b");
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        self.raw.get_by_rank_mut(rank)
    }

    /// Returns the key with exactly `rank` smaller keys in the map.
    ///
    /// This is the inverse of [`rank`](LlrbMap::rank): for every `i` in `0..len`,
    /// `map.rank(map.select(i)?) == i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty, and [`Error::RankOutOfBounds`] if
    /// `rank >= len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::{Error, LlrbMap};
    ///
    /// let map = LlrbMap::from([('A', ()), ('C', ()), ('E', ())]);
    /// assert_eq!(map.select(0), Ok(&'A'));
    /// assert_eq!(map.select(2), Ok(&'E'));
    /// assert_eq!(map.select(3), Err(Error::RankOutOfBounds { rank: 3, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&K, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let len = self.len();
        self.raw
            .get_by_rank(rank)
            .map(|(key, _)| key)
            .ok_or(Error::RankOutOfBounds { rank, len })
    }
}

impl<K: Ord, V> LlrbMap<K, V> {
    /// Returns the number of keys in the map strictly less than `key`.
    ///
    /// `key` need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    ///
    /// assert_eq!(map.rank(&10), 0);
    /// assert_eq!(map.rank(&15), 1);
    /// assert_eq!(map.rank(&99), 2);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }

    /// Returns the greatest key less than or equal to `key`, or `Ok(None)` if every key in
    /// the map is greater.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(1, ()), (5, ()), (9, ())]);
    /// assert_eq!(map.floor(&5), Ok(Some(&5)));
    /// assert_eq!(map.floor(&7), Ok(Some(&5)));
    /// assert_eq!(map.floor(&0), Ok(None));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Result<Option<&K>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        Ok(self.raw.floor(key))
    }

    /// Returns the least key greater than or equal to `key`, or `Ok(None)` if every key in
    /// the map is smaller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(1, ()), (5, ()), (9, ())]);
    /// assert_eq!(map.ceiling(&5), Ok(Some(&5)));
    /// assert_eq!(map.ceiling(&6), Ok(Some(&9)));
    /// assert_eq!(map.ceiling(&10), Ok(None));
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Result<Option<&K>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        Ok(self.raw.ceiling(key))
    }

    /// Returns the number of keys in the closed range `[lo, hi]`.
    ///
    /// An inverted range (`lo > hi`) is empty rather than an error.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let map: LlrbMap<_, _> = (0..10).map(|i| (i * 10, ())).collect();
    /// assert_eq!(map.range_len(&15, &50), 4);
    /// assert_eq!(map.range_len(&50, &15), 0);
    /// ```
    #[must_use]
    pub fn range_len<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.range_len(lo, hi)
    }

    /// Returns the keys in the closed range `[lo, hi]` in ascending order.
    ///
    /// An inverted range (`lo > hi`) is empty rather than an error.
    ///
    /// # Complexity
    ///
    /// O(log n + m), where m is the number of keys returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let map: LlrbMap<_, _> = (0..10).map(|i| (i * 10, ())).collect();
    /// assert_eq!(map.keys_in_range(&15, &50), [&20, &30, &40, &50]);
    /// assert!(map.keys_in_range(&50, &15).is_empty());
    /// ```
    #[must_use]
    pub fn keys_in_range<Q>(&self, lo: &Q, hi: &Q) -> Vec<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw
            .collect_range(Bound::Included(lo), Bound::Included(hi))
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use lean_tree::LlrbMap;
/// use lean_tree::Rank;
///
/// let mut map = LlrbMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V> Index<Rank> for LlrbMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use lean_tree::LlrbMap;
/// use lean_tree::Rank;
///
/// let mut map = LlrbMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V> IndexMut<Rank> for LlrbMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
