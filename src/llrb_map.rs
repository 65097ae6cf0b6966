use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::ops::{Bound, Index};

use crate::raw::{self, RawLlrbMap};
use crate::{Error, Violation};

mod order_statistic;

pub use crate::Rank;

/// An ordered map based on a [left-leaning red-black tree].
///
/// Given a key type with a [total order], an ordered map stores its entries in key order.
/// That means that keys must be of a type that implements the [`Ord`] trait,
/// such that two keys can always be compared to determine their [`Ordering`].
/// No hashing is required.
///
/// Every node records the size of the subtree below it, so besides lookups and updates the
/// map answers order-statistic queries ([`rank`], [`select`]) and range queries
/// ([`range_len`], [`keys_in_range`]) in O(log n).
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `LlrbMap` that observed the logic error and not result in undefined behavior.
///
/// The map has no interior synchronization. Share it across threads behind a lock.
///
/// # Examples
///
/// ```
/// use lean_tree::LlrbMap;
///
/// let mut movie_reviews = LlrbMap::new();
///
/// // review some movies.
/// movie_reviews.insert("Office Space",       "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction",       "Masterpiece.");
/// movie_reviews.insert("The Godfather",      "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// // check for a specific one.
/// if !movie_reviews.contains_key("Les Miserables") {
///     println!("We've got {} reviews, but Les Miserables ain't one.",
///              movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove("The Blues Brothers").unwrap();
///
/// // look up the values associated with some keys.
/// let to_find = ["Up!", "Office Space"];
/// for movie in &to_find {
///     match movie_reviews.get(movie) {
///        Some(review) => println!("{movie}: {review}"),
///        None => println!("{movie} is unreviewed.")
///     }
/// }
///
/// // Look up the value for a key (will panic if the key is not found).
/// println!("Movie review: {}", movie_reviews["Office Space"]);
///
/// // the first review alphabetically.
/// assert_eq!(movie_reviews.min_key(), Ok(&"Office Space"));
/// ```
///
/// An `LlrbMap` with a known list of items can be initialized from an array:
///
/// ```
/// use lean_tree::LlrbMap;
///
/// let solar_distance = LlrbMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.keys(), [&"Earth", &"Mars", &"Mercury", &"Venus"]);
/// ```
///
/// # Background
///
/// A left-leaning red-black tree encodes a 2-3 tree as a binary search tree. A 3-node is a
/// black node with a red left child; red links never lean right and never appear twice in a
/// row, and every path from the root to an empty link crosses the same number of black links.
/// Together these bound the height by 2 log<sub>2</sub> n.
///
/// Only three local rewrites change the shape or colors of the tree: a left rotation, a right
/// rotation and a color flip. Insertion adds a red leaf and then applies them bottom-up to
/// split any temporary 4-node. Deletion first pushes a red link down the search path, so the
/// node finally removed is never a lone black link, then repairs bottom-up with the same
/// rewrites.
///
/// [left-leaning red-black tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`Ordering`]: core::cmp::Ordering
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
/// [`rank`]: LlrbMap::rank
/// [`select`]: LlrbMap::select
/// [`range_len`]: LlrbMap::range_len
/// [`keys_in_range`]: LlrbMap::keys_in_range
pub struct LlrbMap<K, V> {
    raw: RawLlrbMap<K, V>,
}

impl<K, V> LlrbMap<K, V> {
    /// Makes a new, empty `LlrbMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> LlrbMap<K, V> {
        LlrbMap { raw: RawLlrbMap::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// assert_eq!(a.len(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
        log::trace!("clear: len=0");
    }

    /// Returns the number of elements in the map.
    ///
    /// # Complexity
    ///
    /// O(1) - read from the root's subtree size.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the smallest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::{Error, LlrbMap};
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.min_key(), Err(Error::Empty));
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.min_key(), Ok(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn min_key(&self) -> Result<&K, Error> {
        self.raw.first_key_value().map(|(key, _)| key).ok_or(Error::Empty)
    }

    /// Returns the largest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::{Error, LlrbMap};
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.max_key(), Err(Error::Empty));
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.max_key(), Ok(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn max_key(&self) -> Result<&K, Error> {
        self.raw.last_key_value().map(|(key, _)| key).ok_or(Error::Empty)
    }

    /// Returns the first key-value pair in the map, or `None` if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Returns the last key-value pair in the map, or `None` if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.last_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    ///
    /// # Examples
    ///
    /// Draining elements in ascending order, while keeping a usable map each iteration.
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Ok((key, _val)) = map.pop_first() {
    ///     assert!(map.keys().iter().all(|k| **k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Result<(K, V), Error> {
        let entry = self.raw.pop_first().ok_or(Error::Empty)?;
        log::trace!("pop_first: len={}", self.len());
        Ok(entry)
    }

    /// Removes and returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::{Error, LlrbMap};
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.pop_last(), Ok((2, "b")));
    /// assert_eq!(map.pop_last(), Ok((1, "a")));
    /// assert_eq!(map.pop_last(), Err(Error::Empty));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Result<(K, V), Error> {
        let entry = self.raw.pop_last().ok_or(Error::Empty)?;
        log::trace!("pop_last: len={}", self.len());
        Ok(entry)
    }
}

impl<K: Ord, V> LlrbMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated in place, and the old
    /// value is returned. The key is not updated, and the shape of the tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let old = self.raw.insert(key, value);
        if old.is_some() {
            log::trace!("insert: updated existing key, len={}", self.len());
        } else {
            log::trace!("insert: added key, len={}", self.len());
        }
        old
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// Removing a key that is not in a non-empty map is not an error: the map is left
    /// untouched and `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::{Error, LlrbMap};
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.remove(&1), Err(Error::Empty));
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.remove(&1), Ok(Some("a")));
    /// assert_eq!(map.remove(&1), Ok(None));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Ok(self.remove_entry(key)?.map(|(_, value)| value))
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
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
    /// let mut map = LlrbMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.remove_entry(&1), Ok(Some((1, "a"))));
    /// assert_eq!(map.remove_entry(&1), Ok(None));
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<Option<(K, V)>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let entry = self.raw.remove_entry(key);
        if entry.is_some() {
            log::trace!("remove: len={}", self.len());
        }
        Ok(entry)
    }

    /// Returns all keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// assert_eq!(map.keys(), [&1, &2, &3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn keys(&self) -> Vec<&K> {
        self.raw
            .collect_range::<K>(Bound::Unbounded, Bound::Unbounded)
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }

    /// Checks every structural invariant of the underlying tree.
    ///
    /// This is a diagnostic hook: a map built only through this API always validates.
    /// It verifies key ordering, that the root is black, that red links lean left and never
    /// appear twice in a row, that every root-to-leaf path crosses the same number of black
    /// links, and that every subtree size is consistent.
    ///
    /// # Errors
    ///
    /// Returns the first [`Violation`] found.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_tree::LlrbMap;
    ///
    /// let map: LlrbMap<_, _> = (0..100).map(|i| (i, i * i)).collect();
    /// assert_eq!(map.validate(), Ok(()));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn validate(&self) -> Result<(), Violation> {
        raw::validate(self.raw.root()).inspect_err(|violation| {
            log::warn!("validate: {violation}");
        })
    }
}

impl<K: Clone, V: Clone> Clone for LlrbMap<K, V> {
    fn clone(&self) -> Self {
        LlrbMap { raw: self.raw.clone() }
    }
}

impl<K: Ord, V: PartialEq> PartialEq for LlrbMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.raw.collect_range::<K>(Bound::Unbounded, Bound::Unbounded)
                == other.raw.collect_range::<K>(Bound::Unbounded, Bound::Unbounded)
    }
}

impl<K: Ord, V: Eq> Eq for LlrbMap<K, V> {}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for LlrbMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.raw.collect_range::<K>(Bound::Unbounded, Bound::Unbounded))
            .finish()
    }
}

impl<K, V> Default for LlrbMap<K, V> {
    fn default() -> Self {
        LlrbMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for LlrbMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = LlrbMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for LlrbMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, Q, V> Index<&Q> for LlrbMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for LlrbMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}
