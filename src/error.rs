use core::fmt;

/// The broad category of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// An argument was outside the range the operation accepts. Raised before any mutation.
    Argument,
    /// The operation requires a non-empty map.
    Empty,
}

/// An error returned by an [`LlrbMap`](crate::LlrbMap) operation.
///
/// A lookup whose answer is legitimately "no such key" (such as
/// [`floor`](crate::LlrbMap::floor)) returns `Ok(None)` rather than an error.
///
/// # Examples
///
/// ```
/// use lean_tree::{Error, ErrorKind, LlrbMap};
///
/// let mut map: LlrbMap<i32, &str> = LlrbMap::new();
/// assert_eq!(map.pop_first(), Err(Error::Empty));
///
/// map.insert(1, "a");
/// let err = map.select(3).unwrap_err();
/// assert_eq!(err, Error::RankOutOfBounds { rank: 3, len: 1 });
/// assert_eq!(err.kind(), ErrorKind::Argument);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// The map holds no entries.
    Empty,
    /// A rank was not in `0..len`.
    RankOutOfBounds {
        /// The requested rank.
        rank: usize,
        /// The number of entries in the map.
        len: usize,
    },
}

impl Error {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Empty => ErrorKind::Empty,
            Error::RankOutOfBounds { .. } => ErrorKind::Argument,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => f.write_str("the map is empty"),
            Error::RankOutOfBounds { rank, len } => write!(f, "rank {rank} is out of bounds for length {len}"),
        }
    }
}

impl core::error::Error for Error {}

/// A structural invariant found broken by [`LlrbMap::validate`](crate::LlrbMap::validate).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Violation {
    /// The root link is red.
    RedRoot,
    /// A node has a red right child.
    RedRightLink,
    /// A red node has a red left child.
    ConsecutiveReds,
    /// Two root-to-leaf paths cross different numbers of black links.
    UnbalancedBlacks {
        /// Black links along the leftmost spine.
        expected: usize,
        /// Black links along the offending path.
        found: usize,
    },
    /// A key is out of order relative to an ancestor.
    Unordered,
    /// A node's stored subtree size disagrees with its children.
    SizeMismatch {
        /// The size stored in the node.
        recorded: usize,
        /// The size computed from the children.
        actual: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RedRoot => f.write_str("root link is red"),
            Violation::RedRightLink => f.write_str("red link leans right"),
            Violation::ConsecutiveReds => f.write_str("two consecutive red links"),
            Violation::UnbalancedBlacks { expected, found } => {
                write!(f, "path crosses {found} black links, expected {expected}")
            }
            Violation::Unordered => f.write_str("keys are out of order"),
            Violation::SizeMismatch { recorded, actual } => {
                write!(f, "subtree size is {recorded}, counted {actual}")
            }
        }
    }
}

impl core::error::Error for Violation {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn error_kinds() {
        assert_eq!(Error::Empty.kind(), ErrorKind::Empty);
        assert_eq!(Error::RankOutOfBounds { rank: 1, len: 0 }.kind(), ErrorKind::Argument);
    }

    #[test]
    fn display_messages() {
        assert_eq!(Error::Empty.to_string(), "the map is empty");
        assert_eq!(
            Error::RankOutOfBounds { rank: 9, len: 3 }.to_string(),
            "rank 9 is out of bounds for length 3"
        );
        assert_eq!(
            Violation::UnbalancedBlacks { expected: 3, found: 2 }.to_string(),
            "path crosses 2 black links, expected 3"
        );
    }
}
