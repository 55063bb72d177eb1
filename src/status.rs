use bitflags::bitflags;
use thiserror::Error;

use crate::Position;

bitflags! {
    /// Structural-corruption flags, computed on demand by
    /// [`ArenaList::status`](crate::ArenaList::status).
    ///
    /// Multiple faults can coexist, so the diagnostic is a set of named
    /// conditions rather than a single code. An empty set means the list
    /// passed self-validation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u32 {
        /// The element count reached or passed the capacity.
        const SIZE_OVERRUN = 1 << 0;
        /// The backing buffer is missing its sentinel cell or its length
        /// disagrees with the recorded capacity.
        const NO_BUFFER = 1 << 1;
        /// The free-chain head names the sentinel or an out-of-bounds cell.
        const BAD_FREE_HEAD = 1 << 2;
    }
}

impl Status {
    /// Human-readable descriptions of every fault present in this set,
    /// in bit order. Empty for a clean status.
    pub fn descriptions(self) -> impl Iterator<Item = &'static str> {
        [
            (Self::SIZE_OVERRUN, "list size reached or passed its capacity"),
            (Self::NO_BUFFER, "list buffer is missing or mis-sized"),
            (Self::BAD_FREE_HEAD, "first free cell position is invalid"),
        ]
        .into_iter()
        .filter_map(move |(flag, text)| self.contains(flag).then_some(text))
    }
}

/// The outcome of a failed list operation.
///
/// Every operation detects its own preconditions and reports a specific
/// kind; nothing is clamped, guessed, or retried. There is no shared error
/// state: each call communicates its own result.
///
/// # Example
/// ```rust
/// use arena_list::{ArenaList, ListError};
///
/// let mut list: ArenaList<i64> = ArenaList::with_capacity(4).unwrap();
/// assert_eq!(list.remove(2), Err(ListError::Empty));
/// assert_eq!(
///     list.insert(1, 9),
///     Err(ListError::OutOfRange { position: 9, capacity: 4 }),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// Self-validation reported the contained faults; the operation was
    /// aborted without touching the list.
    #[error("list failed self-validation: {0:?}")]
    Corrupt(Status),

    /// The free chain is exhausted: every non-sentinel cell is live.
    #[error("list is out of free cells")]
    OutOfSpace,

    /// The supplied physical position lies outside the buffer.
    #[error("position {position} is out of bounds for capacity {capacity}")]
    OutOfRange {
        /// The offending position.
        position: Position,
        /// The capacity it was checked against.
        capacity: u32,
    },

    /// Removal was requested on a list holding no elements.
    #[error("list is empty")]
    Empty,

    /// The addressed cell holds no live element: either it was already
    /// freed (a double-free or a stale position on the caller's side) or
    /// it is the sentinel, which never carries content.
    #[error("cell {0} does not hold a live element")]
    Stale(Position),

    /// Construction was asked for a pool too small to host the sentinel.
    #[error("capacity must be at least 1")]
    ZeroCapacity,
}

#[cfg(test)]
mod tests {
    use super::{ListError, Status};

    #[test]
    fn test_clean_status_has_no_descriptions() {
        assert_eq!(Status::empty().descriptions().count(), 0);
    }

    #[test]
    fn test_descriptions_follow_the_set_bits() {
        let sut = Status::SIZE_OVERRUN | Status::BAD_FREE_HEAD;
        let texts: Vec<_> = sut.descriptions().collect();
        assert_eq!(texts.len(), 2);
        assert!(texts[0].contains("capacity"));
        assert!(texts[1].contains("free"));
    }

    #[test]
    fn test_error_messages_name_the_offending_values() {
        let message = ListError::OutOfRange {
            position: 12,
            capacity: 8,
        }
        .to_string();
        assert!(message.contains("12"));
        assert!(message.contains("8"));

        assert!(ListError::Stale(3).to_string().contains("3"));
    }
}
