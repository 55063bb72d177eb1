use std::fmt;

use tracing::Level;

use crate::cell::NONE;
use crate::{ArenaList, Poison, Position, Status};

/// The diagnostic view of one cell: occupancy plus both link offsets.
///
/// `None` stands for the null link (the free-chain terminator); ring links
/// are always `Some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Whether the cell holds a live element (the sentinel never does).
    pub occupied: bool,
    /// The forward link, ring or free chain depending on occupancy.
    pub next: Option<Position>,
    /// The backward link.
    pub prev: Option<Position>,
}

/// A read-only snapshot of the full internal state of an [`ArenaList`].
///
/// This is the stable surface consumers render from: the status mask, the
/// free-head offset, the counters, and one [`CellView`] per cell. The
/// `Display` implementation prints the classic structured report; callers
/// with other sinks can walk the fields themselves.
#[derive(Debug, Clone)]
pub struct DumpView {
    /// The self-diagnostic mask at snapshot time.
    pub status: Status,
    /// Head of the free chain, if any cell is vacant.
    pub free_head: Option<Position>,
    /// Live element count.
    pub size: u32,
    /// Fixed pool capacity.
    pub capacity: u32,
    /// One entry per cell, in physical order.
    pub cells: Vec<CellView>,
}

impl<T: Poison> ArenaList<T> {
    /// Takes a read-only snapshot of the list's internal state.
    ///
    /// Never mutates and tolerates a corrupt list: whatever the cells hold
    /// is reported as-is, alongside the [`status`](ArenaList::status) bits.
    ///
    /// # Example
    /// ```rust
    /// use arena_list::{ArenaList, SENTINEL};
    ///
    /// let mut list: ArenaList<i64> = ArenaList::with_capacity(4).unwrap();
    /// let at = list.insert(9, SENTINEL).unwrap();
    ///
    /// let view = list.view();
    /// assert!(view.status.is_empty());
    /// assert_eq!(view.size, 1);
    /// assert!(view.cells[at as usize].occupied);
    /// ```
    pub fn view(&self) -> DumpView {
        let link = |at: Position| if at == NONE { None } else { Some(at) };

        DumpView {
            status: self.status(),
            free_head: link(self.first_free),
            size: self.size,
            capacity: self.capacity,
            cells: self
                .buffer
                .iter()
                .map(|cell| CellView {
                    occupied: !cell.is_free(),
                    next: link(cell.next),
                    prev: link(cell.prev),
                })
                .collect(),
        }
    }

    /// Renders the full internal state to the log sink at the requested
    /// verbosity.
    ///
    /// Read-only and corruption-tolerant, like [`view`](ArenaList::view):
    /// a dirty list is reported, not refused.
    pub fn dump(&self, level: Level) {
        let view = self.view();
        if level == Level::ERROR {
            tracing::error!(target: "arena_list", "list dump\n{view}");
        } else if level == Level::WARN {
            tracing::warn!(target: "arena_list", "list dump\n{view}");
        } else if level == Level::INFO {
            tracing::info!(target: "arena_list", "list dump\n{view}");
        } else if level == Level::DEBUG {
            tracing::debug!(target: "arena_list", "list dump\n{view}");
        } else {
            tracing::trace!(target: "arena_list", "list dump\n{view}");
        }
    }
}

struct Link(Option<Position>);

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(at) => write!(f, "{at:5}"),
            None => write!(f, "    -"),
        }
    }
}

impl fmt::Display for DumpView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "status: {}",
            if self.status.is_empty() { "OK" } else { "CORRUPT" }
        )?;
        for description in self.status.descriptions() {
            writeln!(f, "    {description}")?;
        }

        writeln!(f, "first free = {}", Link(self.free_head))?;
        writeln!(f, "size = {}", self.size)?;
        writeln!(f, "capacity = {}", self.capacity)?;
        writeln!(f, "cells:")?;
        for (at, cell) in self.cells.iter().enumerate() {
            writeln!(
                f,
                "    [{at:5}] = {}, next [{}], prev [{}]",
                if cell.occupied { "VALUE " } else { "POISON" },
                Link(cell.next),
                Link(cell.prev),
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ArenaList, SENTINEL};

    #[test]
    fn test_view_reports_counters_links_and_occupancy() {
        let mut list: ArenaList<i64> = ArenaList::with_capacity(4).unwrap();
        let a = list.insert(1, SENTINEL).unwrap();
        let b = list.insert(2, a).unwrap();

        let sut = list.view();
        assert!(sut.status.is_empty());
        assert_eq!(sut.size, 2);
        assert_eq!(sut.capacity, 4);
        assert_eq!(sut.free_head, Some(3));
        assert_eq!(sut.cells.len(), 4);

        // Ring: sentinel -> a -> b -> sentinel.
        assert!(!sut.cells[SENTINEL as usize].occupied);
        assert_eq!(sut.cells[SENTINEL as usize].next, Some(a));
        assert_eq!(sut.cells[a as usize].next, Some(b));
        assert_eq!(sut.cells[b as usize].next, Some(SENTINEL));
        assert_eq!(sut.cells[SENTINEL as usize].prev, Some(b));

        // The last free cell terminates the chain.
        assert!(!sut.cells[3].occupied);
        assert_eq!(sut.cells[3].next, None);
    }

    #[test]
    fn test_display_renders_the_cell_table() {
        let mut list: ArenaList<i64> = ArenaList::with_capacity(4).unwrap();
        list.insert(1, SENTINEL).unwrap();

        let report = list.view().to_string();
        assert!(report.contains("status: OK"));
        assert!(report.contains("size = 1"));
        assert!(report.contains("capacity = 4"));
        assert!(report.contains("VALUE"));
        assert!(report.contains("POISON"));
        assert_eq!(report.lines().count(), 4 + 1 + 4);
    }

    #[test]
    fn test_display_tolerates_a_corrupt_list() {
        let list: ArenaList<i64> = ArenaList::default();

        let sut = list.view();
        assert!(!sut.status.is_empty());

        let report = sut.to_string();
        assert!(report.contains("CORRUPT"));
        assert!(report.contains("buffer is missing"));
        assert!(report.contains("size = 0"));
    }
}
