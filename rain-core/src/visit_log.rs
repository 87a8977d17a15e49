//! The shared, append-only record of successful raindrop moves.

use crate::types::Coord;

/// An ordered, append-only sequence of visited coordinates.
///
/// One log is shared by every raindrop in a run and grows by exactly one
/// entry per successful move; initial placement and stationary ticks add
/// nothing. Entries are stored axis-swapped as `(column, row)`, so
/// anything reading the log against [`crate::grid::Grid`] indexing must
/// apply the same swap.
#[derive(Debug, Default)]
pub struct VisitLog {
    entries: Vec<Coord>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one visited coordinate. Never removes or reorders.
    #[inline]
    pub fn push(&mut self, coord: Coord) {
        self.entries.push(coord);
    }

    /// All entries in append order, duplicates included.
    pub fn entries(&self) -> &[Coord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_append_order_and_duplicates() {
        let mut log = VisitLog::new();
        assert!(log.is_empty());

        log.push((2, 1));
        log.push((0, 0));
        log.push((2, 1));

        assert_eq!(log.len(), 3);
        assert_eq!(log.entries(), &[(2, 1), (0, 0), (2, 1)]);
    }
}
