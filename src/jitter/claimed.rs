use ahash::AHashSet;

use crate::types::CellKey;

/// Grid cells already handed out during a run. Insert-only: a claimed cell is
/// never released or replaced.
#[derive(Debug, Clone, Default)]
pub struct ClaimedSet {
    cells: AHashSet<CellKey>,
}

impl ClaimedSet {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn len(&self) -> usize { self.cells.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    #[inline] pub fn contains(&self, key: &CellKey) -> bool { self.cells.contains(key) }

    /// Claim `key`. Returns false, leaving the set untouched, if it was already taken.
    #[inline] pub fn claim(&mut self, key: CellKey) -> bool { self.cells.insert(key) }

    /// Iterate over the claimed cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CellKey> + '_ { self.cells.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let set = ClaimedSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn claim_once() {
        let mut set = ClaimedSet::new();
        let key = CellKey::of(51.5, -0.1);
        assert!(set.claim(key));
        assert!(!set.claim(key)); // no-op
        assert!(set.contains(&key));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn claim_distinct_cells() {
        let mut set = ClaimedSet::new();
        assert!(set.claim(CellKey::of(51.5, -0.1)));
        assert!(set.claim(CellKey::of(51.5003, -0.1)));
        assert!(!set.contains(&CellKey::of(51.5005, -0.1)));
        assert_eq!(set.iter().count(), 2);
    }
}
