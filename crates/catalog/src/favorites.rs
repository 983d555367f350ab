use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free set of favorited alternative ids.
///
/// Insertion order is preserved so callers can show "most recently added last".
/// The set is plain data; where it is persisted is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct FavoriteSet {
    ids: Vec<u32>,
}

impl FavoriteSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Returns `true` when the id was not yet present.
    pub fn add(&mut self, id: u32) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns `true` when the id was present.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    /// Flips membership and reports whether `id` is a favorite afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<u32>> for FavoriteSet {
    fn from(ids: Vec<u32>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<FavoriteSet> for Vec<u32> {
    fn from(set: FavoriteSet) -> Self {
        set.ids
    }
}

impl FromIterator<u32> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.add(id);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn add_is_idempotent() {
        let mut set = FavoriteSet::new();
        assert!(set.add(101));
        assert!(!set.add(101));
        assert_eq!(set.ids(), &[101]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut set: FavoriteSet = [101, 104].into_iter().collect();
        assert!(set.remove(101));
        assert!(!set.remove(101));
        assert_eq!(set.ids(), &[104]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut set = FavoriteSet::new();
        assert!(set.toggle(20));
        assert!(set.contains(20));
        assert!(!set.toggle(20));
        assert!(set.is_empty());
    }

    #[test]
    fn collecting_drops_duplicates_and_keeps_order() {
        let set: FavoriteSet = [3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(set.ids(), &[3, 1, 2]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let set: FavoriteSet = [7, 9].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[7,9]");
        let back: FavoriteSet = serde_json::from_str("[9,7,9]").unwrap();
        assert_eq!(back.ids(), &[9, 7]);
    }

    proptest! {
        #[test]
        fn double_toggle_restores_the_set(ids in proptest::collection::vec(0u32..50, 0..20), id in 0u32..50) {
            let original: FavoriteSet = ids.into_iter().collect();
            let mut set = original.clone();
            set.toggle(id);
            set.toggle(id);
            prop_assert_eq!(set.contains(id), original.contains(id));
            prop_assert_eq!(set.len(), original.len());
        }
    }
}
