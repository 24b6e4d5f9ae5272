use std::collections::BTreeSet;
use std::sync::Arc;

use adboard_types::ColumnKey;
use serde::Serialize;

/// Which columns are shown and in what order.
///
/// Invariants, upheld by every constructor:
/// - `selected` always contains the pinned columns (date, app)
/// - `order` is a permutation of `ColumnKey::ALL`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewPreference {
    selected: BTreeSet<ColumnKey>,
    order: Vec<ColumnKey>,
}

impl Default for ViewPreference {
    fn default() -> Self {
        Self {
            selected: ColumnKey::ALL.into_iter().collect(),
            order: ColumnKey::ALL.to_vec(),
        }
    }
}

impl ViewPreference {
    /// Build a preference from a raw selection and order.
    ///
    /// Pinned columns are added to the selection. Duplicates in `order` keep
    /// their first position and keys missing from it are appended in
    /// canonical order.
    pub fn apply_changes(
        selected: impl IntoIterator<Item = ColumnKey>,
        order: impl IntoIterator<Item = ColumnKey>,
    ) -> Self {
        let mut selected: BTreeSet<ColumnKey> = selected.into_iter().collect();
        selected.extend(ColumnKey::ALL.into_iter().filter(|key| key.is_pinned()));

        Self {
            selected,
            order: normalize_order(order),
        }
    }

    pub fn selected_columns(&self) -> &BTreeSet<ColumnKey> {
        &self.selected
    }

    pub fn column_order(&self) -> &[ColumnKey] {
        &self.order
    }

    pub fn is_selected(&self, key: ColumnKey) -> bool {
        self.selected.contains(&key)
    }

    /// Selected columns in display order
    pub fn visible_columns(&self) -> Vec<ColumnKey> {
        self.order
            .iter()
            .copied()
            .filter(|key| self.selected.contains(key))
            .collect()
    }
}

fn normalize_order(order: impl IntoIterator<Item = ColumnKey>) -> Vec<ColumnKey> {
    let mut seen = BTreeSet::new();
    let mut normalized: Vec<ColumnKey> = order
        .into_iter()
        .filter(|key| seen.insert(*key))
        .collect();
    normalized.extend(ColumnKey::ALL.into_iter().filter(|key| !seen.contains(key)));
    normalized
}

/// Committed column preference of the session.
///
/// Readers hold an `Arc` of the value current at the time they asked; a
/// commit swaps in a new value and never mutates one already handed out.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    current: Arc<ViewPreference>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Arc<ViewPreference> {
        Arc::clone(&self.current)
    }

    /// Replace both selection and order. Returns the committed value.
    pub fn apply_changes(
        &mut self,
        selected: impl IntoIterator<Item = ColumnKey>,
        order: impl IntoIterator<Item = ColumnKey>,
    ) -> Arc<ViewPreference> {
        self.commit(ViewPreference::apply_changes(selected, order))
    }

    pub fn commit(&mut self, preference: ViewPreference) -> Arc<ViewPreference> {
        tracing::debug!(
            visible = ?preference.visible_columns(),
            "column preference committed"
        );
        self.current = Arc::new(preference);
        self.current()
    }

    /// Back to all columns in canonical order
    pub fn reset(&mut self) -> Arc<ViewPreference> {
        self.commit(ViewPreference::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ColumnKey::*;

    fn is_permutation(order: &[ColumnKey]) -> bool {
        let set: BTreeSet<_> = order.iter().copied().collect();
        order.len() == ColumnKey::ALL.len() && set.len() == ColumnKey::ALL.len()
    }

    #[test]
    fn test_default_shows_everything_in_canonical_order() {
        let pref = ViewPreference::default();
        assert_eq!(pref.visible_columns(), ColumnKey::ALL.to_vec());
    }

    #[test]
    fn test_pinned_columns_forced_into_selection() {
        let pref = ViewPreference::apply_changes([Clicks], ColumnKey::ALL);
        assert_eq!(pref.visible_columns(), vec![Date, App, Clicks]);
    }

    #[test]
    fn test_order_is_normalized_to_permutation() {
        let pref = ViewPreference::apply_changes(ColumnKey::ALL, [Ctr, Ctr, App, Date, App]);

        assert!(is_permutation(pref.column_order()));
        assert_eq!(&pref.column_order()[..3], &[Ctr, App, Date]);
        assert_eq!(
            &pref.column_order()[3..],
            &[Clicks, Requests, Response, Impression, Revenue, FillRate]
        );
    }

    #[test]
    fn test_apply_changes_replaces_both() {
        let mut store = PreferenceStore::new();
        let before = store.current();

        let after = store.apply_changes([Date, App, Revenue], [Revenue, Date, App]);

        assert_eq!(after.visible_columns(), vec![Revenue, Date, App]);
        // handed-out values are never mutated
        assert_eq!(*before, ViewPreference::default());
        assert_eq!(*store.current(), *after);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut store = PreferenceStore::new();
        store.apply_changes([Date], [Ctr]);

        store.reset();

        assert_eq!(*store.current(), ViewPreference::default());
    }

    #[test]
    fn test_invariants_hold_for_arbitrary_inputs() {
        // a cheap deterministic walk over many selections and orders
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        for _ in 0..500 {
            let mut selected = Vec::new();
            let mut order = Vec::new();
            for _ in 0..12 {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                let key = ColumnKey::ALL[(seed % 9) as usize];
                if seed & 0x100 != 0 {
                    selected.push(key);
                }
                if seed & 0x200 != 0 {
                    order.push(key);
                }
            }

            let pref = ViewPreference::apply_changes(selected, order);

            assert!(pref.is_selected(Date) && pref.is_selected(App));
            assert!(is_permutation(pref.column_order()));
        }
    }
}
