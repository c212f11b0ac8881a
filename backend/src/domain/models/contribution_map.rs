use std::collections::BTreeMap;
use std::sync::Arc;

/// Per-participant contributions entered in the split form
///
/// Values are percentage points in `Percentage` mode and currency amounts in
/// `FixedAmount` mode. The map is immutable: every edit returns a new map and
/// leaves the previous one untouched, so older session states stay valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributionMap {
    entries: Arc<BTreeMap<String, f64>>,
}

impl ContributionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contribution for a participant, if one was entered
    pub fn get(&self, participant_id: &str) -> Option<f64> {
        self.entries.get(participant_id).copied()
    }

    /// Contribution for a participant, with a missing entry read as 0
    pub fn value_or_zero(&self, participant_id: &str) -> f64 {
        self.get(participant_id).unwrap_or(0.0)
    }

    /// Return a new map with the contribution for `participant_id` replaced
    pub fn with_contribution(&self, participant_id: impl Into<String>, value: f64) -> Self {
        let mut entries = (*self.entries).clone();
        entries.insert(participant_id.into(), value);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Return a new map without an entry for `participant_id`
    pub fn without(&self, participant_id: &str) -> Self {
        if !self.entries.contains_key(participant_id) {
            return self.clone();
        }
        let mut entries = (*self.entries).clone();
        entries.remove(participant_id);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Sum of contributions over the given participants
    pub fn sum_over<'a, I>(&self, participant_ids: I) -> f64
    where
        I: IntoIterator<Item = &'a String>,
    {
        participant_ids
            .into_iter()
            .map(|id| self.value_or_zero(id))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, f64)> for ContributionMap {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            entries: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl<const N: usize> From<[(&str, f64); N]> for ContributionMap {
    fn from(pairs: [(&str, f64); N]) -> Self {
        pairs
            .into_iter()
            .map(|(id, value)| (id.to_string(), value))
            .collect()
    }
}
