use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::features::fusion::ports::{PresetStore, WeightPreset};

/// Routes a fraction of queries to a treatment preset version, deterministic
/// per query id so the same query always lands on the same arm (repeat
/// runs, retries, and pagination all stay consistent).
pub struct ABRouter<'a> {
    store: &'a dyn PresetStore,
    /// Percentage (0..=100) of queries routed to treatment, when one exists.
    treatment_traffic_percent: u8,
}

impl<'a> ABRouter<'a> {
    pub fn new(store: &'a dyn PresetStore, treatment_traffic_percent: u8) -> Self {
        Self {
            store,
            treatment_traffic_percent: treatment_traffic_percent.min(100),
        }
    }

    fn bucket(query_id: &str) -> u8 {
        let mut hasher = DefaultHasher::new();
        query_id.hash(&mut hasher);
        (hasher.finish() % 100) as u8
    }

    pub fn route(&self, intent: &str, query_id: &str) -> WeightPreset {
        let control = self.store.control(intent);
        if self.treatment_traffic_percent == 0 {
            return control;
        }
        match self.store.treatment(intent) {
            Some(treatment) if Self::bucket(query_id) < self.treatment_traffic_percent => treatment,
            _ => control,
        }
    }
}
