use std::collections::HashMap;
use std::sync::RwLock;

use crate::features::fusion::domain::FusionWeights;
use crate::features::fusion::ports::{PresetStore, WeightPreset};

struct PresetEntry {
    control: WeightPreset,
    treatment: Option<WeightPreset>,
}

/// In-memory preset store, keyed by query intent. Not backed by a database —
/// whatever loads presets from config/storage constructs one of these and
/// hands it to the fusion use case.
pub struct StaticPresetStore {
    presets: RwLock<HashMap<String, PresetEntry>>,
    default_weights: FusionWeights,
}

impl Default for StaticPresetStore {
    fn default() -> Self {
        Self {
            presets: RwLock::new(HashMap::new()),
            default_weights: FusionWeights::default(),
        }
    }
}

impl StaticPresetStore {
    pub fn new(default_weights: FusionWeights) -> Self {
        Self {
            presets: RwLock::new(HashMap::new()),
            default_weights,
        }
    }

    pub fn set_control(&self, intent: impl Into<String>, version: u32, weights: FusionWeights) {
        let mut presets = self.presets.write().expect("preset store lock poisoned");
        let entry = presets.entry(intent.into()).or_insert_with(|| PresetEntry {
            control: WeightPreset { version, weights },
            treatment: None,
        });
        entry.control = WeightPreset { version, weights };
    }

    pub fn set_treatment(&self, intent: impl Into<String>, version: u32, weights: FusionWeights) {
        let mut presets = self.presets.write().expect("preset store lock poisoned");
        let entry = presets.entry(intent.into()).or_insert_with(|| PresetEntry {
            control: WeightPreset {
                version: 0,
                weights: self.default_weights,
            },
            treatment: None,
        });
        entry.treatment = Some(WeightPreset { version, weights });
    }
}

impl PresetStore for StaticPresetStore {
    fn control(&self, intent: &str) -> WeightPreset {
        self.presets
            .read()
            .expect("preset store lock poisoned")
            .get(intent)
            .map(|entry| entry.control)
            .unwrap_or(WeightPreset {
                version: 0,
                weights: self.default_weights,
            })
    }

    fn treatment(&self, intent: &str) -> Option<WeightPreset> {
        self.presets
            .read()
            .expect("preset store lock poisoned")
            .get(intent)
            .and_then(|entry| entry.treatment)
    }
}
