pub mod preset_store;

pub use preset_store::{PresetStore, WeightPreset};
