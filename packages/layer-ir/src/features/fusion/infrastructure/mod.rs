pub mod ab_router;
pub mod static_preset_store;

pub use ab_router::ABRouter;
pub use static_preset_store::StaticPresetStore;
