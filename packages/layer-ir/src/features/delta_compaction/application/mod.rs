pub mod run_compaction;

pub use run_compaction::RunCompactionUseCase;
