pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export application layer
pub use application::{IndexingUseCase, IndexingUseCaseImpl};
