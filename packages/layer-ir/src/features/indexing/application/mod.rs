pub mod indexing_usecase;

pub use indexing_usecase::{IndexResult, IndexingUseCase, IndexingUseCaseImpl};
