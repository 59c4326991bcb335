pub mod graph_usecase;

pub use graph_usecase::{GraphBuildResult, GraphBuilderUseCase, GraphBuilderUseCaseImpl};
