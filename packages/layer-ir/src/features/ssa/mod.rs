//! SSA construction (L5)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::BuildSSAUseCase;
pub use domain::{PhiNode, SSAGraph, SSAVariable};
pub use ports::SSABuilder;
