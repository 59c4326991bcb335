pub mod generate_ir;

pub use generate_ir::*;
