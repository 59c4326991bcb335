pub mod expr;
pub mod lattice;
pub mod program;

pub use expr::{BinOp, ConstExpr};
pub use lattice::{ConstantLattice, Literal, Reachability};
pub use program::{Assignment, Block, Branch, SCCPProgram};
