//! Constant-foldable expression shape fed to the solver.
//!
//! Deliberately not a full expression IR — the solver only needs enough
//! structure to fold literals, copies, and binary arithmetic; anything else
//! collapses to `Bottom` immediately via `Unknown`/`ImpureCall`.

use super::lattice::Literal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
    Gt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConstExpr {
    Literal(Literal),
    /// Reference to another SSA variable's current lattice value.
    Var(String),
    BinOp(BinOp, Box<ConstExpr>, Box<ConstExpr>),
    /// Call to a function not known to be pure — always `Bottom`.
    ImpureCall,
    /// Anything the extractor couldn't classify — always `Bottom`.
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_binop() {
        let expr = ConstExpr::BinOp(
            BinOp::Add,
            Box::new(ConstExpr::Literal(Literal::Int(1))),
            Box::new(ConstExpr::Var("x".to_string())),
        );
        matches!(expr, ConstExpr::BinOp(BinOp::Add, _, _));
    }
}
