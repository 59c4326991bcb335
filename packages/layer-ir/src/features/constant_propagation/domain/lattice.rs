//! Four-point value lattice and the parallel block-reachability lattice.

use serde::{Deserialize, Serialize};

/// A compile-time constant value. Kept narrow — only the literal shapes SCCP
/// needs to fold through; nothing here attempts general expression evaluation.
///
/// The transfer function never constructs `Float` from a NaN/±Infinity
/// result — those are classified `Bottom` at the point of computation (see
/// §4.8's edge cases) — so equality here is a plain bitwise float compare,
/// not a total order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    None,
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Int(a), Literal::Int(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => a.to_bits() == b.to_bits(),
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            (Literal::Str(a), Literal::Str(b)) => a == b,
            (Literal::None, Literal::None) => true,
            _ => false,
        }
    }
}

impl Literal {
    pub fn is_finite(&self) -> bool {
        match self {
            Literal::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Four-point lattice per variable at each program point.
///
/// Order: `Unreachable` < `Top` < `Constant(_)` < `Bottom` — a block that
/// hasn't been visited yet is `Unreachable`; `Top` means "no value seen
/// yet but the block is live"; `Bottom` means overdefined (two conflicting
/// constants met, or a definitely-non-constant operation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstantLattice {
    Unreachable,
    Top,
    Constant(Literal),
    Bottom,
}

impl ConstantLattice {
    pub fn meet(&self, other: &Self) -> Self {
        use ConstantLattice::*;
        match (self, other) {
            (Unreachable, x) | (x, Unreachable) => x.clone(),
            (Bottom, _) | (_, Bottom) => Bottom,
            (Top, x) | (x, Top) => x.clone(),
            (Constant(a), Constant(b)) => {
                if a == b {
                    Constant(a.clone())
                } else {
                    Bottom
                }
            }
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, ConstantLattice::Constant(_))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            ConstantLattice::Constant(l) => Some(l),
            _ => None,
        }
    }
}

/// Block reachability, tracked as its own lattice so branch pruning can mark
/// a successor `Unreachable` without touching any variable's value lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reachability {
    Unreachable,
    Reachable,
}

impl Reachability {
    pub fn meet(self, other: Self) -> Self {
        if self == Reachability::Reachable || other == Reachability::Reachable {
            Reachability::Reachable
        } else {
            Reachability::Unreachable
        }
    }
}
