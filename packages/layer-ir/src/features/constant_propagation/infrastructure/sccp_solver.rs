//! Sparse Conditional Constant Propagation.
//!
//! Same worklist shape as `features::taint_analysis::infrastructure::
//! worklist_solver::WorklistTaintSolver` (Kildall 1973 / Kam & Ullman 1977):
//! meet predecessor facts, apply a transfer function, re-queue changed
//! successors until the worklist drains. Two lattices are carried side by
//! side — block reachability and per-variable constant value — so a branch
//! that resolves to a constant guard can mark its dead successor
//! `Unreachable` without that decision ever touching the value lattice.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::features::constant_propagation::domain::{
    BinOp, Block, ConstExpr, ConstantLattice, Literal, Reachability, SCCPProgram,
};
use crate::features::constant_propagation::ports::{ConstantPropagationAnalyzer, SCCPResult};

pub struct SCCPSolver {
    max_iterations: usize,
}

impl Default for SCCPSolver {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
        }
    }
}

impl SCCPSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    fn block_by_id<'a>(program: &'a SCCPProgram, id: &str) -> Option<&'a Block> {
        program.blocks.iter().find(|b| b.id == id)
    }

    fn eval(expr: &ConstExpr, values: &HashMap<String, ConstantLattice>) -> ConstantLattice {
        match expr {
            ConstExpr::Literal(lit) => {
                if !lit.is_finite() {
                    // NaN/±Infinity: never a wrong constant, always overdefined.
                    ConstantLattice::Bottom
                } else {
                    ConstantLattice::Constant(lit.clone())
                }
            }
            ConstExpr::Var(name) => values.get(name).cloned().unwrap_or(ConstantLattice::Top),
            ConstExpr::BinOp(op, lhs, rhs) => {
                let l = Self::eval(lhs, values);
                let r = Self::eval(rhs, values);
                Self::eval_binop(*op, &l, &r)
            }
            ConstExpr::ImpureCall | ConstExpr::Unknown => ConstantLattice::Bottom,
        }
    }

    fn eval_binop(op: BinOp, l: &ConstantLattice, r: &ConstantLattice) -> ConstantLattice {
        let (ConstantLattice::Constant(a), ConstantLattice::Constant(b)) = (l, r) else {
            return match (l, r) {
                (ConstantLattice::Top, _) | (_, ConstantLattice::Top) => ConstantLattice::Top,
                _ => ConstantLattice::Bottom,
            };
        };
        match (op, a, b) {
            (BinOp::Add, Literal::Int(x), Literal::Int(y)) => {
                Self::int_or_bottom(x.checked_add(*y))
            }
            (BinOp::Sub, Literal::Int(x), Literal::Int(y)) => {
                Self::int_or_bottom(x.checked_sub(*y))
            }
            (BinOp::Mul, Literal::Int(x), Literal::Int(y)) => {
                Self::int_or_bottom(x.checked_mul(*y))
            }
            (BinOp::Div, Literal::Int(x), Literal::Int(y)) => {
                if *y == 0 {
                    ConstantLattice::Bottom
                } else {
                    Self::int_or_bottom(x.checked_div(*y))
                }
            }
            (BinOp::Eq, x, y) => ConstantLattice::Constant(Literal::Bool(x == y)),
            (BinOp::Lt, Literal::Int(x), Literal::Int(y)) => {
                ConstantLattice::Constant(Literal::Bool(x < y))
            }
            (BinOp::Gt, Literal::Int(x), Literal::Int(y)) => {
                ConstantLattice::Constant(Literal::Bool(x > y))
            }
            // Python-semantic vs language-semantic arithmetic could disagree
            // on mixed types or overflow — don't guess, go Bottom.
            _ => ConstantLattice::Bottom,
        }
    }

    fn int_or_bottom(v: Option<i64>) -> ConstantLattice {
        match v {
            Some(n) => ConstantLattice::Constant(Literal::Int(n)),
            None => ConstantLattice::Bottom,
        }
    }
}

impl ConstantPropagationAnalyzer for SCCPSolver {
    fn analyze(&self, program: &SCCPProgram) -> SCCPResult {
        let mut values: HashMap<String, ConstantLattice> = HashMap::new();
        let mut reachability: HashMap<String, Reachability> = HashMap::new();
        // (source_block, target_block) edges proven dead by branch pruning.
        let mut pruned_edges: HashSet<(String, String)> = HashSet::new();

        let mut worklist = VecDeque::new();
        worklist.push_back(program.entry.clone());
        reachability.insert(program.entry.clone(), Reachability::Reachable);

        let mut iterations = 0;
        while let Some(block_id) = worklist.pop_front() {
            iterations += 1;
            if iterations > self.max_iterations {
                break;
            }

            // Value propagation: fold every assignment in this block against
            // the current environment.
            for assignment in program
                .assignments
                .iter()
                .filter(|a| a.block_id == block_id)
            {
                let new_val = Self::eval(&assignment.expr, &values);
                let merged = match values.get(&assignment.var) {
                    Some(old) => old.meet(&new_val),
                    None => new_val,
                };
                let changed = values.get(&assignment.var) != Some(&merged);
                values.insert(assignment.var.clone(), merged);
                if changed {
                    if let Some(block) = Self::block_by_id(program, &block_id) {
                        for succ in &block.successors {
                            if !pruned_edges.contains(&(block_id.clone(), succ.clone())) {
                                worklist.push_back(succ.clone());
                            }
                        }
                    }
                }
            }

            // Branch pruning: a guard resolved to a constant bool kills one
            // successor's edge outright.
            for branch in program.branches.iter().filter(|b| b.block_id == block_id) {
                let guard = Self::eval(&branch.guard, &values);
                match guard.as_literal().and_then(Literal::as_bool) {
                    Some(true) => {
                        pruned_edges
                            .insert((branch.block_id.clone(), branch.false_successor.clone()));
                        if reachability
                            .insert(branch.true_successor.clone(), Reachability::Reachable)
                            != Some(Reachability::Reachable)
                        {
                            worklist.push_back(branch.true_successor.clone());
                        }
                    }
                    Some(false) => {
                        pruned_edges
                            .insert((branch.block_id.clone(), branch.true_successor.clone()));
                        if reachability
                            .insert(branch.false_successor.clone(), Reachability::Reachable)
                            != Some(Reachability::Reachable)
                        {
                            worklist.push_back(branch.false_successor.clone());
                        }
                    }
                    None => {
                        for succ in [&branch.true_successor, &branch.false_successor] {
                            if reachability.insert(succ.clone(), Reachability::Reachable)
                                != Some(Reachability::Reachable)
                            {
                                worklist.push_back(succ.clone());
                            }
                        }
                    }
                }
            }

            // Plain sequential successors (blocks with no branch) stay reachable.
            if let Some(block) = Self::block_by_id(program, &block_id) {
                if program.branches.iter().all(|b| b.block_id != block_id) {
                    for succ in &block.successors {
                        if reachability.insert(succ.clone(), Reachability::Reachable)
                            != Some(Reachability::Reachable)
                        {
                            worklist.push_back(succ.clone());
                        }
                    }
                }
            }
        }

        // A block only reachable through pruned edges never got visited by
        // the worklist above unless another live path also reached it; mark
        // everything the walk never touched as Unreachable explicitly.
        for block in &program.blocks {
            reachability
                .entry(block.id.clone())
                .or_insert(Reachability::Unreachable);
        }

        SCCPResult {
            values,
            block_reachability: reachability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::constant_propagation::domain::{Assignment, Branch};

    fn block(id: &str, succs: &[&str]) -> Block {
        Block {
            id: id.to_string(),
            predecessors: Vec::new(),
            successors: succs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_simple_constant_propagation() {
        let mut program = SCCPProgram::new("entry");
        program.add_block(block("entry", &[]));
        program.add_assignment(Assignment {
            block_id: "entry".to_string(),
            var: "x".to_string(),
            expr: ConstExpr::Literal(Literal::Int(2)),
        });
        program.add_assignment(Assignment {
            block_id: "entry".to_string(),
            var: "y".to_string(),
            expr: ConstExpr::BinOp(
                BinOp::Add,
                Box::new(ConstExpr::Var("x".to_string())),
                Box::new(ConstExpr::Literal(Literal::Int(3))),
            ),
        });

        let result = SCCPSolver::new().analyze(&program);
        assert_eq!(result.constant_of("x"), Some(&Literal::Int(2)));
        assert_eq!(result.constant_of("y"), Some(&Literal::Int(5)));
    }

    #[test]
    fn test_impure_call_is_bottom() {
        let mut program = SCCPProgram::new("entry");
        program.add_block(block("entry", &[]));
        program.add_assignment(Assignment {
            block_id: "entry".to_string(),
            var: "z".to_string(),
            expr: ConstExpr::ImpureCall,
        });

        let result = SCCPSolver::new().analyze(&program);
        assert_eq!(result.values.get("z"), Some(&ConstantLattice::Bottom));
    }

    #[test]
    fn test_branch_pruning_marks_dead_successor_unreachable() {
        let mut program = SCCPProgram::new("entry");
        program.add_block(block("entry", &[]));
        program.add_block(block("then_block", &[]));
        program.add_block(block("else_block", &[]));
        program.add_branch(Branch {
            block_id: "entry".to_string(),
            guard: ConstExpr::Literal(Literal::Bool(true)),
            true_successor: "then_block".to_string(),
            false_successor: "else_block".to_string(),
        });

        let result = SCCPSolver::new().analyze(&program);
        assert!(result.is_reachable("then_block"));
        assert!(!result.is_reachable("else_block"));
    }

    #[test]
    fn test_division_by_zero_is_bottom() {
        let mut program = SCCPProgram::new("entry");
        program.add_block(block("entry", &[]));
        program.add_assignment(Assignment {
            block_id: "entry".to_string(),
            var: "r".to_string(),
            expr: ConstExpr::BinOp(
                BinOp::Div,
                Box::new(ConstExpr::Literal(Literal::Int(1))),
                Box::new(ConstExpr::Literal(Literal::Int(0))),
            ),
        });

        let result = SCCPSolver::new().analyze(&program);
        assert_eq!(result.values.get("r"), Some(&ConstantLattice::Bottom));
    }

    #[test]
    fn test_conflicting_assignments_converge_to_bottom() {
        // Two assignments to the same variable in the same block simulate
        // what a real CFG would model as two distinct predecessors meeting
        // with different constants.
        let mut program = SCCPProgram::new("entry");
        program.add_block(block("entry", &[]));
        program.add_assignment(Assignment {
            block_id: "entry".to_string(),
            var: "v".to_string(),
            expr: ConstExpr::Literal(Literal::Int(1)),
        });
        program.add_assignment(Assignment {
            block_id: "entry".to_string(),
            var: "v".to_string(),
            expr: ConstExpr::Literal(Literal::Int(2)),
        });

        let result = SCCPSolver::new().analyze(&program);
        assert_eq!(result.values.get("v"), Some(&ConstantLattice::Bottom));
    }
}
