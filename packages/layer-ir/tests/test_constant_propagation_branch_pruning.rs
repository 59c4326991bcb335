//! Branch-pruning scenario: a guard that folds to a constant boolean marks
//! its dead successor unreachable.
//!
//! `x = 10; if x > 5: return 1 else: return 2` — the `else` block is
//! reachable from no live edge once `x > 5` resolves to `Constant(Bool(true))`.

use layer_ir::features::constant_propagation::{
    Assignment, BinOp, Block, Branch, ConstExpr, Literal, RunSCCPUseCase, SCCPProgram, SCCPSolver,
};

fn block(id: &str, predecessors: &[&str], successors: &[&str]) -> Block {
    Block {
        id: id.to_string(),
        predecessors: predecessors.iter().map(|s| s.to_string()).collect(),
        successors: successors.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_constant_guard_prunes_dead_branch() {
    let mut program = SCCPProgram::new("entry");

    program.add_block(block("entry", &[], &["branch"]));
    program.add_block(block("branch", &["entry"], &["then", "else"]));
    program.add_block(block("then", &["branch"], &[]));
    program.add_block(block("else", &["branch"], &[]));

    program.add_assignment(Assignment {
        block_id: "entry".to_string(),
        var: "x".to_string(),
        expr: ConstExpr::Literal(Literal::Int(10)),
    });

    program.add_branch(Branch {
        block_id: "branch".to_string(),
        guard: ConstExpr::BinOp(
            BinOp::Gt,
            Box::new(ConstExpr::Var("x".to_string())),
            Box::new(ConstExpr::Literal(Literal::Int(5))),
        ),
        true_successor: "then".to_string(),
        false_successor: "else".to_string(),
    });

    let use_case = RunSCCPUseCase::new(SCCPSolver::new());
    let result = use_case.execute(&program);

    assert_eq!(
        result.constant_of("x"),
        Some(&Literal::Int(10)),
        "x should fold to the constant 10"
    );
    assert!(result.is_reachable("then"), "then block stays reachable");
    assert!(
        !result.is_reachable("else"),
        "else block is pruned once x > 5 resolves to true"
    );
}

#[test]
fn test_non_constant_guard_leaves_both_branches_reachable() {
    let mut program = SCCPProgram::new("entry");

    program.add_block(block("entry", &[], &["branch"]));
    program.add_block(block("branch", &["entry"], &["then", "else"]));
    program.add_block(block("then", &["branch"], &[]));
    program.add_block(block("else", &["branch"], &[]));

    // `x` is never assigned a literal, so the guard can't fold.
    program.add_branch(Branch {
        block_id: "branch".to_string(),
        guard: ConstExpr::BinOp(
            BinOp::Gt,
            Box::new(ConstExpr::Var("x".to_string())),
            Box::new(ConstExpr::Literal(Literal::Int(5))),
        ),
        true_successor: "then".to_string(),
        false_successor: "else".to_string(),
    });

    let use_case = RunSCCPUseCase::new(SCCPSolver::new());
    let result = use_case.execute(&program);

    assert!(result.is_reachable("then"));
    assert!(result.is_reachable("else"));
}
