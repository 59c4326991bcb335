//! Minimal CFG view the solver iterates over — one step removed from
//! `features::flow_graph::domain::{CFGBlock, CFGEdge}` so this module stays
//! decoupled from that feature's own evolution; an adapter builds this from
//! a real `CFGBlock` list where the two line up.

use super::expr::ConstExpr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub predecessors: Vec<String>,
    pub successors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub block_id: String,
    pub var: String,
    pub expr: ConstExpr,
}

/// A two-way branch whose guard, once resolved to `Constant(Bool(_))`,
/// prunes one successor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub block_id: String,
    pub guard: ConstExpr,
    pub true_successor: String,
    pub false_successor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SCCPProgram {
    pub entry: String,
    pub blocks: Vec<Block>,
    pub assignments: Vec<Assignment>,
    pub branches: Vec<Branch>,
}

impl SCCPProgram {
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            blocks: Vec::new(),
            assignments: Vec::new(),
            branches: Vec::new(),
        }
    }

    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    pub fn add_branch(&mut self, branch: Branch) {
        self.branches.push(branch);
    }
}
