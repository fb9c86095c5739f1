//! Dependency graph of a circuit's operations.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// The operations of a circuit, linked wire by wire.
///
/// Each node holds one instruction. An edge `a -> b` labelled `q` means `b`
/// is the next operation on qubit `q` after `a`. Instructions are only ever
/// appended, so node index order is both a valid execution order and the
/// order they were applied in; the lowering passes rely on that when they
/// rebuild a circuit.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<Instruction, QubitId>,
    /// Most recent operation on each wire; `None` while the wire is empty.
    wires: FxHashMap<QubitId, Option<NodeIndex>>,
}

impl CircuitDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// A DAG with the same wires and no operations.
    ///
    /// Rewriting passes build their output into this and swap it in.
    pub fn empty_like(&self) -> Self {
        Self {
            graph: DiGraph::with_capacity(self.graph.node_count(), self.graph.edge_count()),
            wires: self.wires.keys().map(|&q| (q, None)).collect(),
        }
    }

    /// Add a wire. Adding one that exists is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        self.wires.entry(qubit).or_insert(None);
    }

    /// Append `instruction` after the last operation on each of its qubits.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<()> {
        self.check_operands(&instruction)?;

        let qubits = instruction.qubits.clone();
        let node = self.graph.add_node(instruction);
        for qubit in qubits {
            if let Some(Some(previous)) = self.wires.insert(qubit, Some(node)) {
                self.graph.add_edge(previous, node, qubit);
            }
        }
        Ok(())
    }

    fn check_operands(&self, instruction: &Instruction) -> IrResult<()> {
        let operation = || instruction.name().to_string();

        if let Some(expected) = instruction.fixed_arity() {
            let got = instruction.qubits.len();
            if expected != got {
                return Err(IrError::ArityMismatch {
                    operation: operation(),
                    expected,
                    got,
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !self.wires.contains_key(&qubit) {
                return Err(IrError::UnknownQubit {
                    operation: operation(),
                    qubit,
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    operation: operation(),
                    qubit,
                });
            }
        }
        Ok(())
    }

    /// Operations in the order they were applied.
    pub fn topological_ops(&self) -> impl Iterator<Item = &Instruction> {
        self.graph.node_weights()
    }

    pub fn num_qubits(&self) -> usize {
        self.wires.len()
    }

    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Qubits in ascending order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + use<> {
        let mut qubits: Vec<_> = self.wires.keys().copied().collect();
        qubits.sort_unstable();
        qubits.into_iter()
    }

    /// Number of layers: the longest chain of operations sharing wires.
    pub fn depth(&self) -> usize {
        let mut layer = vec![0usize; self.graph.node_count()];
        for node in self.graph.node_indices() {
            let deepest_predecessor = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|previous| layer[previous.index()])
                .max()
                .unwrap_or(0);
            layer[node.index()] = deepest_predecessor + 1;
        }
        layer.into_iter().max().unwrap_or(0)
    }

    /// Check that every edge joins two operations on its wire, runs forward
    /// in application order, and that each operation has at most one
    /// predecessor per qubit.
    pub fn verify_integrity(&self) -> IrResult<()> {
        for edge in self.graph.edge_references() {
            let qubit = *edge.weight();
            if edge.source() >= edge.target() {
                return Err(IrError::InvalidDag(format!(
                    "edge on {qubit} runs from {:?} back to {:?}",
                    edge.source(),
                    edge.target()
                )));
            }
            let on_wire = |node: NodeIndex| self.graph[node].qubits.contains(&qubit);
            if !on_wire(edge.source()) || !on_wire(edge.target()) {
                return Err(IrError::InvalidDag(format!(
                    "edge on {qubit} joins an operation that does not touch it"
                )));
            }
        }

        for node in self.graph.node_indices() {
            let mut incoming = FxHashSet::default();
            for edge in self.graph.edges_directed(node, Direction::Incoming) {
                if !incoming.insert(*edge.weight()) {
                    return Err(IrError::InvalidDag(format!(
                        "operation {node:?} has two predecessors on {}",
                        edge.weight()
                    )));
                }
            }
        }

        Ok(())
    }
}
