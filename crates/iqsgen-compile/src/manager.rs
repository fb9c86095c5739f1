//! Pass manager for orchestrating lowering.

use tracing::{debug, info, instrument};

use iqsgen_ir::CircuitDag;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{BasisTranslation, CancelInverses, MergeRotations, RemoveBarriers, VerifyBasis};
use crate::property::{BasisGates, PropertySet};

/// Highest supported optimization level.
pub const MAX_OPTIMIZATION_LEVEL: u8 = 2;

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given DAG.
    #[instrument(skip(self, dag, properties))]
    pub fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            dag.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(dag, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(dag, properties)?;
                debug!("Pass {} completed, ops: {}", pass.name(), dag.num_ops());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            dag.depth(),
            dag.num_ops()
        );

        Ok(())
    }

    /// Names of the passes, in execution order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-2).
    optimization_level: u8,
    /// Target properties.
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
            properties: PropertySet::new(),
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: barrier removal and basis translation only
    /// - Level 1: adds inverse-pair cancellation (default)
    /// - Level 2: adds rotation merging
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(MAX_OPTIMIZATION_LEVEL);
        self
    }

    /// Set the target basis gates.
    #[must_use]
    pub fn with_basis(mut self, basis_gates: BasisGates) -> Self {
        self.properties.basis_gates = Some(basis_gates);
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();
        pm.add_pass(RemoveBarriers);

        if self.properties.basis_gates.is_some() {
            pm.add_pass(BasisTranslation);
        }

        if self.optimization_level >= 2 {
            pm.add_pass(MergeRotations);
        }
        if self.optimization_level >= 1 {
            pm.add_pass(CancelInverses);
        }

        if self.properties.basis_gates.is_some() {
            pm.add_pass(VerifyBasis);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iqsgen_ir::Circuit;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_pass_manager_run() {
        let pm = PassManager::new();
        let mut props = PropertySet::new();

        let mut dag = Circuit::bell().unwrap().into_dag();
        pm.run(&mut dag, &mut props).unwrap();

        assert_eq!(dag.num_ops(), 2);
    }

    #[test]
    fn test_pass_manager_builder_levels() {
        let (pm, props) = PassManagerBuilder::new()
            .with_optimization_level(0)
            .with_basis(BasisGates::intel_qs())
            .build();
        assert_eq!(
            pm.pass_names(),
            vec!["RemoveBarriers", "BasisTranslation", "VerifyBasis"]
        );
        assert!(props.basis_gates.is_some());

        let (pm, _) = PassManagerBuilder::new()
            .with_optimization_level(7)
            .with_basis(BasisGates::intel_qs())
            .build();
        assert_eq!(
            pm.pass_names(),
            vec![
                "RemoveBarriers",
                "BasisTranslation",
                "MergeRotations",
                "CancelInverses",
                "VerifyBasis"
            ]
        );
    }

    #[test]
    fn test_builder_without_basis() {
        let (pm, props) = PassManagerBuilder::new().build();
        assert_eq!(pm.pass_names(), vec!["RemoveBarriers", "CancelInverses"]);
        assert!(props.basis_gates.is_none());
    }
}
