//! `PropertySet` and related types for pass communication.
//!
//! Passes share the target gate basis and any bookkeeping they produce
//! through a [`PropertySet`] handed along the pass pipeline.
//!
//! # Examples
//!
//! ```
//! use iqsgen_compile::{BasisGates, PropertySet};
//!
//! let props = PropertySet::new().with_basis(BasisGates::intel_qs());
//! assert!(props.basis_gates.as_ref().unwrap().contains("ry"));
//! assert!(!props.basis_gates.as_ref().unwrap().contains("swap"));
//! ```
//!
//! Custom properties are keyed by type:
//!
//! ```
//! use iqsgen_compile::PropertySet;
//!
//! #[derive(Debug, PartialEq)]
//! struct Visited(usize);
//!
//! let mut props = PropertySet::new();
//! props.insert(Visited(3));
//! assert_eq!(props.get::<Visited>(), Some(&Visited(3)));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};

/// Basis gates for the target simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisGates {
    /// List of gate names in the basis.
    gates: Vec<String>,
}

impl BasisGates {
    /// Create a new basis gates set.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a gate is in the basis.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Get the basis gates.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// The gates Intel-QS code generation understands.
    pub fn intel_qs() -> Self {
        Self::new(["rx", "cx", "x", "h", "ry", "cy", "y", "rz", "cz", "z"])
    }

    /// Every standard gate of the IR.
    pub fn universal() -> Self {
        Self::new([
            "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "sxdg", "rx", "ry", "rz", "p",
            "u", "cx", "cy", "cz", "ch", "swap", "iswap", "crx", "cry", "crz", "cp", "rxx", "ryy",
            "rzz", "ccx", "cswap", "prx",
        ])
    }
}

/// Properties shared between compilation passes.
///
/// `basis_gates` has a dedicated field; anything else a pass wants to leave
/// behind goes into the type-keyed custom store via [`insert`](Self::insert)
/// and [`get`](Self::get). Each type can have at most one value stored.
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Target basis gates for gate decomposition.
    ///
    /// Should be set before running translation passes.
    pub basis_gates: Option<BasisGates>,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target basis.
    #[must_use]
    pub fn with_basis(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = Some(basis_gates);
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}
