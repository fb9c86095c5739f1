//! Built-in compilation passes.
//!
//! The passes run in this order inside the default pipeline:
//! [`RemoveBarriers`], [`BasisTranslation`], [`CancelInverses`],
//! [`MergeRotations`] and finally the [`VerifyBasis`] check.

mod barriers;
mod optimization;
mod translation;
mod verification;

pub use barriers::RemoveBarriers;
pub use optimization::{CancelInverses, MergeRotations, OptimizationStats};
pub use translation::BasisTranslation;
pub use verification::VerifyBasis;

/// Tolerance for angle comparisons.
pub(crate) const EPSILON: f64 = 1e-10;
