//! Rotation angles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;

/// A rotation angle of the form `c + k₁·θ₁ + k₂·θ₂ + …`.
///
/// Lowering only ever halves, negates and sums angles, and all three keep
/// an angle in this linear form. Symbols therefore survive every pass and
/// are reported by name when a circuit that still contains one is emitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Angle {
    constant: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    terms: BTreeMap<String, f64>,
}

impl Angle {
    /// The zero angle.
    pub const ZERO: Self = Self {
        constant: 0.0,
        terms: BTreeMap::new(),
    };

    /// A concrete angle in radians.
    pub fn constant(radians: f64) -> Self {
        Self {
            constant: radians,
            terms: BTreeMap::new(),
        }
    }

    /// The angle π.
    pub fn pi() -> Self {
        Self::constant(PI)
    }

    /// A named, not yet bound parameter.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self {
            constant: 0.0,
            terms: BTreeMap::from([(name.into(), 1.0)]),
        }
    }

    /// The value in radians, or `None` while a symbol remains.
    pub fn value(&self) -> Option<f64> {
        self.terms.is_empty().then_some(self.constant)
    }

    /// Whether any symbol remains.
    pub fn is_symbolic(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Names of the remaining symbols, sorted.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// This angle times `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let mut terms = self.terms.clone();
        for coefficient in terms.values_mut() {
            *coefficient *= factor;
        }
        terms.retain(|_, k| *k != 0.0);
        Self {
            constant: self.constant * factor,
            terms,
        }
    }

    /// The sum of two angles. Symbols whose coefficients cancel disappear.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        let mut terms = self.terms.clone();
        for (name, k) in &other.terms {
            *terms.entry(name.clone()).or_insert(0.0) += k;
        }
        terms.retain(|_, k| *k != 0.0);
        Self {
            constant: self.constant + other.constant,
            terms,
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, &k) in &self.terms {
            let sign = if k < 0.0 { "-" } else { "+" };
            match (first, sign) {
                (true, "-") => write!(f, "-")?,
                (true, _) => {}
                (false, _) => write!(f, " {sign} ")?,
            }
            let magnitude = k.abs();
            if (magnitude - 1.0).abs() < f64::EPSILON {
                write!(f, "{name}")?;
            } else {
                write!(f, "{magnitude}*{name}")?;
            }
            first = false;
        }
        if first {
            write!(f, "{}", self.constant)
        } else if self.constant != 0.0 {
            let sign = if self.constant < 0.0 { "-" } else { "+" };
            write!(f, " {sign} {}", self.constant.abs())
        } else {
            Ok(())
        }
    }
}

impl From<f64> for Angle {
    fn from(radians: f64) -> Self {
        Self::constant(radians)
    }
}

impl std::ops::Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(&rhs)
    }
}

impl std::ops::Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.plus(&rhs.scaled(-1.0))
    }
}

impl std::ops::Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        self.scaled(-1.0)
    }
}

impl std::ops::Mul<f64> for Angle {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        self.scaled(factor)
    }
}

impl std::ops::Div<f64> for Angle {
    type Output = Self;

    fn div(self, divisor: f64) -> Self {
        self.scaled(divisor.recip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_angle() {
        let a = Angle::pi() / 2.0;
        assert!(!a.is_symbolic());
        assert!((a.value().unwrap() - PI / 2.0).abs() < 1e-12);
        assert_eq!(Angle::ZERO.value(), Some(0.0));
    }

    #[test]
    fn test_symbols_survive_lowering_arithmetic() {
        let theta = Angle::symbol("theta");
        let half = theta.scaled(0.5);
        assert!(half.is_symbolic());
        assert_eq!(half.value(), None);

        let sum = half.plus(&Angle::symbol("alpha")).plus(&Angle::constant(1.0));
        assert_eq!(sum.symbols().collect::<Vec<_>>(), vec!["alpha", "theta"]);
    }

    #[test]
    fn test_cancelled_symbol_becomes_concrete() {
        let theta = Angle::symbol("theta");
        let back = (theta.clone() + Angle::constant(0.25)) - theta;
        assert_eq!(back, Angle::constant(0.25));
        assert_eq!(back.value(), Some(0.25));
    }

    #[test]
    fn test_division_by_zero_is_not_finite() {
        let a = Angle::pi() / 0.0;
        assert!(a.value().is_some_and(f64::is_infinite));
    }

    #[test]
    fn test_display() {
        assert_eq!(Angle::constant(0.5).to_string(), "0.5");
        assert_eq!(Angle::symbol("t").to_string(), "t");
        assert_eq!((-Angle::symbol("t")).to_string(), "-t");
        assert_eq!(
            (Angle::symbol("t") * 2.0 - Angle::constant(0.5)).to_string(),
            "2*t - 0.5"
        );
        assert_eq!(
            (Angle::symbol("a") - Angle::symbol("b")).to_string(),
            "a - b"
        );
    }

    #[test]
    fn test_serialized_form() {
        let json = serde_json::to_string(&Angle::constant(1.5)).unwrap();
        assert_eq!(json, r#"{"constant":1.5}"#);

        let theta = Angle::symbol("theta") * 0.5;
        let back: Angle = serde_json::from_str(&serde_json::to_string(&theta).unwrap()).unwrap();
        assert_eq!(back, theta);
    }
}
