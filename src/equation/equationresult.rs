use std::fmt;

use nalgebra::Complex;
use serde::{Deserialize, Serialize};

use crate::equation::equationfamily::EquationFamily;

// ─────────────────────────────────────────────────────────────────────────────
// DomainClassification
// ─────────────────────────────────────────────────────────────────────────────

/// Whether the computed roots (or the function values) are real.
///
/// `Decimal` is only ever read back from serialized results written by older
/// tools; evaluation itself always answers `Real` or `Complex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainClassification {
    Real,
    Complex,
    Decimal
}

impl DomainClassification {
    /// `Real` when every root lies exactly on the real axis.
    ///
    /// Solvers are expected to have cleared numerical noise from the
    /// imaginary parts beforehand.
    pub fn of_roots(roots: &[Root]) -> DomainClassification {
        if roots.iter().all(|root| root.is_real()) {
            DomainClassification::Real
        } else {
            DomainClassification::Complex
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            DomainClassification::Real => 'R',
            DomainClassification::Complex => 'C',
            DomainClassification::Decimal => 'D'
        }
    }
}

impl fmt::Display for DomainClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point2D / Root
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// An x-intercept candidate; `im != 0` means the curve never reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Root {
    re: f64,
    im: f64
}

impl Root {
    pub fn new(re: f64, im: f64) -> Root {
        Root { re, im }
    }

    pub fn real(re: f64) -> Root {
        Root { re, im: 0.0 }
    }

    pub fn re(&self) -> f64 {
        self.re
    }

    pub fn im(&self) -> f64 {
        self.im
    }

    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }

    pub fn to_complex(&self) -> Complex<f64> {
        Complex::new(self.re, self.im)
    }

    /// `(re, 0)` for a real root.
    pub fn intercept(&self) -> Option<Point2D> {
        if self.is_real() {
            Some(Point2D::new(self.re, 0.0))
        } else {
            None
        }
    }
}

impl From<Complex<f64>> for Root {
    fn from(value: Complex<f64>) -> Root {
        Root::new(value.re, value.im)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EquationResult
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of one evaluation. Built once by the evaluator, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationResult {
    family: EquationFamily,
    expression: String,
    domain: DomainClassification,
    roots: Vec<Root>,
    y_intercept: Option<Point2D>,
    vertex: Option<Point2D>,
    factored: Option<String>,
    domain_restriction: Option<String>
}

impl EquationResult {
    pub(crate) fn new(
        family: EquationFamily,
        expression: String,
        domain: DomainClassification
    ) -> EquationResult {
        EquationResult {
            family,
            expression,
            domain,
            roots: Vec::new(),
            y_intercept: None,
            vertex: None,
            factored: None,
            domain_restriction: None
        }
    }

    pub(crate) fn with_roots(mut self, roots: Vec<Root>) -> EquationResult {
        self.roots = roots;
        self
    }

    pub(crate) fn with_y_intercept(mut self, y: f64) -> EquationResult {
        self.y_intercept = Some(Point2D::new(0.0, y));
        self
    }

    pub(crate) fn with_vertex(mut self, vertex: Point2D) -> EquationResult {
        self.vertex = Some(vertex);
        self
    }

    pub(crate) fn with_factored(mut self, factored: String) -> EquationResult {
        self.factored = Some(factored);
        self
    }

    pub(crate) fn with_domain_restriction(mut self, restriction: &str) -> EquationResult {
        self.domain_restriction = Some(restriction.to_owned());
        self
    }

    pub fn family(&self) -> EquationFamily {
        self.family
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn domain(&self) -> DomainClassification {
        self.domain
    }

    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    /// The real roots as `(x, 0)` points.
    pub fn x_intercepts(&self) -> Vec<Point2D> {
        self.roots.iter().filter_map(Root::intercept).collect()
    }

    pub fn y_intercept(&self) -> Option<Point2D> {
        self.y_intercept
    }

    pub fn vertex(&self) -> Option<Point2D> {
        self.vertex
    }

    pub fn factored(&self) -> Option<&str> {
        self.factored.as_deref()
    }

    pub fn domain_restriction(&self) -> Option<&str> {
        self.domain_restriction.as_deref()
    }
}
