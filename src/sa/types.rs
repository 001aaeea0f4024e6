//! Points and objective functions.

/// A candidate in the plane together with its objective value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Objective value at `(x, y)`. Lower is better.
    pub value: f64,
}

impl Point {
    /// Evaluates `objective` at `(x, y)`.
    pub fn evaluate<O: PointObjective + ?Sized>(objective: &O, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            value: objective.evaluate(x, y),
        }
    }

    /// `(x, y, value)`.
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.value)
    }
}

/// A scalar function of a 2D point, minimized by the annealer.
///
/// Any `Fn(f64, f64) -> f64` closure is an objective.
///
/// # Examples
///
/// ```
/// use u_stochopt::sa::PointObjective;
///
/// let sphere = |x: f64, y: f64| x * x + y * y;
/// assert_eq!(sphere.evaluate(3.0, 4.0), 25.0);
/// ```
pub trait PointObjective {
    /// Objective value at `(x, y)`. Lower is better.
    fn evaluate(&self, x: f64, y: f64) -> f64;
}

impl<F> PointObjective for F
where
    F: Fn(f64, f64) -> f64,
{
    fn evaluate(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// `f(x, y) = 1 / (1 + x^2 + y^2)`, bounded in (0, 1].
///
/// Its maximum 1 sits at the origin and it decays toward 0 in every
/// direction, so minimizing it pushes the search outward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InverseParaboloid;

impl PointObjective for InverseParaboloid {
    fn evaluate(&self, x: f64, y: f64) -> f64 {
        1.0 / (1.0 + x * x + y * y)
    }
}
