//! Distance and pheromone matrices.

use crate::error::InvalidInput;

/// Immutable square matrix of travel costs between cities.
///
/// Symmetry is conventional and not enforced. Every entry must be finite
/// and non-negative, and every off-diagonal entry strictly positive since
/// the heuristic term `1 / d(i,j)` is undefined for zero distances.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")
)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from row vectors, validating every entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_stochopt::aco::DistanceMatrix;
    ///
    /// let m = DistanceMatrix::from_rows(vec![
    ///     vec![0.0, 2.0],
    ///     vec![2.0, 0.0],
    /// ]).unwrap();
    /// assert_eq!(m.len(), 2);
    /// assert_eq!(m.get(0, 1), 2.0);
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, InvalidInput> {
        let n = rows.len();
        if n == 0 {
            return Err(InvalidInput::EmptyMatrix);
        }
        if n < 2 {
            return Err(InvalidInput::TooFewCities { n });
        }

        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(InvalidInput::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: n,
                });
            }
            for (j, &value) in row.iter().enumerate() {
                let valid = value.is_finite() && value >= 0.0 && (i == j || value > 0.0);
                if !valid {
                    return Err(InvalidInput::InvalidDistance {
                        from: i,
                        to: j,
                        value,
                    });
                }
            }
            data.extend(row);
        }

        Ok(Self { n, data })
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false: a valid matrix has at least two cities.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance from `from` to `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Closed length of a tour, including the edge back to the start.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        tour_length(self, tour)
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = InvalidInput;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.data.chunks(matrix.n).map(<[f64]>::to_vec).collect()
    }
}

/// Closed length of `tour`: consecutive edges plus the edge from the last
/// city back to the first. Returns 0 for an empty tour.
pub fn tour_length(distances: &DistanceMatrix, tour: &[usize]) -> f64 {
    match (tour.first(), tour.last()) {
        (Some(&first), Some(&last)) => {
            let open: f64 = tour
                .windows(2)
                .map(|w| distances.get(w[0], w[1]))
                .sum();
            open + distances.get(last, first)
        }
        _ => 0.0,
    }
}

/// Learned desirability of every directed edge.
///
/// Entries start at a positive level and stay strictly positive: the
/// update only multiplies by a factor in (0, 1) and adds positive deposits,
/// and evaporation is floored at `f64::MIN_POSITIVE`.
///
/// Serializable for inspection only; trails are never loaded back in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PheromoneMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an `n x n` matrix with every entry set to `level`.
    pub fn new(n: usize, level: f64) -> Self {
        Self {
            n,
            data: vec![level; n * n],
        }
    }

    /// Matrix dimension.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Smallest entry.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Iterates over all entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Multiplies every entry by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for tau in &mut self.data {
            *tau = (*tau * keep).max(f64::MIN_POSITIVE);
        }
    }

    /// Adds `amount` to both directions of every edge of a closed tour.
    pub fn deposit(&mut self, tour: &[usize], amount: f64) {
        let (Some(&first), Some(&last)) = (tour.first(), tour.last()) else {
            return;
        };
        let n = self.n;
        let edges = tour
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(std::iter::once((last, first)));
        for (a, b) in edges {
            self.data[a * n + b] += amount;
            self.data[b * n + a] += amount;
        }
    }

    /// Batch update for one iteration: evaporate once, then every ant
    /// deposits `q / length` along its tour.
    pub fn update(&mut self, tours: &[Vec<usize>], lengths: &[f64], evaporation: f64, q: f64) {
        debug_assert_eq!(tours.len(), lengths.len());
        self.evaporate(evaporation);
        for (tour, &length) in tours.iter().zip(lengths) {
            self.deposit(tour, q / length);
        }
    }
}
