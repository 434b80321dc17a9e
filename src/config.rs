/// Limits that keep solving bounded on pathological input.
///
/// Every limit turns into an [`Unsupported`](crate::Unsupported) reason when
/// exceeded, never into an approximate answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Highest polynomial degree allowed in any numerator or denominator.
    pub max_degree: usize,
    /// Maximum number of absolute-value case splits along one branch.
    pub max_abs_splits: usize,
    /// Maximum number of nodes in the expression `lhs - rhs`.
    pub max_expression_size: usize,
    /// Largest integer whose divisors or square factors are enumerated.
    pub max_factor_magnitude: u64,
    /// Most rational root candidates tried on one polynomial.
    pub max_root_candidates: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_degree: 16,
            max_abs_splits: 6,
            max_expression_size: 512,
            max_factor_magnitude: 1_000_000_000_000,
            max_root_candidates: 10_000,
        }
    }
}
