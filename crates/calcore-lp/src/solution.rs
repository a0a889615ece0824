use std::fmt;

use crate::matrix::format_vector;
use crate::pivot::SimplexState;

/// Terminal status of a solve
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// No point satisfies every constraint
    Infeasible,
    /// The objective can improve without limit
    Unbounded,
    /// The iteration cap was hit before reaching optimality
    MaxIterationsExceeded,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            SolutionStatus::Optimal => "Optimal",
            SolutionStatus::Infeasible => "Infeasible",
            SolutionStatus::Unbounded => "Unbounded",
            SolutionStatus::MaxIterationsExceeded => "MaxIterationsExceeded",
        };
        f.write_str(word)
    }
}

/// The result of solving a linear program
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolutionStatus,
    /// Infinite when no feasible point was reached
    pub objective_value: f64,
    /// Value of every decision and slack/surplus column, zero when non-basic.
    /// Empty for infeasible and unbounded problems.
    pub values: Vec<f64>,
    /// Final reduced cost of every decision and slack/surplus column
    pub reduced_costs: Vec<f64>,
    /// Pivots performed over both phases
    pub iterations: u32,
    num_variables: usize,
}

impl Solution {
    /// Read values and reduced costs off a phase-two state.
    pub(crate) fn from_state(
        status: SolutionStatus,
        state: &SimplexState,
        num_variables: usize,
        iterations: u32,
    ) -> Self {
        let mut values = vec![0.0; state.objective.len()];
        for (row, &col) in state.basis.iter().enumerate() {
            values[col] = state.rhs(row) + 0.0;
        }

        Self {
            status,
            objective_value: state.objective_value + 0.0,
            values,
            reduced_costs: state.sigma.iter().map(|s| s + 0.0).collect(),
            iterations,
            num_variables,
        }
    }

    fn without_values(
        status: SolutionStatus,
        objective_value: f64,
        iterations: u32,
        num_variables: usize,
    ) -> Self {
        Self {
            status,
            objective_value,
            values: Vec::new(),
            reduced_costs: Vec::new(),
            iterations,
            num_variables,
        }
    }

    pub(crate) fn infeasible(iterations: u32, num_variables: usize) -> Self {
        Self::without_values(SolutionStatus::Infeasible, f64::INFINITY, iterations, num_variables)
    }

    pub(crate) fn unbounded(iterations: u32, num_variables: usize, maximize: bool) -> Self {
        let objective_value = if maximize { f64::INFINITY } else { f64::NEG_INFINITY };
        Self::without_values(SolutionStatus::Unbounded, objective_value, iterations, num_variables)
    }

    /// Iteration cap hit before a feasible basis was found.
    pub(crate) fn exhausted_before_feasible(iterations: u32, num_variables: usize) -> Self {
        Self::without_values(
            SolutionStatus::MaxIterationsExceeded,
            f64::INFINITY,
            iterations,
            num_variables,
        )
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// Values of the decision variables only.
    pub fn variable_values(&self) -> &[f64] {
        &self.values[..self.num_variables.min(self.values.len())]
    }

    /// Values of the slack/surplus columns, one per constraint.
    pub fn slack_values(&self) -> &[f64] {
        &self.values[self.num_variables.min(self.values.len())..]
    }

    /// Textual report, see the [`Display`](fmt::Display) impl.
    pub fn report(&self) -> String {
        self.to_string()
    }
}

/// ```text
/// optimal value = 12
/// [4 0 0 2]
/// [0 1 3 0]
/// ```
///
/// Non-optimal outcomes print only the status word.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            SolutionStatus::Optimal => {
                writeln!(f, "optimal value = {}", self.objective_value)?;
                writeln!(f, "{}", format_vector(&self.values))?;
                write!(f, "{}", format_vector(&self.reduced_costs))
            }
            status => write!(f, "{}", status),
        }
    }
}
