use crate::error::Result;
use crate::phase_one::{self, PhaseOne};
use crate::pivot::{PhaseOutcome, SimplexState};
use crate::problem::{Direction, LinearProgram};
use crate::solution::{Solution, SolutionStatus};
use crate::standard::StandardForm;
use crate::trace::{NoopObserver, Phase, SolveObserver};

/// Two-phase simplex solver for linear programming problems
///
/// Pivoting follows Dantzig's rule with lowest-index ties, which can cycle
/// on degenerate models. The default has no iteration cap, so set
/// [`Solver::with_max_iterations`] when a model may be degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solver {
    /// Pivot cap applied to each phase, unlimited when `None`
    max_iterations: Option<u32>,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: None,
            tolerance: 1e-9,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn max_iterations(&self) -> Option<u32> {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve the LP problem using the two-phase simplex method
    pub fn solve(&self, problem: &LinearProgram) -> Result<Solution> {
        self.solve_with(problem, &mut NoopObserver)
    }

    /// Solve while reporting progress to `observer`.
    ///
    /// Every call builds a fresh tableau, so repeated solves of the same
    /// program give identical results.
    pub fn solve_with(
        &self,
        problem: &LinearProgram,
        observer: &mut dyn SolveObserver,
    ) -> Result<Solution> {
        problem.validate()?;

        let n_vars = problem.num_variables();
        let maximize = problem.direction() == Direction::Maximize;

        let form = StandardForm::new(problem);
        observer.on_standardized(&form.tableau, form.needs_phase_one());
        let width = form.artificial_start();

        // Phase 1: find an initial basic feasible solution
        let (tableau, basis, phase_one_iterations) = if form.needs_phase_one() {
            match phase_one::solve(form, self, observer) {
                PhaseOne::Feasible { tableau, basis, iterations } => (tableau, basis, iterations),
                PhaseOne::Infeasible { iterations } => {
                    return Ok(Solution::infeasible(iterations, n_vars));
                }
                PhaseOne::MaxIterationsExceeded { iterations } => {
                    return Ok(Solution::exhausted_before_feasible(iterations, n_vars));
                }
            }
        } else {
            (form.tableau, form.basis, 0)
        };

        // Phase 2: optimize the user objective over decision and slack columns
        let mut objective = vec![0.0; width];
        objective[..n_vars].copy_from_slice(problem.objective());

        let mut state = SimplexState::new(objective, tableau, basis);
        let outcome = state.optimize(Phase::Two, problem.direction().sign(), self, observer);
        let iterations = phase_one_iterations + state.iterations;

        let solution = match outcome {
            PhaseOutcome::Optimal => {
                Solution::from_state(SolutionStatus::Optimal, &state, n_vars, iterations)
            }
            PhaseOutcome::Unbounded => Solution::unbounded(iterations, n_vars, maximize),
            PhaseOutcome::MaxIterationsExceeded => {
                let status = SolutionStatus::MaxIterationsExceeded;
                Solution::from_state(status, &state, n_vars, iterations)
            }
        };
        Ok(solution)
    }
}
