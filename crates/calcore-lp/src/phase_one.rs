use crate::matrix::Matrix;
use crate::pivot::{PhaseOutcome, SimplexState};
use crate::problem::Direction;
use crate::solver::Solver;
use crate::standard::StandardForm;
use crate::trace::{Phase, SolveObserver};

/// Result of the feasibility pass
#[derive(Debug, Clone)]
pub(crate) enum PhaseOne {
    /// A feasible basis without artificial columns
    Feasible { tableau: Matrix, basis: Vec<usize>, iterations: u32 },
    Infeasible { iterations: u32 },
    MaxIterationsExceeded { iterations: u32 },
}

/// Minimize the sum of the artificial variables of `form`.
///
/// On success the artificial columns are dropped and the RHS stays the
/// last column.
pub(crate) fn solve(
    form: StandardForm,
    config: &Solver,
    observer: &mut dyn SolveObserver,
) -> PhaseOne {
    let art_start = form.artificial_start();
    let width = form.tableau.cols() - 1;

    let mut objective = vec![0.0; width];
    for c in &mut objective[art_start..] {
        *c = 1.0;
    }

    let mut state = SimplexState::new(objective, form.tableau, form.basis);
    let outcome = state.optimize(Phase::One, Direction::Minimize.sign(), config, observer);
    let iterations = state.iterations;

    match outcome {
        PhaseOutcome::Optimal => {}
        // the auxiliary problem is bounded below by zero
        PhaseOutcome::Unbounded => return PhaseOne::Infeasible { iterations },
        PhaseOutcome::MaxIterationsExceeded => {
            return PhaseOne::MaxIterationsExceeded { iterations };
        }
    }

    if state.objective_value.abs() > config.tolerance() {
        return PhaseOne::Infeasible { iterations };
    }

    drive_out_artificials(&mut state, art_start, config.tolerance());

    let rhs: Vec<f64> = state.tableau.column(width).collect();
    let tableau = state.tableau.select_columns(0..art_start).with_column(&rhs);

    PhaseOne::Feasible {
        tableau,
        basis: state.basis,
        iterations,
    }
}

/// Replace artificial variables left in the basis at zero level.
///
/// Rows with no usable entry outside the artificial columns are redundant
/// and get removed.
fn drive_out_artificials(state: &mut SimplexState, art_start: usize, tolerance: f64) {
    let rhs_col = state.tableau.cols() - 1;
    let mut row = 0;

    while row < state.tableau.rows() {
        if state.basis[row] < art_start {
            row += 1;
            continue;
        }

        match (0..art_start).find(|&j| state.tableau[(row, j)].abs() > tolerance) {
            Some(col) => {
                state.pivot(row, col);
                state.tableau[(row, rhs_col)] = 0.0;
                row += 1;
            }
            None => {
                state.tableau.remove_row(row);
                state.basis.remove(row);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::LinearProgram;
    use crate::trace::NoopObserver;

    fn run(lp: &LinearProgram) -> PhaseOne {
        solve(StandardForm::new(lp), &Solver::new(), &mut NoopObserver)
    }

    #[test]
    fn test_feasible_basis_drops_artificials() {
        // x1 + x2 >= 2
        let mut lp = LinearProgram::new("min", vec![1.0, 1.0]).unwrap();
        lp.add_constraint(vec![1.0, 1.0], ">=", 2.0).unwrap();

        match run(&lp) {
            PhaseOne::Feasible { tableau, basis, iterations } => {
                assert_eq!(tableau.to_string(), "[1 1 -1 2]");
                assert_eq!(basis, vec![0]);
                assert_eq!(iterations, 1);
            }
            other => panic!("expected feasible, got {:?}", other),
        }
    }

    #[test]
    fn test_infeasible() {
        // x1 + x2 <= 1 and x1 + x2 >= 3
        let mut lp = LinearProgram::new("max", vec![1.0, 1.0]).unwrap();
        lp.add_constraint(vec![1.0, 1.0], "<=", 1.0).unwrap();
        lp.add_constraint(vec![1.0, 1.0], ">=", 3.0).unwrap();

        assert!(matches!(run(&lp), PhaseOne::Infeasible { .. }));
    }

    #[test]
    fn test_zero_level_artificial_is_driven_out() {
        // x1 + x2 = 1 and x1 + x2 >= 1 leave the second artificial basic at zero
        let mut lp = LinearProgram::new("max", vec![1.0, 1.0]).unwrap();
        lp.add_constraint(vec![1.0, 1.0], "=", 1.0).unwrap();
        lp.add_constraint(vec![1.0, 1.0], ">=", 1.0).unwrap();

        match run(&lp) {
            PhaseOne::Feasible { tableau, basis, .. } => {
                assert_eq!(tableau.to_string(), "[1 1 0 0 1;0 0 0 1 0]");
                assert_eq!(basis, vec![0, 3]);
            }
            other => panic!("expected feasible, got {:?}", other),
        }
    }

    #[test]
    fn test_redundant_row_is_removed() {
        let mut lp = LinearProgram::new("min", vec![1.0, 0.0]).unwrap();
        lp.add_constraint(vec![1.0, 1.0], "=", 2.0).unwrap();
        lp.add_constraint(vec![2.0, 2.0], "=", 4.0).unwrap();

        match run(&lp) {
            PhaseOne::Feasible { tableau, basis, .. } => {
                assert_eq!(tableau.rows(), 1);
                assert_eq!(tableau.to_string(), "[1 1 0 0 2]");
                assert_eq!(basis, vec![0]);
            }
            other => panic!("expected feasible, got {:?}", other),
        }
    }

    #[test]
    fn test_iteration_cap() {
        let mut lp = LinearProgram::new("min", vec![1.0, 1.0]).unwrap();
        lp.add_constraint(vec![1.0, 1.0], ">=", 2.0).unwrap();

        let config = Solver::new().with_max_iterations(0);
        let outcome = solve(StandardForm::new(&lp), &config, &mut NoopObserver);
        assert!(matches!(outcome, PhaseOne::MaxIterationsExceeded { iterations: 0 }));
    }
}
