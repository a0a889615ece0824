mod error;
mod matrix;
mod phase_one;
mod pivot;
mod problem;
mod solution;
mod solver;
mod standard;
mod trace;

pub use error::{LpError, Result};
pub use matrix::{format_vector, Matrix};
pub use pivot::PhaseOutcome;
pub use problem::{Constraint, Direction, LinearProgram, Relation};
pub use solution::{Solution, SolutionStatus};
pub use solver::Solver;
pub use trace::{LogObserver, NoopObserver, Phase, PivotEvent, SolveObserver};
