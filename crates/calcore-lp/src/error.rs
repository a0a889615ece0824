use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LpError {
    #[error("Invalid objective direction `{0}`: expected `max` or `min`")]
    InvalidDirection(String),
    #[error("Invalid relation `{0}`: expected one of <=, ≤, ==, =, >=, ≥")]
    InvalidRelation(String),
    #[error("Constraint {constraint} has {found} coefficients but the objective has {expected}")]
    DimensionMismatch {
        /// 1-based position of the offending constraint
        constraint: usize,
        found: usize,
        expected: usize,
    },
}

pub type Result<T, E = LpError> = std::result::Result<T, E>;
