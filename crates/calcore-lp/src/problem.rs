use std::str::FromStr;

use crate::error::{LpError, Result};
use crate::solution::Solution;
use crate::solver::Solver;

/// Whether the objective is maximized or minimized
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Direction {
    /// Sign multiplier applied to reduced costs: a column improves the
    /// objective when `sign * sigma < 0`.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Maximize => 1.0,
            Direction::Minimize => -1.0,
        }
    }
}

impl FromStr for Direction {
    type Err = LpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "max" => Ok(Direction::Maximize),
            "min" => Ok(Direction::Minimize),
            other => Err(LpError::InvalidDirection(other.to_string())),
        }
    }
}

/// Relational operator of a constraint
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Less than or equal (<=)
    Le,
    /// Equal (=)
    Eq,
    /// Greater than or equal (>=)
    Ge,
}

impl Relation {
    /// The relation obtained by multiplying both sides by -1.
    pub fn flipped(self) -> Self {
        match self {
            Relation::Le => Relation::Ge,
            Relation::Eq => Relation::Eq,
            Relation::Ge => Relation::Le,
        }
    }
}

impl FromStr for Relation {
    type Err = LpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "<=" | "≤" => Ok(Relation::Le),
            "==" | "=" => Ok(Relation::Eq),
            ">=" | "≥" => Ok(Relation::Ge),
            other => Err(LpError::InvalidRelation(other.to_string())),
        }
    }
}

/// A single linear constraint, always stored with a non-negative right-hand side
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Coefficients for each decision variable
    pub coefficients: Vec<f64>,
    pub relation: Relation,
    /// Right-hand side value
    pub rhs: f64,
}

impl Constraint {
    /// Create a constraint, negating both sides when `rhs` is negative.
    pub fn new(coefficients: Vec<f64>, relation: Relation, rhs: f64) -> Self {
        if rhs < 0.0 {
            Self {
                coefficients: coefficients.into_iter().map(|c| -c).collect(),
                relation: relation.flipped(),
                rhs: -rhs,
            }
        } else {
            Self {
                coefficients,
                relation,
                rhs,
            }
        }
    }
}

/// A linear program over non-negative decision variables.
///
/// Built incrementally with [`LinearProgram::add_constraint`] and solved
/// with [`LinearProgram::solve`] or a configured [`Solver`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    direction: Direction,
    objective: Vec<f64>,
    constraints: Vec<Constraint>,
}

impl LinearProgram {
    /// Create a model from a direction token (`"max"` or `"min"`) and the
    /// objective coefficients.
    pub fn new(direction: &str, objective: Vec<f64>) -> Result<Self> {
        Ok(Self::with_direction(direction.parse()?, objective))
    }

    pub fn with_direction(direction: Direction, objective: Vec<f64>) -> Self {
        Self {
            direction,
            objective,
            constraints: Vec::new(),
        }
    }

    /// Add a constraint given a relation token (`<=`, `≤`, `==`, `=`, `>=`, `≥`).
    ///
    /// The coefficient count is only checked when solving.
    pub fn add_constraint(
        &mut self,
        coefficients: Vec<f64>,
        relation: &str,
        rhs: f64,
    ) -> Result<&mut Self> {
        let relation = relation.parse()?;
        self.push(Constraint::new(coefficients, relation, rhs));
        Ok(self)
    }

    pub fn push(&mut self, constraint: Constraint) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Import a block of `<=` constraints, one per row, each laid out as
    /// the coefficients followed by the right-hand side.
    ///
    /// An empty row becomes a constraint without coefficients, which
    /// `validate` later rejects.
    pub fn add_le_rows(&mut self, rows: &[Vec<f64>]) -> &mut Self {
        for row in rows {
            let (rhs, coefficients) = row.split_last().unwrap_or((&0.0, &[][..]));
            self.push(Constraint::new(coefficients.to_vec(), Relation::Le, *rhs));
        }
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Check that every constraint has one coefficient per objective term.
    pub fn validate(&self) -> Result<()> {
        for (i, c) in self.constraints.iter().enumerate() {
            if c.coefficients.len() != self.objective.len() {
                return Err(LpError::DimensionMismatch {
                    constraint: i + 1,
                    found: c.coefficients.len(),
                    expected: self.objective.len(),
                });
            }
        }
        Ok(())
    }

    /// Solve with the default [`Solver`] configuration.
    ///
    /// The default never caps iterations; degenerate models can cycle, so
    /// use a [`Solver`] with `with_max_iterations` for those.
    pub fn solve(&self) -> Result<Solution> {
        Solver::default().solve(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_tokens() {
        assert_eq!("max".parse::<Direction>().unwrap(), Direction::Maximize);
        assert_eq!("min".parse::<Direction>().unwrap(), Direction::Minimize);
        assert_eq!(
            LinearProgram::new("maximize", vec![1.0]).unwrap_err(),
            LpError::InvalidDirection("maximize".to_string())
        );
        assert!("MAX".parse::<Direction>().is_err());
    }

    #[test]
    fn test_relation_aliases() {
        for (token, expected) in [
            ("<=", Relation::Le),
            ("≤", Relation::Le),
            ("==", Relation::Eq),
            ("=", Relation::Eq),
            (">=", Relation::Ge),
            ("≥", Relation::Ge),
        ] {
            assert_eq!(token.parse::<Relation>().unwrap(), expected, "token {}", token);
        }

        let mut lp = LinearProgram::new("max", vec![1.0, 1.0]).unwrap();
        let err = lp.add_constraint(vec![1.0, 1.0], "<", 1.0).unwrap_err();
        assert_eq!(err, LpError::InvalidRelation("<".to_string()));
        assert_eq!(lp.num_constraints(), 0);
    }

    #[test]
    fn test_negative_rhs_is_normalized() {
        let mut lp = LinearProgram::new("min", vec![1.0, 1.0]).unwrap();
        lp.add_constraint(vec![-1.0, 2.0], "<=", -2.0)
            .unwrap()
            .add_constraint(vec![1.0, -3.0], ">=", -4.0)
            .unwrap()
            .add_constraint(vec![1.0, 1.0], "=", -1.0)
            .unwrap();

        let c = lp.constraints();
        assert_eq!(
            c[0],
            Constraint {
                coefficients: vec![1.0, -2.0],
                relation: Relation::Ge,
                rhs: 2.0,
            }
        );
        assert_eq!(
            c[1],
            Constraint {
                coefficients: vec![-1.0, 3.0],
                relation: Relation::Le,
                rhs: 4.0,
            }
        );
        assert_eq!(
            c[2],
            Constraint {
                coefficients: vec![-1.0, -1.0],
                relation: Relation::Eq,
                rhs: 1.0,
            }
        );
        assert!(c.iter().all(|c| c.rhs >= 0.0));
    }

    #[test]
    fn test_length_mismatch_is_lazy() {
        let mut lp = LinearProgram::new("max", vec![1.0, 2.0]).unwrap();
        lp.add_constraint(vec![1.0, 1.0], "<=", 4.0).unwrap();
        lp.add_constraint(vec![1.0], "<=", 4.0).unwrap();

        assert_eq!(
            lp.validate().unwrap_err(),
            LpError::DimensionMismatch { constraint: 2, found: 1, expected: 2 }
        );
        let err = lp.solve().unwrap_err();
        assert!(err.to_string().starts_with("Constraint 2 has 1 coefficients"), "{}", err);
    }

    #[test]
    fn test_add_le_rows() {
        let mut lp = LinearProgram::new("max", vec![3.0, 2.0]).unwrap();
        lp.add_le_rows(&[vec![1.0, 1.0, 4.0], vec![1.0, 3.0, -6.0]]);

        assert_eq!(lp.num_constraints(), 2);
        assert_eq!(lp.constraints()[0].relation, Relation::Le);
        assert_eq!(lp.constraints()[0].rhs, 4.0);
        assert_eq!(lp.constraints()[1].relation, Relation::Ge);
        assert_eq!(lp.constraints()[1].coefficients, vec![-1.0, -3.0]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let mut lp = LinearProgram::new("min", vec![1.0, 1.0]).unwrap();
        lp.add_constraint(vec![1.0, 1.0], "≥", 2.0).unwrap();

        let json = serde_json::to_string(&lp).unwrap();
        let back: LinearProgram = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lp);
    }
}
