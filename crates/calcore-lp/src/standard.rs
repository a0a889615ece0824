use crate::matrix::Matrix;
use crate::problem::{LinearProgram, Relation};

/// A model expanded into equality form with slack, surplus and artificial columns.
///
/// Column layout: decision variables, one slack/surplus column per
/// constraint, one artificial column per `>=` or `=` constraint, RHS.
#[derive(Debug, Clone)]
pub(crate) struct StandardForm {
    pub tableau: Matrix,
    /// Starting basic column of each row
    pub basis: Vec<usize>,
    /// Row each artificial column was seeded from
    pub artificial_rows: Vec<usize>,
    pub num_variables: usize,
    pub num_constraints: usize,
}

impl StandardForm {
    /// Expects a validated program.
    pub fn new(problem: &LinearProgram) -> Self {
        let n_vars = problem.num_variables();
        let n_constraints = problem.num_constraints();

        let n_artificial = problem
            .constraints()
            .iter()
            .filter(|c| match c.relation {
                Relation::Le => false,
                Relation::Ge | Relation::Eq => true,
            })
            .count();

        let total_cols = n_vars + n_constraints + n_artificial + 1;
        let rhs_col = total_cols - 1;

        let mut tableau = Matrix::zeros(n_constraints, total_cols);
        let mut basis = vec![0; n_constraints];
        let mut artificial_rows = Vec::with_capacity(n_artificial);
        let mut artificial_idx = n_vars + n_constraints;

        for (i, c) in problem.constraints().iter().enumerate() {
            for (j, &coef) in c.coefficients.iter().enumerate() {
                tableau[(i, j)] = coef;
            }
            tableau[(i, rhs_col)] = c.rhs;

            let slack_idx = n_vars + i;
            match c.relation {
                Relation::Le => {
                    tableau[(i, slack_idx)] = 1.0;
                    basis[i] = slack_idx;
                }
                Relation::Ge => {
                    tableau[(i, slack_idx)] = -1.0; // surplus
                    tableau[(i, artificial_idx)] = 1.0;
                    basis[i] = artificial_idx;
                    artificial_rows.push(i);
                    artificial_idx += 1;
                }
                Relation::Eq => {
                    // no balancing variable, the slack column stays zero
                    tableau[(i, artificial_idx)] = 1.0;
                    basis[i] = artificial_idx;
                    artificial_rows.push(i);
                    artificial_idx += 1;
                }
            }
        }

        Self {
            tableau,
            basis,
            artificial_rows,
            num_variables: n_vars,
            num_constraints: n_constraints,
        }
    }

    /// Index of the first artificial column.
    pub fn artificial_start(&self) -> usize {
        self.num_variables + self.num_constraints
    }

    pub fn needs_phase_one(&self) -> bool {
        !self.artificial_rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_le_constraints() {
        let mut lp = LinearProgram::new("max", vec![3.0, 2.0]).unwrap();
        lp.add_constraint(vec![1.0, 1.0], "<=", 4.0).unwrap();
        lp.add_constraint(vec![1.0, 3.0], "<=", 6.0).unwrap();

        let std = StandardForm::new(&lp);
        assert!(!std.needs_phase_one());
        assert_eq!(std.tableau.to_string(), "[1 1 1 0 4;1 3 0 1 6]");
        assert_eq!(std.basis, vec![2, 3]);
    }

    #[test]
    fn test_mixed_layout() {
        let mut lp = LinearProgram::new("min", vec![1.0, 2.0]).unwrap();
        lp.add_constraint(vec![1.0, 1.0], ">=", 2.0).unwrap();
        lp.add_constraint(vec![1.0, 0.0], "<=", 5.0).unwrap();
        lp.add_constraint(vec![0.0, 1.0], "=", 1.0).unwrap();

        let std = StandardForm::new(&lp);
        assert!(std.needs_phase_one());
        assert_eq!(std.artificial_rows.len(), 2);
        assert_eq!(std.artificial_start(), 5);
        assert_eq!(std.artificial_rows, vec![0, 2]);
        assert_eq!(std.basis, vec![5, 3, 6]);
        assert_eq!(
            std.tableau.to_string(),
            "[1 1 -1 0 0 1 0 2;1 0 0 1 0 0 0 5;0 1 0 0 0 0 1 1]"
        );
    }

    #[test]
    fn test_flipped_rhs_gets_artificial() {
        let mut lp = LinearProgram::new("max", vec![1.0]).unwrap();
        lp.add_constraint(vec![-1.0], "<=", -3.0).unwrap();

        let std = StandardForm::new(&lp);
        assert!(std.needs_phase_one());
        assert_eq!(std.tableau.to_string(), "[1 -1 1 3]");
    }
}
