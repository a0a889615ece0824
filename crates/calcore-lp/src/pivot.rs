use crate::matrix::Matrix;
use crate::solver::Solver;
use crate::trace::{Phase, PivotEvent, SolveObserver};

/// How a single optimize pass ended
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// No column can improve the objective any further
    Optimal,
    /// An improving column has no leaving row
    Unbounded,
    /// The iteration cap was reached while still improving
    MaxIterationsExceeded,
}

/// Tableau plus the bookkeeping the simplex loop needs.
///
/// The last tableau column is the RHS. `objective` and `sigma` cover the
/// other columns.
#[derive(Debug, Clone)]
pub(crate) struct SimplexState {
    pub objective: Vec<f64>,
    /// Reduced costs, `-C[j] + sum(CB[i] * A[i][j])`
    pub sigma: Vec<f64>,
    pub tableau: Matrix,
    /// Basic column of each row
    pub basis: Vec<usize>,
    pub objective_value: f64,
    pub iterations: u32,
}

impl SimplexState {
    pub fn new(objective: Vec<f64>, tableau: Matrix, basis: Vec<usize>) -> Self {
        assert_eq!(
            objective.len() + 1,
            tableau.cols(),
            "objective must cover every non-RHS column"
        );
        assert_eq!(basis.len(), tableau.rows(), "one basic column per row");

        let mut state = Self {
            sigma: vec![0.0; objective.len()],
            objective,
            tableau,
            basis,
            objective_value: 0.0,
            iterations: 0,
        };
        state.refresh_basis();
        state.update_costs();
        state
    }

    fn rhs_col(&self) -> usize {
        self.tableau.cols() - 1
    }

    pub fn rhs(&self, row: usize) -> f64 {
        self.tableau[(row, self.rhs_col())]
    }

    /// Recompute sigma and the objective value from the current basis.
    fn update_costs(&mut self) {
        let cb: Vec<f64> = self.basis.iter().map(|&b| self.objective[b]).collect();

        for j in 0..self.objective.len() {
            let mut sig = -self.objective[j];
            for (i, &c) in cb.iter().enumerate() {
                sig += c * self.tableau[(i, j)];
            }
            self.sigma[j] = sig;
        }

        self.objective_value = cb.iter().enumerate().map(|(i, &c)| c * self.rhs(i)).sum();
    }

    /// Most improving column under `sign`, lowest index on ties.
    pub fn entering_column(&self, sign: f64, tolerance: f64) -> Option<usize> {
        let mut best_val = f64::INFINITY;
        let mut best_col = None;

        for (j, &sig) in self.sigma.iter().enumerate() {
            if sign * sig < best_val {
                best_val = sign * sig;
                best_col = Some(j);
            }
        }

        best_col.filter(|_| best_val < -tolerance)
    }

    /// Minimum ratio test. `None` means every ratio is infinite.
    pub fn leaving_row(&self, col: usize, tolerance: f64) -> Option<usize> {
        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;

        for i in 0..self.tableau.rows() {
            let val = self.tableau[(i, col)];
            let mut ratio = if val > tolerance { self.rhs(i) / val } else { f64::INFINITY };
            if ratio < 0.0 {
                ratio = f64::INFINITY;
            }
            if ratio < min_ratio {
                min_ratio = ratio;
                min_row = Some(i);
            }
        }

        min_row
    }

    /// Exchange the basic variable of `row` for `col`.
    pub fn pivot(&mut self, row: usize, col: usize) {
        let pivot_val = self.tableau[(row, col)];
        self.tableau.scale_row(row, pivot_val);

        for i in 0..self.tableau.rows() {
            if i != row {
                let factor = self.tableau[(i, col)];
                if factor != 0.0 {
                    self.tableau.sub_row_multiple(i, row, factor);
                }
            }
        }

        // Entering column is an exact unit vector
        for i in 0..self.tableau.rows() {
            self.tableau[(i, col)] = if i == row { 1.0 } else { 0.0 };
        }

        self.basis[row] = col;
        self.refresh_basis();
        self.update_costs();
    }

    /// Make sure every row's basic column is an isolated `1`.
    ///
    /// A basic column holding `-1` has its row divided by `-1`. Rows whose
    /// recorded column no longer qualifies are rescanned right to left.
    fn refresh_basis(&mut self) {
        for row in 0..self.tableau.rows() {
            match isolated_unit(&self.tableau, row, self.basis[row]) {
                Some(v) if v > 0.0 => continue,
                Some(_) if self.rhs(row) <= 0.0 => {
                    self.tableau.scale_row(row, -1.0);
                    continue;
                }
                _ => {}
            }
            if let Some(col) = self.scan_row(row) {
                self.basis[row] = col;
            }
        }
    }

    fn scan_row(&mut self, row: usize) -> Option<usize> {
        let cols = self.rhs_col();

        if let Some(col) = (0..cols)
            .rev()
            .find(|&j| isolated_unit(&self.tableau, row, j) == Some(1.0))
        {
            return Some(col);
        }

        if self.rhs(row) <= 0.0 {
            if let Some(col) = (0..cols)
                .rev()
                .find(|&j| isolated_unit(&self.tableau, row, j) == Some(-1.0))
            {
                self.tableau.scale_row(row, -1.0);
                return Some(col);
            }
        }

        None
    }

    /// Pivot until optimal, unbounded or out of iterations.
    pub fn optimize(
        &mut self,
        phase: Phase,
        sign: f64,
        config: &Solver,
        observer: &mut dyn SolveObserver,
    ) -> PhaseOutcome {
        observer.on_phase_start(phase, &self.tableau, &self.sigma);
        let outcome = self.run(phase, sign, config, observer);
        observer.on_phase_end(phase, outcome, self.objective_value);
        outcome
    }

    fn run(
        &mut self,
        phase: Phase,
        sign: f64,
        config: &Solver,
        observer: &mut dyn SolveObserver,
    ) -> PhaseOutcome {
        loop {
            let Some(col) = self.entering_column(sign, config.tolerance()) else {
                return PhaseOutcome::Optimal;
            };
            if config.max_iterations().is_some_and(|max| self.iterations >= max) {
                return PhaseOutcome::MaxIterationsExceeded;
            }
            let Some(row) = self.leaving_row(col, config.tolerance()) else {
                return PhaseOutcome::Unbounded;
            };

            self.pivot(row, col);
            self.iterations += 1;

            observer.on_pivot(&PivotEvent {
                phase,
                iteration: self.iterations,
                entering: col,
                leaving_row: row,
                objective_value: self.objective_value,
                tableau: &self.tableau,
                sigma: &self.sigma,
            });
        }
    }
}

/// `Some(±1)` if column `col` holds `±1` at `row` and zero everywhere else.
fn isolated_unit(tableau: &Matrix, row: usize, col: usize) -> Option<f64> {
    let v = tableau[(row, col)];
    if v != 1.0 && v != -1.0 {
        return None;
    }
    let isolated = tableau
        .column(col)
        .enumerate()
        .all(|(i, x)| i == row || x == 0.0);
    isolated.then_some(v)
}
