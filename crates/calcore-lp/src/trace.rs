use crate::matrix::{format_vector, Matrix};
use crate::pivot::PhaseOutcome;

/// Which optimize pass an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Minimizing the sum of artificial variables
    One,
    /// Optimizing the user objective
    Two,
}

/// Snapshot taken right after a pivot
#[derive(Debug)]
pub struct PivotEvent<'a> {
    pub phase: Phase,
    /// 1-based pivot count within the phase
    pub iteration: u32,
    pub entering: usize,
    pub leaving_row: usize,
    pub objective_value: f64,
    pub tableau: &'a Matrix,
    pub sigma: &'a [f64],
}

/// Receives progress events from a solve.
///
/// Observers only see shared references and cannot steer the algorithm.
/// Every method defaults to doing nothing.
pub trait SolveObserver {
    fn on_standardized(&mut self, _tableau: &Matrix, _needs_phase_one: bool) {}

    fn on_phase_start(&mut self, _phase: Phase, _tableau: &Matrix, _sigma: &[f64]) {}

    fn on_pivot(&mut self, _event: &PivotEvent<'_>) {}

    fn on_phase_end(&mut self, _phase: Phase, _outcome: PhaseOutcome, _objective_value: f64) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}

/// Forwards solve events to the `log` facade.
///
/// Phase boundaries go to `debug`, pivots and tableaux to `trace`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SolveObserver for LogObserver {
    fn on_standardized(&mut self, tableau: &Matrix, needs_phase_one: bool) {
        log::debug!(
            "standardized {}x{} tableau, phase one {}",
            tableau.rows(),
            tableau.cols(),
            if needs_phase_one { "required" } else { "skipped" }
        );
        log::trace!("tableau: {}", tableau);
    }

    fn on_phase_start(&mut self, phase: Phase, tableau: &Matrix, sigma: &[f64]) {
        log::debug!("phase {:?} start", phase);
        log::trace!("sigma: {}", format_vector(sigma));
        log::trace!("tableau: {}", tableau);
    }

    fn on_pivot(&mut self, event: &PivotEvent<'_>) {
        log::trace!(
            "phase {:?} iteration {}: column {} enters at row {}, objective = {}",
            event.phase,
            event.iteration,
            event.entering,
            event.leaving_row,
            event.objective_value
        );
        log::trace!("sigma: {}", format_vector(event.sigma));
        log::trace!("tableau: {}", event.tableau);
    }

    fn on_phase_end(&mut self, phase: Phase, outcome: PhaseOutcome, objective_value: f64) {
        log::debug!("phase {:?} finished: {:?}, objective = {}", phase, outcome, objective_value);
    }
}
