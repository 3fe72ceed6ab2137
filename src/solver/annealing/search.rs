use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, span, Level};

use crate::domain::{Problem, Solution};
use crate::evaluation::solution_cost;
use crate::solver::annealing::neighborhood::{apply, Move};

/// Simulated-annealing refinement over a single mutable current solution,
/// with the best solution seen tracked separately.
///
/// The annealer is stepwise: callers that want a deadline can call
/// `step()` themselves and take `best()` at any point. `run()` just spends
/// the configured iteration budget.
pub struct Annealer<'a> {
    problem: &'a Problem,
    current: Solution,
    best: Solution,
    temperature: f64,
    iteration: usize,
    rng: ChaCha8Rng,
    /// (iteration, cost) every time `best` improved, for convergence traces.
    best_updates: Vec<(usize, f64)>,
}

impl<'a> Annealer<'a> {
    pub fn new(problem: &'a Problem, mut initial: Solution) -> Self {
        initial.cost = solution_cost(problem, &initial);
        Annealer {
            problem,
            best: initial.clone(),
            current: initial,
            temperature: problem.config.initial_temperature,
            iteration: 0,
            rng: ChaCha8Rng::seed_from_u64(problem.config.random_seed),
            best_updates: Vec::new(),
        }
    }

    /// One annealing iteration: draw an operator, evaluate the candidate,
    /// Metropolis-accept, cool. A draw that cannot apply leaves the
    /// current state unchanged; the temperature still cools.
    pub fn step(&mut self) {
        self.iteration += 1;

        let mv = Move::draw(&mut self.rng);
        if let Some(mut candidate) = apply(&self.current, mv, &mut self.rng) {
            candidate.cost = solution_cost(self.problem, &candidate);

            // Best is tracked independently of acceptance; an infeasible
            // (infinite-cost) candidate can never displace a finite best.
            if candidate.cost < self.best.cost {
                self.best = candidate.clone();
                self.best_updates.push((self.iteration, candidate.cost));
                debug!(
                    "New best at iteration {}: cost = {:.2}",
                    self.iteration, candidate.cost
                );
            }

            let delta = candidate.cost - self.current.cost;
            let accept = delta <= 0.0
                || self.rng.gen::<f64>() < (-delta / self.temperature).exp();
            if accept {
                self.current = candidate;
            }
        }

        self.temperature *= self.problem.config.cooling_rate;
    }

    /// Spend the remaining iteration budget and return the best found.
    pub fn run(&mut self) -> &Solution {
        let budget = self.problem.config.max_iterations;
        let loop_span = span!(Level::INFO, "annealing", total_iterations = budget);
        let _guard = loop_span.enter();

        while self.iteration < budget {
            self.step();
        }

        info!(
            "Annealing complete after {} iterations: cost {:.2} ({} improvements)",
            self.iteration,
            self.best.cost,
            self.best_updates.len()
        );
        &self.best
    }

    pub fn best(&self) -> &Solution {
        &self.best
    }

    pub fn current(&self) -> &Solution {
        &self.current
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn best_updates(&self) -> &[(usize, f64)] {
        &self.best_updates
    }
}

/// Refine `initial` under the configured cooling schedule and iteration
/// budget, returning the best solution seen.
pub fn optimize(problem: &Problem, initial: Solution) -> Solution {
    let mut annealer = Annealer::new(problem, initial);
    annealer.run().clone()
}
