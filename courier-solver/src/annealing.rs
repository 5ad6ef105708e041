//! Simulated-annealing delivery ordering.
//!
//! Each iteration swaps two random stops in the working order and keeps the
//! swap under the Metropolis rule. The shortest order seen at any point is
//! written back to the caller's slice once the temperature has cooled to the
//! final temperature.

use courier_core::{
    DeliveryRequest, GeoCoordinate, OptimizeError, OptimizeReport, OrderOptimizer,
    tour_length_miles,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Starting temperature of the default schedule.
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 10_000.0;
/// Fraction of the temperature removed after each iteration.
pub const DEFAULT_COOLING_FACTOR: f64 = 0.3;
/// The search stops once the temperature is at or below this value.
pub const DEFAULT_FINAL_TEMPERATURE: f64 = 1.0;
/// Longest schedule [`AnnealingSchedule::new`] accepts, in iterations.
pub const MAX_SCHEDULE_ITERATIONS: usize = 1_000_000;

/// Geometric cooling schedule.
///
/// The default schedule runs 26 iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingSchedule {
    initial_temperature: f64,
    cooling_factor: f64,
    final_temperature: f64,
}

impl Default for AnnealingSchedule {
    fn default() -> Self {
        Self {
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            cooling_factor: DEFAULT_COOLING_FACTOR,
            final_temperature: DEFAULT_FINAL_TEMPERATURE,
        }
    }
}

impl AnnealingSchedule {
    /// Validate and build a schedule.
    ///
    /// # Errors
    /// [`OptimizeError::InvalidSchedule`] when a temperature is not finite
    /// and positive, the initial temperature does not exceed the final one,
    /// the cooling factor lies outside `(0, 1)` or is too small to lower the
    /// temperature, or cooling would take more than
    /// [`MAX_SCHEDULE_ITERATIONS`] iterations.
    #[expect(
        clippy::float_arithmetic,
        reason = "checks that cooling lowers the temperature"
    )]
    pub fn new(
        initial_temperature: f64,
        cooling_factor: f64,
        final_temperature: f64,
    ) -> Result<Self, OptimizeError> {
        if !initial_temperature.is_finite() || initial_temperature <= 0.0 {
            return Err(OptimizeError::InvalidSchedule(
                "initial temperature must be finite and positive",
            ));
        }
        if !final_temperature.is_finite() || final_temperature <= 0.0 {
            return Err(OptimizeError::InvalidSchedule(
                "final temperature must be finite and positive",
            ));
        }
        if initial_temperature <= final_temperature {
            return Err(OptimizeError::InvalidSchedule(
                "initial temperature must exceed final temperature",
            ));
        }
        if !(cooling_factor > 0.0 && cooling_factor < 1.0) {
            return Err(OptimizeError::InvalidSchedule(
                "cooling factor must lie strictly between 0 and 1",
            ));
        }
        if 1.0 - cooling_factor >= 1.0 {
            return Err(OptimizeError::InvalidSchedule(
                "cooling factor is too small to lower the temperature",
            ));
        }
        let schedule = Self {
            initial_temperature,
            cooling_factor,
            final_temperature,
        };
        if schedule
            .temperatures()
            .nth(MAX_SCHEDULE_ITERATIONS)
            .is_some()
        {
            return Err(OptimizeError::InvalidSchedule(
                "schedule cools too slowly to finish",
            ));
        }
        Ok(schedule)
    }

    /// Temperature of the first iteration.
    #[must_use]
    pub const fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    /// Fraction of the temperature removed per iteration.
    #[must_use]
    pub const fn cooling_factor(&self) -> f64 {
        self.cooling_factor
    }

    /// Temperature at or below which the search stops.
    #[must_use]
    pub const fn final_temperature(&self) -> f64 {
        self.final_temperature
    }

    /// Temperatures visited, hottest first.
    #[expect(
        clippy::float_arithmetic,
        reason = "geometric cooling multiplies the temperature"
    )]
    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        let retained = 1.0 - self.cooling_factor;
        std::iter::successors(Some(self.initial_temperature), move |t| Some(t * retained))
            .take_while(|t| *t > self.final_temperature)
    }
}

/// [`OrderOptimizer`] using simulated annealing with a seeded random source.
///
/// # Examples
/// ```
/// use courier_core::{DeliveryRequest, GeoCoordinate, OrderOptimizer};
/// use courier_solver::AnnealingOptimizer;
///
/// let depot: GeoCoordinate = "0 0".parse()?;
/// let mut stops = vec![
///     DeliveryRequest::new("0 1".parse()?, "books"),
///     DeliveryRequest::new("1 1".parse()?, "tea"),
///     DeliveryRequest::new("1 0".parse()?, "lamp"),
/// ];
/// let report = AnnealingOptimizer::new(7)
///     .optimize(&depot, &mut stops)
///     .expect("non-empty input");
/// assert!(report.optimized_miles <= report.original_miles);
/// assert_eq!(stops.len(), 3);
/// # Ok::<(), courier_core::GeoCoordinateError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnnealingOptimizer {
    schedule: AnnealingSchedule,
    seed: u64,
}

impl AnnealingOptimizer {
    /// Optimizer with the default schedule and the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            schedule: AnnealingSchedule::default(),
            seed,
        }
    }

    /// Replace the cooling schedule.
    #[must_use]
    pub const fn with_schedule(self, schedule: AnnealingSchedule) -> Self {
        Self { schedule, ..self }
    }

    /// Replace the seed.
    #[must_use]
    pub const fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Active schedule.
    #[must_use]
    pub const fn schedule(&self) -> AnnealingSchedule {
        self.schedule
    }

    /// Seed used by [`OrderOptimizer::optimize`].
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Reorder `deliveries` drawing moves and acceptance thresholds from `rng`.
    ///
    /// # Errors
    /// [`OptimizeError::EmptyDeliveries`] if `deliveries` is empty; the slice
    /// is left untouched.
    pub fn optimize_with_rng<R: Rng + ?Sized>(
        &self,
        depot: &GeoCoordinate,
        deliveries: &mut [DeliveryRequest],
        rng: &mut R,
    ) -> Result<OptimizeReport, OptimizeError> {
        if deliveries.is_empty() {
            return Err(OptimizeError::EmptyDeliveries);
        }
        let count = deliveries.len();
        let original_miles = tour_length_miles(depot, deliveries);

        let mut current = deliveries.to_vec();
        let mut current_miles = original_miles;
        let mut best = current.clone();
        let mut best_miles = original_miles;
        let mut iterations = 0_u32;

        for temperature in self.schedule.temperatures() {
            iterations += 1;
            let first = rng.gen_range(0..count);
            let second = rng.gen_range(0..count);
            current.swap(first, second);
            let candidate_miles = tour_length_miles(depot, &current);
            let threshold: f64 = rng.r#gen();
            if acceptance_probability(current_miles, candidate_miles, temperature) > threshold {
                current_miles = candidate_miles;
            } else {
                current.swap(first, second);
            }
            if current_miles < best_miles {
                best.clone_from(&current);
                best_miles = current_miles;
            }
        }

        deliveries.clone_from_slice(&best);
        log::debug!(
            "annealing over {count} stops: {original_miles:.3} -> {best_miles:.3} miles in {iterations} iterations"
        );
        Ok(OptimizeReport {
            original_miles,
            optimized_miles: best_miles,
            iterations,
        })
    }
}

impl OrderOptimizer for AnnealingOptimizer {
    fn optimize(
        &self,
        depot: &GeoCoordinate,
        deliveries: &mut [DeliveryRequest],
    ) -> Result<OptimizeReport, OptimizeError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.optimize_with_rng(depot, deliveries, &mut rng)
    }
}

/// Metropolis acceptance probability for moving from `current` to
/// `candidate` tour length at `temperature`.
#[expect(
    clippy::float_arithmetic,
    reason = "the Metropolis criterion is defined over real-valued energies"
)]
fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    if candidate < current {
        1.0
    } else {
        ((current - candidate) / temperature).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::test_support::grid_deliveries;
    use rstest::{fixture, rstest};

    fn coordinate(text: &str) -> GeoCoordinate {
        text.parse().expect("valid coordinate")
    }

    #[fixture]
    fn stops() -> Vec<DeliveryRequest> {
        grid_deliveries(&[(0, 5), (4, 1), (2, 2), (5, 5), (1, 4), (3, 0)], 0.01)
    }

    fn sorted_items(stops: &[DeliveryRequest]) -> Vec<String> {
        let mut items: Vec<String> = stops.iter().map(|s| s.item.clone()).collect();
        items.sort();
        items
    }

    #[rstest]
    fn default_schedule_runs_twenty_six_iterations() {
        assert_eq!(AnnealingSchedule::default().temperatures().count(), 26);
    }

    #[rstest]
    #[case(0.0, 0.3, 1.0)]
    #[case(f64::INFINITY, 0.3, 1.0)]
    #[case(10.0, 0.3, 0.0)]
    #[case(10.0, 0.3, 10.0)]
    #[case(10.0, 0.0, 1.0)]
    #[case(10.0, 1.0, 1.0)]
    #[case(10.0, f64::NAN, 1.0)]
    #[case(10.0, 1e-17, 1.0)]
    #[case(1e300, 1e-9, 1e-300)]
    fn invalid_schedules_are_rejected(
        #[case] initial: f64,
        #[case] cooling: f64,
        #[case] last: f64,
    ) {
        assert!(matches!(
            AnnealingSchedule::new(initial, cooling, last),
            Err(OptimizeError::InvalidSchedule(_))
        ));
    }

    #[rstest]
    fn slow_but_bounded_schedule_is_accepted() {
        let schedule = AnnealingSchedule::new(10.0, 1e-4, 1.0).expect("finite schedule");
        let iterations = schedule.temperatures().count();
        assert!(iterations > 20_000);
        assert!(iterations <= MAX_SCHEDULE_ITERATIONS);
    }

    #[rstest]
    fn improvement_is_always_accepted() {
        assert!((acceptance_probability(10.0, 9.0, 0.001) - 1.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn worsening_probability_falls_with_temperature() {
        let hot = acceptance_probability(10.0, 11.0, 10_000.0);
        let cold = acceptance_probability(10.0, 11.0, 0.01);
        assert!(hot > 0.99 && hot < 1.0);
        assert!(cold < 1e-9);
    }

    #[rstest]
    fn empty_input_is_an_error() {
        let mut none: Vec<DeliveryRequest> = Vec::new();
        let result = AnnealingOptimizer::new(1).optimize(&coordinate("0 0"), &mut none);
        assert_eq!(result, Err(OptimizeError::EmptyDeliveries));
    }

    #[rstest]
    fn single_stop_is_unchanged() {
        let depot = coordinate("0 0");
        let mut one = vec![DeliveryRequest::new(coordinate("0 1"), "solo")];
        let report = AnnealingOptimizer::new(3)
            .optimize(&depot, &mut one)
            .expect("one stop");
        assert_eq!(one[0].item, "solo");
        assert!((report.original_miles - report.optimized_miles).abs() < f64::EPSILON);
        assert_eq!(report.iterations, 26);
    }

    #[rstest]
    fn result_is_a_permutation_and_never_worse(mut stops: Vec<DeliveryRequest>) {
        let depot = coordinate("0 0");
        let before = sorted_items(&stops);
        let report = AnnealingOptimizer::new(11)
            .optimize(&depot, &mut stops)
            .expect("non-empty");
        assert_eq!(sorted_items(&stops), before);
        assert!(report.optimized_miles <= report.original_miles);
        assert!((tour_length_miles(&depot, &stops) - report.optimized_miles).abs() < 1e-9);
    }

    #[rstest]
    fn same_seed_gives_same_order(stops: Vec<DeliveryRequest>) {
        let depot = coordinate("0 0");
        let optimizer = AnnealingOptimizer::new(42);
        let mut first = stops.clone();
        let mut second = stops;
        optimizer.optimize(&depot, &mut first).expect("non-empty");
        optimizer.optimize(&depot, &mut second).expect("non-empty");
        assert_eq!(first, second);
    }

    #[rstest]
    fn custom_schedule_controls_iteration_count(mut stops: Vec<DeliveryRequest>) {
        let schedule = AnnealingSchedule::new(100.0, 0.5, 1.0).expect("valid");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = AnnealingOptimizer::default()
            .with_schedule(schedule)
            .optimize_with_rng(&coordinate("0 0"), &mut stops, &mut rng)
            .expect("non-empty");
        // 100, 50, 25, 12.5, 6.25, 3.125, 1.5625
        assert_eq!(report.iterations, 7);
    }
}
