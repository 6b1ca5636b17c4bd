//! The genetic algorithm core.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use common::Result;

use crate::config::{Constraints, GaConfig};

/// Weight-sum tolerance for the simplex invariant.
const WEIGHT_TOLERANCE: f64 = 1e-6;

// ── Public Types ──────────────────────────────────────────────────────

/// Per-asset inputs to one optimizer run. The return and risk terms are
/// fixed for the duration of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetProfile {
    pub id: String,
    pub expected_return: f64,
    pub risk: f64,
    pub liquidity: f64,
}

/// A candidate allocation: one weight per asset, summing to 1 within
/// floating tolerance.
#[derive(Debug, Clone)]
pub struct Chromosome {
    weights: Vec<f64>,
}

impl Chromosome {
    fn random(assets: usize, rng: &mut ChaCha8Rng) -> Self {
        let mut chromosome = Self {
            weights: (0..assets).map(|_| rng.gen::<f64>()).collect(),
        };
        chromosome.normalize();
        chromosome
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Scale weights back onto the simplex. A degenerate all-zero
    /// chromosome becomes the uniform allocation.
    fn normalize(&mut self) {
        let sum: f64 = self.weights.iter().sum();
        if sum <= f64::EPSILON {
            let uniform = 1.0 / self.weights.len() as f64;
            self.weights.iter_mut().for_each(|w| *w = uniform);
        } else {
            self.weights.iter_mut().for_each(|w| *w /= sum);
        }
        debug_assert!(
            (self.weights.iter().sum::<f64>() - 1.0).abs() < WEIGHT_TOLERANCE,
            "chromosome left the simplex"
        );
    }

    /// Per-asset uniform crossover, then renormalize.
    fn crossover(p1: &Self, p2: &Self, crossover_rate: f64, rng: &mut ChaCha8Rng) -> Self {
        let weights = p1
            .weights
            .iter()
            .zip(p2.weights.iter())
            .map(|(&a, &b)| if rng.gen::<f64>() < crossover_rate { a } else { b })
            .collect();
        let mut child = Self { weights };
        child.normalize();
        child
    }

    /// Per-asset bounded perturbation, then renormalize.
    fn mutate(&mut self, mutation_rate: f64, step: f64, rng: &mut ChaCha8Rng) {
        let mut touched = false;
        for w in self.weights.iter_mut() {
            if rng.gen::<f64>() < mutation_rate {
                *w = (*w + rng.gen_range(-step..=step)).clamp(0.0, 1.0);
                touched = true;
            }
        }
        if touched {
            self.normalize();
        }
    }
}

/// Final result of one optimizer run.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationOutcome {
    /// Best allocation seen across all generations.
    pub best_weights: BTreeMap<String, f64>,
    pub best_fitness: f64,
    pub generations_run: u32,
}

// ── Optimizer ─────────────────────────────────────────────────────────

/// Run the genetic search.
///
/// `fitness_terms` supplies the per-asset (expected return, risk) pair;
/// it is evaluated once per asset up front so the fitness landscape is
/// fixed for the whole run. `on_progress` is advisory only — it receives
/// `(generation, best_fitness_so_far)` every `progress_interval`
/// generations and cannot alter the trajectory.
pub fn optimize_portfolio<F>(
    assets: &[AssetProfile],
    fitness_terms: F,
    constraints: &Constraints,
    config: &GaConfig,
    mut on_progress: Option<&mut dyn FnMut(u32, f64)>,
) -> Result<OptimizationOutcome>
where
    F: Fn(&AssetProfile) -> (f64, f64),
{
    constraints.validate(assets)?;

    let terms: Vec<(f64, f64)> = assets.iter().map(&fitness_terms).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let population_size = config.population_size.max(2);
    let total_generations = config.generations.max(1);

    info!(
        "optimizing {} assets: {} generations x {} chromosomes (seed {})",
        assets.len(),
        total_generations,
        population_size,
        config.seed
    );

    let mut population: Vec<Chromosome> = (0..population_size)
        .map(|_| Chromosome::random(assets.len(), &mut rng))
        .collect();

    let mut best: Option<(Chromosome, f64)> = None;
    let mut generations_run = 0;

    for generation in 0..total_generations {
        generations_run = generation + 1;

        let scores: Vec<f64> = population.iter().map(|c| fitness(c, &terms)).collect();

        // Track the global best so mutation drift can never lose it.
        for (chromosome, &score) in population.iter().zip(scores.iter()) {
            if best.as_ref().map_or(true, |(_, b)| score > *b) {
                best = Some((chromosome.clone(), score));
            }
        }
        let best_fitness = best.as_ref().map(|(_, f)| *f).unwrap_or(0.0);

        if config.progress_interval > 0 && generations_run % config.progress_interval == 0 {
            debug!(
                "generation {}/{}: best fitness {:.6}",
                generations_run, total_generations, best_fitness
            );
            if let Some(callback) = on_progress.as_mut() {
                callback(generations_run, best_fitness);
            }
        }

        if generations_run == total_generations {
            break;
        }

        // Breed the next generation: elites unchanged, the rest from
        // roulette-selected parents.
        let mut ranked: Vec<usize> = (0..population.len()).collect();
        ranked.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let elite_count = ((config.elitism_rate * population_size as f64).ceil() as usize)
            .clamp(1, population_size);

        let mut next = Vec::with_capacity(population_size);
        for &idx in ranked.iter().take(elite_count) {
            next.push(population[idx].clone());
        }
        while next.len() < population_size {
            let p1 = roulette_select(&population, &scores, &mut rng);
            let p2 = roulette_select(&population, &scores, &mut rng);
            let mut child = Chromosome::crossover(p1, p2, config.crossover_rate, &mut rng);
            child.mutate(config.mutation_rate, config.mutation_step, &mut rng);
            next.push(child);
        }
        population = next;
    }

    let (chromosome, best_fitness) = best.expect("at least one generation ran");
    let best_weights = assets
        .iter()
        .zip(chromosome.weights.iter())
        .map(|(a, &w)| (a.id.clone(), w))
        .collect();

    Ok(OptimizationOutcome {
        best_weights,
        best_fitness,
        generations_run,
    })
}

/// `Σ w_i * (return_i - 0.5 * risk_i)`, clamped to >= 0.
fn fitness(chromosome: &Chromosome, terms: &[(f64, f64)]) -> f64 {
    chromosome
        .weights
        .iter()
        .zip(terms.iter())
        .map(|(w, (expected_return, risk))| w * (expected_return - 0.5 * risk))
        .sum::<f64>()
        .max(0.0)
}

/// Fitness-proportionate selection, falling back to a uniform pick when
/// the whole population has zero fitness.
fn roulette_select<'a>(
    population: &'a [Chromosome],
    scores: &[f64],
    rng: &mut ChaCha8Rng,
) -> &'a Chromosome {
    let total: f64 = scores.iter().sum();
    if total <= 0.0 {
        return &population[rng.gen_range(0..population.len())];
    }
    let spin = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (chromosome, &score) in population.iter().zip(scores.iter()) {
        cumulative += score;
        if cumulative >= spin {
            return chromosome;
        }
    }
    // Floating accumulation can land a hair short of the last slot.
    population.last().expect("non-empty population")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_asset(id: &str, expected_return: f64, risk: f64) -> AssetProfile {
        AssetProfile {
            id: id.into(),
            expected_return,
            risk,
            liquidity: 0.8,
        }
    }

    fn profile_terms(asset: &AssetProfile) -> (f64, f64) {
        (asset.expected_return, asset.risk)
    }

    fn small_config(seed: u64) -> GaConfig {
        GaConfig {
            population_size: 30,
            generations: 20,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_weight_sum_invariant_through_all_operators() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let a = Chromosome::random(6, &mut rng);
            assert!((a.weights().iter().sum::<f64>() - 1.0).abs() < WEIGHT_TOLERANCE);

            let b = Chromosome::random(6, &mut rng);
            let mut child = Chromosome::crossover(&a, &b, 0.8, &mut rng);
            assert!((child.weights().iter().sum::<f64>() - 1.0).abs() < WEIGHT_TOLERANCE);

            child.mutate(0.5, 0.05, &mut rng);
            assert!((child.weights().iter().sum::<f64>() - 1.0).abs() < WEIGHT_TOLERANCE);
        }
    }

    #[test]
    fn test_single_asset_gets_full_weight() {
        let assets = vec![make_asset("A", 0.2, 0.1)];
        let outcome = optimize_portfolio(
            &assets,
            profile_terms,
            &Constraints::default(),
            &small_config(1),
            None,
        )
        .unwrap();
        assert!((outcome.best_weights["A"] - 1.0).abs() < WEIGHT_TOLERANCE);
    }

    #[test]
    fn test_seed_determinism() {
        let assets = vec![
            make_asset("A", 0.3, 0.1),
            make_asset("B", 0.1, 0.4),
            make_asset("C", 0.2, 0.2),
        ];
        let run = |seed| {
            optimize_portfolio(
                &assets,
                profile_terms,
                &Constraints::default(),
                &small_config(seed),
                None,
            )
            .unwrap()
        };
        let a = run(42);
        let b = run(42);
        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.best_weights, b.best_weights);

        let c = run(43);
        // Different seeds explore differently; fitness may coincide but
        // the weight vectors almost surely differ.
        assert!(c.best_weights != a.best_weights || c.best_fitness != a.best_fitness);
    }

    #[test]
    fn test_favors_high_return_low_risk_asset() {
        let assets = vec![
            make_asset("GOOD", 0.5, 0.1),
            make_asset("BAD", 0.05, 0.9),
        ];
        let config = GaConfig {
            population_size: 60,
            generations: 60,
            seed: 3,
            ..Default::default()
        };
        let outcome = optimize_portfolio(
            &assets,
            profile_terms,
            &Constraints::default(),
            &config,
            None,
        )
        .unwrap();
        assert!(
            outcome.best_weights["GOOD"] > 0.8,
            "expected the dominant asset to take most weight, got {:?}",
            outcome.best_weights
        );
    }

    #[test]
    fn test_progress_callback_observes_monotonic_best() {
        let assets = vec![make_asset("A", 0.3, 0.1), make_asset("B", 0.2, 0.3)];
        let mut reports: Vec<(u32, f64)> = Vec::new();
        let mut callback = |generation: u32, best: f64| reports.push((generation, best));
        let config = GaConfig {
            population_size: 20,
            generations: 30,
            progress_interval: 5,
            seed: 9,
            ..Default::default()
        };
        optimize_portfolio(
            &assets,
            profile_terms,
            &Constraints::default(),
            &config,
            Some(&mut callback),
        )
        .unwrap();

        assert_eq!(reports.len(), 6, "one report per 5 generations");
        for pair in reports.windows(2) {
            assert!(
                pair[1].1 >= pair[0].1,
                "best-so-far fitness can never decrease"
            );
        }
    }

    #[test]
    fn test_progress_callback_does_not_change_outcome() {
        let assets = vec![make_asset("A", 0.3, 0.1), make_asset("B", 0.2, 0.3)];
        let mut noop = |_: u32, _: f64| {};
        let with = optimize_portfolio(
            &assets,
            profile_terms,
            &Constraints::default(),
            &small_config(5),
            Some(&mut noop),
        )
        .unwrap();
        let without = optimize_portfolio(
            &assets,
            profile_terms,
            &Constraints::default(),
            &small_config(5),
            None,
        )
        .unwrap();
        assert_eq!(with.best_fitness, without.best_fitness);
        assert_eq!(with.best_weights, without.best_weights);
    }

    #[test]
    fn test_fitness_clamped_non_negative() {
        let assets = vec![make_asset("A", 0.0, 1.0)];
        let outcome = optimize_portfolio(
            &assets,
            profile_terms,
            &Constraints {
                max_risk: 1.0,
                ..Default::default()
            },
            &small_config(1),
            None,
        )
        .unwrap();
        assert_eq!(outcome.best_fitness, 0.0);
    }

    #[test]
    fn test_constraint_violation_propagates() {
        let assets = vec![make_asset("A", 0.2, 0.95)];
        let constraints = Constraints {
            max_risk: 0.5,
            ..Default::default()
        };
        let err = optimize_portfolio(
            &assets,
            profile_terms,
            &constraints,
            &small_config(1),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, common::Error::ConstraintViolation(_)));
    }
}
