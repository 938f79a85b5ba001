//! Even spreading of sites by mutual repulsion
//!
//! Every pair of sites pushes apart with a force proportional to
//! `1 / distance²`. A site only takes its step when the new position is
//! still inside the design's main silhouette; otherwise it stays put for
//! that iteration.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;
use std::time::Instant;

use crate::geometry::{Point, Polygon};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Squared distances are floored here so coincident sites get a finite push
const MIN_DISTANCE_SQ: f64 = 1e-6;

/// Options for the spreading relaxation
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadOptions {
    /// Hard cap on iterations
    pub max_iterations: usize,
    /// Iterations always run before convergence may stop the loop
    pub min_iterations: usize,
    /// Repulsion strength: a pair at distance `d` pushes by `step_size / d²`
    pub step_size: f64,
    /// Longest step a site may take in one iteration
    pub max_displacement: f64,
    /// Stop when no site moved farther than this in an iteration
    /// Set to 0.0 to always run `max_iterations`
    pub convergence_threshold: f64,
    /// Seed for the push direction of sites sitting on top of each other
    pub seed: u64,
}

impl Default for SpreadOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            min_iterations: 5,
            step_size: 10.0,
            max_displacement: 2.0,
            convergence_threshold: 1e-3,
            seed: 0,
        }
    }
}

/// Result of a spreading run
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadOutcome {
    pub sites: Vec<Point>,
    pub iterations: usize,
    pub converged: bool,
    /// Whether any site ended up somewhere else
    pub moved: bool,
}

impl SpreadOutcome {
    fn unchanged(sites: &[Point]) -> Self {
        Self {
            sites: sites.to_vec(),
            iterations: 0,
            converged: false,
            moved: false,
        }
    }
}

/// The boundary loop with the largest bounding box
///
/// Used as "the" outline when the interior cells form several islands.
pub fn main_boundary(boundaries: &[Polygon]) -> Option<&Polygon> {
    boundaries.iter().max_by(|a, b| {
        a.bounds()
            .area()
            .partial_cmp(&b.bounds().area())
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Spread sites with a given iteration count and step size
///
/// Uses [`SpreadOptions::default`] for everything else. Use
/// `spread_sites_with_options` for full control.
///
/// # Arguments
///
/// * `sites` - Current site positions
/// * `boundaries` - Silhouette loops of the current design
/// * `iterations` - Maximum number of repulsion steps
/// * `step_size` - Repulsion strength
///
/// # Returns
///
/// The new positions plus iteration and convergence statistics
pub fn spread_sites(
    sites: &[Point],
    boundaries: &[Polygon],
    iterations: usize,
    step_size: f64,
) -> SpreadOutcome {
    let options = SpreadOptions {
        max_iterations: iterations,
        step_size,
        ..Default::default()
    };
    spread_sites_with_options(sites, boundaries, options)
}

/// Spread sites with full control over the relaxation
///
/// Needs at least two sites and one boundary loop; otherwise the sites are
/// returned unchanged.
///
/// # Algorithm
///
/// 1. Pick the main silhouette loop (largest bounding box) as constraint
/// 2. Sum the pairwise `step_size / d²` pushes on every site
/// 3. Cap each push at `max_displacement`
/// 4. Move a site only if its new position stays inside the constraint
/// 5. Stop after `min_iterations` once no site moved more than
///    `convergence_threshold`, or at `max_iterations`
///
/// # Arguments
///
/// * `sites` - Current site positions
/// * `boundaries` - Silhouette loops of the current design
/// * `options` - Iteration limits, step sizes and jitter seed
///
/// # Returns
///
/// The new positions plus iteration and convergence statistics. `moved`
/// is false when no site ended up farther than `EPSILON` from its start.
pub fn spread_sites_with_options(
    sites: &[Point],
    boundaries: &[Polygon],
    options: SpreadOptions,
) -> SpreadOutcome {
    let Some(constraint) = main_boundary(boundaries) else {
        log::debug!("[Spread] no boundary polygon, skipping");
        return SpreadOutcome::unchanged(sites);
    };
    if sites.len() < 2 {
        return SpreadOutcome::unchanged(sites);
    }

    let total_start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut current = sites.to_vec();
    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let displacements = repulsion(&current, options.step_size, &mut rng);

        let mut max_move: f64 = 0.0;
        for (site, mut step) in current.iter_mut().zip(displacements) {
            let len = step.length();
            if len > options.max_displacement {
                step *= options.max_displacement / len;
            }
            let candidate = *site + step;
            if constraint.contains(candidate) {
                max_move = max_move.max(step.length());
                *site = candidate;
            }
        }
        iterations_run = iteration + 1;

        if iterations_run >= options.min_iterations && max_move <= options.convergence_threshold {
            converged = true;
            break;
        }
    }

    let moved = current
        .iter()
        .zip(sites)
        .any(|(a, b)| a.distance(*b) > crate::geometry::EPSILON);

    log::debug!(
        "[Spread] {} sites, {} iterations (of max {}), converged={}, moved={}, total={:?}",
        sites.len(),
        iterations_run,
        options.max_iterations,
        converged,
        moved,
        total_start.elapsed()
    );

    SpreadOutcome {
        sites: current,
        iterations: iterations_run,
        converged,
        moved,
    }
}

/// Net inverse-square push on every site
fn repulsion(sites: &[Point], step_size: f64, rng: &mut ChaCha8Rng) -> Vec<DVec2> {
    let mut displacements = vec![DVec2::ZERO; sites.len()];
    for i in 0..sites.len() {
        for j in (i + 1)..sites.len() {
            let delta = sites[i] - sites[j];
            let dist_sq = delta.length_squared();
            let direction = if dist_sq < MIN_DISTANCE_SQ {
                let angle = rng.gen_range(0.0..TAU);
                DVec2::new(angle.cos(), angle.sin())
            } else {
                delta / dist_sq.sqrt()
            };
            let push = direction * (step_size / dist_sq.max(MIN_DISTANCE_SQ));
            displacements[i] += push;
            displacements[j] -= push;
        }
    }
    displacements
}
