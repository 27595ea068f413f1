//! Procedural city and herd placement
//!
//! Buildings land on a coarse grid with sub-cell jitter and per-axis
//! mirroring, which spreads the city radially around the origin while
//! keeping every footprint on a distinct discretized coordinate. Cows then
//! spawn on any ground the city left clear. Both loops resample on
//! collision and fail loudly once the retry budget is spent, rather than
//! spinning forever on an impossible configuration.

use std::collections::HashSet;

use glam::{Vec2, Vec3};
use rand::Rng;
use thiserror::Error;

use super::proximity::circle_hits_building;
use super::state::{Building, Cow};
use crate::consts::*;
use crate::tuning::Tuning;

/// World generation failure: the requested entity count exceeds what the
/// placement rules can realize.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("no free grid cell for building {index} after {attempts} resamples")]
    GridExhausted { index: usize, attempts: u32 },
    #[error("no clear ground for cow {index} after {attempts} resamples")]
    PastureExhausted { index: usize, attempts: u32 },
}

/// Discretized footprint key used for uniqueness checks
#[inline]
fn cell_key(x: f32, z: f32) -> (i32, i32) {
    (x.round() as i32, z.round() as i32)
}

/// Sample one candidate footprint center: base cell, sub-offset, mirroring
fn sample_footprint(rng: &mut impl Rng) -> Vec2 {
    let i = rng.random_range(0..CELL_RANGE);
    let j = rng.random_range(0..CELL_RANGE);
    let mut x = CELL_PITCH * i as f32 + CELL_SUB_OFFSETS[rng.random_range(0..2)];
    let mut z = CELL_PITCH * j as f32 + CELL_SUB_OFFSETS[rng.random_range(0..2)];
    // Independent mirroring gives the city radial symmetry around the origin
    if rng.random_bool(0.5) {
        x = -x;
    }
    if rng.random_bool(0.5) {
        z = -z;
    }
    Vec2::new(x, z)
}

/// Place the round's buildings. Every returned footprint has a distinct
/// discretized (x, z).
pub fn generate_city(rng: &mut impl Rng, tuning: &Tuning) -> Result<Vec<Building>, GenError> {
    let mut used: HashSet<(i32, i32)> = HashSet::new();
    let mut buildings = Vec::with_capacity(tuning.building_count);

    for index in 0..tuning.building_count {
        let mut placed = false;
        for _ in 0..MAX_PLACEMENT_RETRIES {
            let center = sample_footprint(rng);
            if !used.insert(cell_key(center.x, center.y)) {
                continue;
            }
            let height = rng.random_range(BUILDING_MIN_HEIGHT..BUILDING_MAX_HEIGHT);
            buildings.push(Building {
                center,
                half_extent: BUILDING_HALF_EXTENT,
                height,
                style: rng.random_range(0..BUILDING_PALETTE),
                // Buildings start sunken and rise into place; collision
                // ignores this channel entirely
                rise_offset: height,
            });
            placed = true;
            break;
        }
        if !placed {
            return Err(GenError::GridExhausted {
                index,
                attempts: MAX_PLACEMENT_RETRIES,
            });
        }
    }

    log::debug!("city generated: {} buildings", buildings.len());
    Ok(buildings)
}

/// Spawn the round's cows on ground clear of every building footprint
pub fn spawn_herd(
    rng: &mut impl Rng,
    buildings: &[Building],
    tuning: &Tuning,
) -> Result<Vec<Cow>, GenError> {
    let range = WORLD_RADIUS * 0.9;
    let mut cows = Vec::with_capacity(tuning.cow_count);

    for index in 0..tuning.cow_count {
        let mut placed = false;
        for _ in 0..MAX_PLACEMENT_RETRIES {
            let x = rng.random_range(-range..range);
            let z = rng.random_range(-range..range);
            if x.hypot(z) > range {
                continue;
            }
            let spot = Vec2::new(x, z);
            if buildings
                .iter()
                .any(|b| circle_hits_building(spot, COW_RADIUS, b))
            {
                continue;
            }
            let heading = rng.random_range(0.0..std::f32::consts::TAU);
            cows.push(Cow::new(Vec3::new(x, 0.0, z), heading));
            placed = true;
            break;
        }
        if !placed {
            return Err(GenError::PastureExhausted {
                index,
                attempts: MAX_PLACEMENT_RETRIES,
            });
        }
    }

    Ok(cows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_footprints_have_distinct_cells() {
        let tuning = Tuning::default();
        for seed in 0..8 {
            let city = generate_city(&mut rng(seed), &tuning).unwrap();
            let keys: HashSet<_> = city
                .iter()
                .map(|b| cell_key(b.center.x, b.center.y))
                .collect();
            assert_eq!(keys.len(), city.len());
        }
    }

    #[test]
    fn test_footprints_sit_off_cell_boundaries() {
        let city = generate_city(&mut rng(3), &Tuning::default()).unwrap();
        for b in &city {
            let rx = b.center.x.abs() % CELL_PITCH;
            let rz = b.center.y.abs() % CELL_PITCH;
            assert!(CELL_SUB_OFFSETS.contains(&rx), "x offset {rx}");
            assert!(CELL_SUB_OFFSETS.contains(&rz), "z offset {rz}");
        }
    }

    #[test]
    fn test_overfull_city_fails_loudly() {
        // Only 256 distinct coordinates exist; asking for more must error
        // instead of hanging
        let tuning = Tuning {
            building_count: 400,
            ..Tuning::default()
        };
        let err = generate_city(&mut rng(1), &tuning).unwrap_err();
        assert!(matches!(err, GenError::GridExhausted { .. }));
    }

    #[test]
    fn test_cows_avoid_buildings_and_stay_in_bounds() {
        let tuning = Tuning::default();
        let mut r = rng(9);
        let city = generate_city(&mut r, &tuning).unwrap();
        let herd = spawn_herd(&mut r, &city, &tuning).unwrap();

        assert_eq!(herd.len(), tuning.cow_count);
        for cow in &herd {
            assert!(cow.pos.x.hypot(cow.pos.z) <= WORLD_RADIUS);
            assert_eq!(cow.pos.y, 0.0);
            let spot = Vec2::new(cow.pos.x, cow.pos.z);
            assert!(!city.iter().any(|b| circle_hits_building(spot, COW_RADIUS, b)));
        }
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let tuning = Tuning::default();
        let a = generate_city(&mut rng(42), &tuning).unwrap();
        let b = generate_city(&mut rng(42), &tuning).unwrap();
        let centers_a: Vec<_> = a.iter().map(|x| x.center).collect();
        let centers_b: Vec<_> = b.iter().map(|x| x.center).collect();
        assert_eq!(centers_a, centers_b);
    }
}
