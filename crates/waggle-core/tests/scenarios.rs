//! Behavioural scenario tests
//!
//! End-to-end checks of colony-level behaviour and the model
//! invariants that must hold over whole runs.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use waggle_core::bee::BeeState;
use waggle_core::config::SimConfig;
use waggle_core::environment::Environment;
use waggle_core::geom::Vec2;
use waggle_core::runner;

/// A staged patch inside a scout's initial sense range is found and
/// drained within a handful of ticks.
#[test]
fn test_nearby_patch_is_drained_quickly() {
    let config = SimConfig {
        width: 4.0,
        length: 4.0,
        hive_radius: 0.2,
        nectar_count: 0,
        num_bees: 1,
        perc_scouts: 1.0,
        idle_prob: 0.0,
        sense_range: 0.5,
        dt: 0.1,
        ..SimConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(1);
    let mut env = Environment::new(&config, &mut rng).unwrap();
    let hive = env.field().hive.position;
    // In range of the bee at the hive from tick 0.
    env.add_patch(hive + Vec2::new(0.3, 0.0), 1);

    let mut ticks = 0;
    while !env.is_depleted() {
        env.step(&mut rng);
        ticks += 1;
        assert!(ticks <= 5, "nearby single-unit patch not drained in {ticks} ticks");
    }
    // home -> searching, sense -> found, collect -> depleted.
    assert_eq!(ticks, 3);
}

/// An empty world is a success at tick zero.
#[test]
fn test_no_nectar_is_an_immediate_success() {
    let config = SimConfig {
        nectar_count: 0,
        seed: Some(5),
        ..SimConfig::default()
    };
    let record = runner::run(&config).unwrap();
    assert!(record.success);
    assert_eq!(record.time_to_depletion, Some(0));
    assert_eq!(record.total_nectar_collected, 0);
}

/// A cap too small to reach any patch yields a failure record whose
/// total still reflects the setup-time nectar sum.
#[test]
fn test_unreachable_cap_fails_with_fixed_total() {
    let config = SimConfig {
        nectar_count: 8,
        max_nectar_strength: 5,
        max_steps: Some(2),
        seed: Some(6),
        ..SimConfig::default()
    };
    let record = runner::run(&config).unwrap();
    assert!(!record.success);
    assert_eq!(record.time_to_depletion, None);
    assert_eq!(record.total_nectar_collected, 40);
}

/// With following disabled and an all-scout roster, the following
/// state never occurs anywhere in the run.
#[test]
fn test_no_following_when_follow_prob_is_zero() {
    let config = SimConfig {
        width: 6.0,
        length: 6.0,
        nectar_count: 4,
        max_nectar_strength: 2,
        num_bees: 10,
        perc_scouts: 1.0,
        follow_prob: 0.0,
        idle_prob: 0.2,
        ..SimConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(11);
    let mut env = Environment::new(&config, &mut rng).unwrap();

    for _ in 0..2_000 {
        env.step(&mut rng);
        assert!(
            env.bees().iter().all(|b| b.state() != BeeState::Following),
            "a bee entered the following state"
        );
        if env.is_depleted() {
            break;
        }
    }
}

/// Nectar strengths never increase over a run, and positions stay
/// inside the domain after every tick.
#[test]
fn test_strength_monotone_and_positions_bounded() {
    let config = SimConfig {
        width: 6.0,
        length: 6.0,
        nectar_count: 6,
        max_nectar_strength: 4,
        num_bees: 12,
        perc_scouts: 0.5,
        ..SimConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(21);
    let mut env = Environment::new(&config, &mut rng).unwrap();

    let mut last_strengths: HashMap<_, _> = env
        .field()
        .nectar()
        .iter()
        .map(|p| (p.id, p.strength))
        .collect();

    for _ in 0..1_500 {
        env.step(&mut rng);

        for patch in env.field().nectar() {
            let previous = last_strengths
                .get(&patch.id)
                .copied()
                .expect("patches are never added mid-run");
            assert!(patch.strength <= previous, "strength increased on a patch");
        }
        last_strengths = env
            .field()
            .nectar()
            .iter()
            .map(|p| (p.id, p.strength))
            .collect();

        for bee in env.bees() {
            let p = bee.position();
            assert!(p.x >= 0.0 && p.x <= config.width, "x out of bounds: {}", p.x);
            assert!(p.y >= 0.0 && p.y <= config.length, "y out of bounds: {}", p.y);
        }

        if env.is_depleted() {
            break;
        }
    }
}

/// The dance board never holds two advertisements matching within
/// tolerance, no matter how the run unfolds.
#[test]
fn test_dance_board_stays_duplicate_free() {
    let config = SimConfig {
        width: 5.0,
        length: 5.0,
        nectar_count: 5,
        max_nectar_strength: 5,
        num_bees: 15,
        perc_scouts: 0.4,
        follow_prob: 0.9,
        ..SimConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(31);
    let mut env = Environment::new(&config, &mut rng).unwrap();

    for _ in 0..1_500 {
        env.step(&mut rng);
        let entries = env.dances().entries();
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                assert!(
                    !a.matches(b.direction, b.distance),
                    "duplicate advertisements on the board"
                );
            }
        }
        if env.is_depleted() {
            break;
        }
    }
}
