use rand::rngs::StdRng;
use rand::Rng;
use crate::constants::CANVAS_W;
use crate::enemies::{Archetype, Enemy, Livery};
use crate::entity::Spawn;

/// One entry of a wave plan. A double saucer is a single formation of two
/// ships at fixed offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formation {
    Single(Archetype),
    DoubleSaucer,
}

use Formation::{DoubleSaucer, Single};

const RANDOM_POOL: [Formation; 4] = [
    Single(Archetype::Grunt),
    Single(Archetype::Saucer),
    DoubleSaucer,
    Single(Archetype::Oculus),
];

const SAUCER_MARGIN: f64 = 20.0;
const SAUCER_W: f64 = 96.0;

fn pick(rng: &mut StdRng) -> Formation {
    RANDOM_POOL[rng.gen_range(0..RANDOM_POOL.len())]
}

/// Wave composition for the current score. Band upper bounds are exclusive.
pub fn plan_wave(score: u32, rng: &mut StdRng) -> Vec<Formation> {
    use Archetype::*;
    match score {
        0..=44 => vec![Single(Grunt), Single(Suicider)],
        45..=144 => vec![Single(Grunt), Single(Grunt)],
        145..=289 => vec![Single(Grunt), Single(Grunt), Single(Grunt)],
        290..=399 => vec![Single(Saucer)],
        400..=699 => vec![Single(Grunt), Single(Saucer)],
        700..=999 => vec![DoubleSaucer],
        1000..=1399 => vec![DoubleSaucer, Single(Grunt)],
        1400..=1699 => vec![Single(Oculus)],
        1700..=2099 => vec![Single(Oculus), Single(Grunt)],
        2100..=3199 => vec![pick(rng)],
        _ => vec![pick(rng), pick(rng)],
    }
}

/// Builds the ships for a plan, each at its archetype's default spawn.
pub fn spawn_wave(plan: &[Formation], rng: &mut StdRng) -> Vec<Enemy> {
    let mut enemies = Vec::new();
    for formation in plan {
        match formation {
            Single(Archetype::Suicider) => enemies.push(Enemy::suicider(Spawn::default(), rng)),
            Single(Archetype::Grunt) => enemies.push(Enemy::grunt(Spawn::default(), rng)),
            Single(Archetype::Saucer) => enemies.push(Enemy::saucer(Spawn::default(), Livery::Red)),
            Single(Archetype::Oculus) => enemies.push(Enemy::oculus(Spawn::default(), rng)),
            DoubleSaucer => {
                enemies.push(Enemy::saucer(Spawn::at(SAUCER_MARGIN, -100.0), Livery::Red));
                enemies.push(Enemy::saucer(
                    Spawn::at(CANVAS_W - SAUCER_W - SAUCER_MARGIN, -400.0),
                    Livery::Blue,
                ));
            }
        }
    }
    enemies
}
