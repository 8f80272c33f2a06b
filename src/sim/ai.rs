//! Reactive AI gunslinger
//!
//! Stateless: every frame the decision is re-derived from the two shooters'
//! positions and two draws from the injected RNG. Movement is a biased random
//! walk toward the opponent's height; firing is a flat per-frame chance and
//! ignores the wall (the wall does its gating during collision resolution).

use rand::Rng;

use super::state::{Shooter, VerticalDir};
use crate::consts::*;

/// What a shooter wants to do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShooterIntent {
    pub move_up: bool,
    pub move_down: bool,
    pub fire: bool,
}

impl ShooterIntent {
    /// Single-step movement, if any. Opposing keys cancel out.
    pub fn movement(&self) -> Option<VerticalDir> {
        match (self.move_up, self.move_down) {
            (true, false) => Some(VerticalDir::Up),
            (false, true) => Some(VerticalDir::Down),
            _ => None,
        }
    }
}

/// Decide `me`'s intent for this frame.
///
/// Always consumes exactly two RNG draws (movement roll, then fire roll) so a
/// seed fixes the whole sequence regardless of positions.
pub fn decide<R: Rng + ?Sized>(me: &Shooter, opponent: &Shooter, rng: &mut R) -> ShooterIntent {
    let mut intent = ShooterIntent::default();

    let move_roll: f32 = rng.random();
    if move_roll < AI_MOVE_CHANCE {
        if opponent.pos.y < me.pos.y {
            intent.move_up = true;
        } else if opponent.pos.y > me.pos.y {
            intent.move_down = true;
        }
    }

    let fire_roll = rng.random_range(0..=AI_FIRE_ROLL_MAX);
    intent.fire = fire_roll == 1;

    intent
}
