//! The destructible wall between the two shooters
//!
//! A full-height band centered on the playfield midline. It soaks up every
//! bullet that reaches it until its hit points run out; after that it is
//! rubble and bullets pass freely.

use crate::Rect;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wall {
    pub hp: u32,
}

impl Default for Wall {
    fn default() -> Self {
        Self::new()
    }
}

impl Wall {
    pub fn new() -> Self {
        Self { hp: WALL_MAX_HP }
    }

    /// Take damage, flooring at zero
    pub fn absorb(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Once true, stays true for the rest of the match (hp never regenerates)
    pub fn is_destroyed(&self) -> bool {
        self.hp == 0
    }

    /// Space occupied on the playfield
    pub fn rect(&self) -> Rect {
        Rect::new(
            ARENA_WIDTH / 2.0 - WALL_WIDTH / 2.0,
            0.0,
            WALL_WIDTH,
            ARENA_HEIGHT,
        )
    }

    /// Remaining strength in `[0, 1]`
    pub fn integrity(&self) -> f32 {
        self.hp as f32 / WALL_MAX_HP as f32
    }

    /// Render alpha in `[0, 1]`, never below the visibility floor
    pub fn opacity(&self) -> f32 {
        (255.0 * self.integrity()).floor().max(WALL_MIN_ALPHA) / 255.0
    }
}
