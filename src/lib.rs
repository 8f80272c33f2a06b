//! Wall Shootout - a two-gunslinger arcade duel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (shooters, bullets, wall, AI, match phase)
//! - `renderer`: Scene tessellation and WebGPU pipeline
//! - `platform`: Input polling and frame pacing
//! - `settings`: Presentation preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Target frame rate of the fixed-timestep loop
    pub const FPS: u32 = 60;
    /// Maximum substeps per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels, origin top-left, y down)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Stick figure proportions
    pub const HEAD_RADIUS: f32 = 15.0;
    pub const BODY_LENGTH: f32 = 60.0;
    pub const LEG_LENGTH: f32 = 40.0;
    pub const ARM_LENGTH: f32 = 30.0;

    /// Vertical movement per frame
    pub const SHOOTER_SPEED: f32 = 4.0;
    /// Gap kept between the figure and the playfield edges
    pub const EDGE_MARGIN: f32 = 5.0;
    /// Highest allowed head position
    pub const SHOOTER_MIN_Y: f32 = HEAD_RADIUS + EDGE_MARGIN;
    /// Lowest allowed head position (feet stay on screen)
    pub const SHOOTER_MAX_Y: f32 =
        ARENA_HEIGHT - (HEAD_RADIUS + BODY_LENGTH + LEG_LENGTH + EDGE_MARGIN);
    /// Starting health
    pub const MAX_HEALTH: u32 = 100;
    /// Frames between shots
    pub const RELOAD_TICKS: u32 = 20;
    /// Player start position (head center)
    pub const PLAYER_START_X: f32 = 100.0;
    /// Enemy start position (head center)
    pub const ENEMY_START_X: f32 = ARENA_WIDTH - 100.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 6.0;
    pub const BULLET_HEIGHT: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 8.0;
    /// Health lost per bullet that reaches a shooter
    pub const BULLET_DAMAGE: u32 = 15;

    /// Wall defaults
    pub const WALL_MAX_HP: u32 = 50;
    pub const WALL_WIDTH: f32 = 20.0;
    /// HP lost per absorbed bullet
    pub const WALL_DAMAGE_PER_BULLET: u32 = 1;
    /// Minimum wall alpha (0-255) so a battered wall stays visible
    pub const WALL_MIN_ALPHA: f32 = 50.0;

    /// AI: chance per frame to step toward the opponent
    pub const AI_MOVE_CHANCE: f32 = 0.02;
    /// AI: fires when a roll in `0..=AI_FIRE_ROLL_MAX` hits 1
    pub const AI_FIRE_ROLL_MAX: u32 = 50;
}

/// Axis-aligned rectangle in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_rect_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_band_limits() {
        use consts::*;
        assert_eq!(SHOOTER_MIN_Y, 20.0);
        assert_eq!(SHOOTER_MAX_Y, 480.0);
    }
}
