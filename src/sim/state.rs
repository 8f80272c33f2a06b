//! Game state and core simulation types
//!
//! Everything a match needs lives in [`GameState`]; there is no ambient
//! global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::wall::Wall;
use crate::Rect;
use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Paused by the player (or by losing focus)
    Paused,
    /// Enemy health reached zero
    PlayerWon,
    /// Player health reached zero
    EnemyWon,
}

impl GamePhase {
    /// True once the match has a winner
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::PlayerWon | GamePhase::EnemyWon)
    }
}

/// Which of the two shooters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShooterId {
    Player,
    Enemy,
}

impl ShooterId {
    pub fn opponent(self) -> Self {
        match self {
            ShooterId::Player => ShooterId::Enemy,
            ShooterId::Enemy => ShooterId::Player,
        }
    }

    /// Direction this shooter fires in (always toward the other side)
    pub fn facing(self) -> Heading {
        match self {
            ShooterId::Player => Heading::Right,
            ShooterId::Enemy => Heading::Left,
        }
    }

    fn start_x(self) -> f32 {
        match self {
            ShooterId::Player => PLAYER_START_X,
            ShooterId::Enemy => ENEMY_START_X,
        }
    }
}

/// Horizontal bullet travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }
}

/// Vertical movement direction (screen space, so `Up` decreases y)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDir {
    Up,
    Down,
}

impl VerticalDir {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            VerticalDir::Up => -1.0,
            VerticalDir::Down => 1.0,
        }
    }
}

/// A bullet in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    /// Top-left corner of the bullet rect
    pub pos: Vec2,
    pub heading: Heading,
    pub owner: ShooterId,
    /// Marked by collision resolution, dropped on the next compaction
    spent: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, heading: Heading, owner: ShooterId) -> Self {
        Self {
            pos,
            heading,
            owner,
            spent: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn advance(&mut self) {
        self.pos.x += self.heading.sign() * BULLET_SPEED;
    }

    /// Entirely past either horizontal edge of the playfield
    pub fn off_screen(&self) -> bool {
        let rect = self.rect();
        rect.right() < 0.0 || rect.left() > ARENA_WIDTH
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }
}

/// Index-addressed bullet list owned by a single shooter.
///
/// Collision resolution marks entries spent by index while walking the list;
/// [`BulletList::compact`] removes them afterwards in one pass.
#[derive(Debug, Clone, Default)]
pub struct BulletList {
    bullets: Vec<Bullet>,
}

impl BulletList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Bullet> {
        self.bullets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }

    /// Flag a bullet for removal; out-of-range indices are ignored
    pub fn mark_spent(&mut self, index: usize) {
        if let Some(bullet) = self.bullets.get_mut(index) {
            bullet.spent = true;
        }
    }

    /// Drop spent bullets, returning how many were removed
    pub fn compact(&mut self) -> usize {
        let before = self.bullets.len();
        self.bullets.retain(|b| !b.spent);
        before - self.bullets.len()
    }

    /// Move every bullet one frame and drop the ones that left the playfield
    fn advance_all(&mut self) {
        for bullet in &mut self.bullets {
            bullet.advance();
        }
        self.bullets.retain(|b| !b.off_screen());
    }
}

/// A stick-figure gunslinger
#[derive(Debug, Clone)]
pub struct Shooter {
    pub id: ShooterId,
    /// Head center
    pub pos: Vec2,
    pub health: u32,
    /// Frames until the next shot is allowed
    pub cooldown: u32,
    pub bullets: BulletList,
}

impl Shooter {
    pub fn new(id: ShooterId) -> Self {
        Self {
            id,
            pos: Vec2::new(id.start_x(), ARENA_HEIGHT / 2.0),
            health: MAX_HEALTH,
            cooldown: 0,
            bullets: BulletList::new(),
        }
    }

    /// Step one frame up or down, staying inside the vertical band
    pub fn move_vertical(&mut self, dir: VerticalDir) {
        self.pos.y += dir.sign() * SHOOTER_SPEED;
        self.pos.y = self.pos.y.clamp(SHOOTER_MIN_Y, SHOOTER_MAX_Y);
    }

    /// Fire if reloaded. Returns whether a bullet left the barrel.
    pub fn fire(&mut self, heading: Heading) -> bool {
        if self.cooldown > 0 {
            return false;
        }
        let muzzle = self.muzzle(heading);
        self.bullets.push(Bullet::new(muzzle, heading, self.id));
        self.cooldown = RELOAD_TICKS;
        true
    }

    /// Per-frame upkeep: reload and move bullets
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
        self.bullets.advance_all();
    }

    /// Apply damage, returning the remaining health
    pub fn take_hit(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub fn is_down(&self) -> bool {
        self.health == 0
    }

    /// Where a new bullet appears: arm's length out, about chest height
    pub fn muzzle(&self, heading: Heading) -> Vec2 {
        Vec2::new(
            self.pos.x + heading.sign() * (ARM_LENGTH + 5.0),
            self.pos.y + HEAD_RADIUS + 10.0,
        )
    }

    /// Head-to-feet hit box
    pub fn hit_region(&self) -> Rect {
        Rect::new(
            self.pos.x - HEAD_RADIUS,
            self.pos.y,
            HEAD_RADIUS * 2.0,
            HEAD_RADIUS + BODY_LENGTH + LEG_LENGTH,
        )
    }
}

/// Things that happened during a tick (consumed by audio and logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Fired { shooter: ShooterId },
    WallHit { hp_left: u32 },
    WallDestroyed,
    ShooterHit { shooter: ShooterId, health_left: u32 },
    MatchOver { phase: GamePhase },
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Match seed for reproducibility
    pub seed: u64,
    /// Source of AI randomness
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter (frames actually simulated)
    pub time_ticks: u64,
    pub player: Shooter,
    pub enemy: Shooter,
    pub wall: Wall,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh match with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: Shooter::new(ShooterId::Player),
            enemy: Shooter::new(ShooterId::Enemy),
            wall: Wall::new(),
            events: Vec::new(),
        }
    }

    pub fn shooter(&self, id: ShooterId) -> &Shooter {
        match id {
            ShooterId::Player => &self.player,
            ShooterId::Enemy => &self.enemy,
        }
    }

    pub fn shooter_mut(&mut self, id: ShooterId) -> &mut Shooter {
        match id {
            ShooterId::Player => &mut self.player,
            ShooterId::Enemy => &mut self.enemy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health, MAX_HEALTH);
        assert_eq!(state.enemy.health, MAX_HEALTH);
        assert_eq!(state.player.pos, Vec2::new(100.0, 300.0));
        assert_eq!(state.enemy.pos, Vec2::new(700.0, 300.0));
        assert_eq!(state.wall.hp, WALL_MAX_HP);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut shooter = Shooter::new(ShooterId::Player);
        assert!(shooter.fire(Heading::Right));
        assert_eq!(shooter.cooldown, RELOAD_TICKS);

        // Every attempt inside the reload window is ignored
        for _ in 0..RELOAD_TICKS - 1 {
            shooter.tick();
            assert!(!shooter.fire(Heading::Right));
        }
        assert_eq!(shooter.bullets.len(), 1);

        shooter.tick();
        assert_eq!(shooter.cooldown, 0);
        assert!(shooter.fire(Heading::Right));
        assert_eq!(shooter.bullets.len(), 2);
    }

    #[test]
    fn test_bullet_spawns_at_muzzle() {
        let mut shooter = Shooter::new(ShooterId::Enemy);
        shooter.fire(Heading::Left);
        let bullet = shooter.bullets.get(0).unwrap();
        assert_eq!(bullet.pos, Vec2::new(700.0 - 35.0, 300.0 + 25.0));
        assert_eq!(bullet.owner, ShooterId::Enemy);
        assert_eq!(bullet.heading, Heading::Left);
    }

    #[test]
    fn test_clamp_at_top_boundary() {
        let mut shooter = Shooter::new(ShooterId::Player);
        shooter.pos.y = SHOOTER_MIN_Y;
        for _ in 0..100 {
            shooter.move_vertical(VerticalDir::Up);
            assert_eq!(shooter.pos.y, SHOOTER_MIN_Y);
        }
    }

    #[test]
    fn test_clamp_at_bottom_boundary() {
        let mut shooter = Shooter::new(ShooterId::Player);
        for _ in 0..500 {
            shooter.move_vertical(VerticalDir::Down);
        }
        assert_eq!(shooter.pos.y, SHOOTER_MAX_Y);
    }

    #[test]
    fn test_bullets_leave_playfield() {
        let mut shooter = Shooter::new(ShooterId::Player);
        shooter.fire(Heading::Left);
        // Spawns at x=65; its right edge (71) crosses zero on the 9th frame
        for _ in 0..8 {
            shooter.tick();
        }
        assert_eq!(shooter.bullets.len(), 1);
        shooter.tick();
        assert!(shooter.bullets.is_empty());
    }

    #[test]
    fn test_mark_and_compact() {
        let mut list = BulletList::new();
        for i in 0..4 {
            list.push(Bullet::new(
                Vec2::new(i as f32 * 10.0, 0.0),
                Heading::Right,
                ShooterId::Player,
            ));
        }
        list.mark_spent(1);
        list.mark_spent(3);
        list.mark_spent(42);
        assert_eq!(list.len(), 4);
        assert_eq!(list.compact(), 2);
        let xs: Vec<f32> = list.iter().map(|b| b.pos.x).collect();
        assert_eq!(xs, vec![0.0, 20.0]);
    }

    #[test]
    fn test_take_hit_saturates() {
        let mut shooter = Shooter::new(ShooterId::Enemy);
        assert_eq!(shooter.take_hit(90), 10);
        assert_eq!(shooter.take_hit(BULLET_DAMAGE), 0);
        assert!(shooter.is_down());
    }
}
