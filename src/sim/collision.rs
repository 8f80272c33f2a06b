//! Bullet collision resolution
//!
//! Runs once per frame after every shooter has ticked. Each bullet is tested
//! against the wall first and only then against the opposing shooter, so an
//! intact wall is a hard gate. The wall's state is re-read for every bullet
//! because it can collapse partway through the pass.

use super::state::{GameEvent, Shooter};
use super::wall::Wall;
use crate::consts::*;

/// Outcome for a single bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOutcome {
    /// Stopped by the wall
    Absorbed,
    /// Struck the opposing shooter
    Hit,
    /// Still flying
    Missed,
}

/// Resolve both shooters' bullets, player first
pub fn resolve_collisions(
    player: &mut Shooter,
    enemy: &mut Shooter,
    wall: &mut Wall,
    events: &mut Vec<GameEvent>,
) {
    resolve_bullets(player, enemy, wall, events);
    resolve_bullets(enemy, player, wall, events);
}

/// Resolve `owner`'s bullets against the wall and `target`, then compact
/// `owner`'s bullet list.
pub fn resolve_bullets(
    owner: &mut Shooter,
    target: &mut Shooter,
    wall: &mut Wall,
    events: &mut Vec<GameEvent>,
) {
    for index in 0..owner.bullets.len() {
        let Some(bullet) = owner.bullets.get(index) else {
            continue;
        };
        let bullet_rect = bullet.rect();

        let outcome = if !wall.is_destroyed() && bullet_rect.intersects(&wall.rect()) {
            wall.absorb(WALL_DAMAGE_PER_BULLET);
            events.push(GameEvent::WallHit { hp_left: wall.hp });
            if wall.is_destroyed() {
                log::info!("Wall destroyed by {:?}", owner.id);
                events.push(GameEvent::WallDestroyed);
            }
            BulletOutcome::Absorbed
        } else if bullet_rect.intersects(&target.hit_region()) {
            let health_left = target.take_hit(BULLET_DAMAGE);
            log::debug!("{:?} hit {:?}, health {}", owner.id, target.id, health_left);
            events.push(GameEvent::ShooterHit {
                shooter: target.id,
                health_left,
            });
            BulletOutcome::Hit
        } else {
            BulletOutcome::Missed
        };

        if outcome != BulletOutcome::Missed {
            owner.bullets.mark_spent(index);
        }
    }

    owner.bullets.compact();
}
