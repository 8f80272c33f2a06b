//! Fixed timestep simulation tick
//!
//! One call advances the match by exactly one frame:
//! player intents, AI intents, shooter upkeep, collisions, win check.
//! Rendering happens afterwards, outside the simulation.

use super::ai::{self, ShooterIntent};
use super::collision::resolve_collisions;
use super::state::{GameEvent, GamePhase, GameState, Shooter};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move-up key held
    pub move_up: bool,
    /// Move-down key held
    pub move_down: bool,
    /// Fire key held
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI plays the player's side too
    pub idle_mode: bool,
}

impl TickInput {
    fn player_intent(&self) -> ShooterIntent {
        ShooterIntent {
            move_up: self.move_up,
            move_down: self.move_down,
            fire: self.fire,
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at tick {}", state.time_ticks);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed at tick {}", state.time_ticks);
            }
            _ => {}
        }
    }

    // Frozen while paused and once the match is decided
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    let player_intent = if input.idle_mode {
        ai::decide(&state.player, &state.enemy, &mut state.rng)
    } else {
        input.player_intent()
    };
    apply_intent(&mut state.player, player_intent, &mut state.events);

    let enemy_intent = ai::decide(&state.enemy, &state.player, &mut state.rng);
    apply_intent(&mut state.enemy, enemy_intent, &mut state.events);

    state.player.tick();
    state.enemy.tick();

    resolve_collisions(
        &mut state.player,
        &mut state.enemy,
        &mut state.wall,
        &mut state.events,
    );

    if let Some(outcome) = evaluate_outcome(&state.player, &state.enemy) {
        state.phase = outcome;
        state.events.push(GameEvent::MatchOver { phase: outcome });
        log::info!(
            "Match over after {} ticks: {:?} (player {} / enemy {})",
            state.time_ticks,
            outcome,
            state.player.health,
            state.enemy.health
        );
    }
}

/// Turn an intent into movement and (cooldown permitting) a shot
fn apply_intent(shooter: &mut Shooter, intent: ShooterIntent, events: &mut Vec<GameEvent>) {
    if let Some(dir) = intent.movement() {
        shooter.move_vertical(dir);
    }
    if intent.fire && shooter.fire(shooter.id.facing()) {
        events.push(GameEvent::Fired {
            shooter: shooter.id,
        });
    }
}

/// Terminal phase reached this frame, if any.
///
/// The player is checked first, so a double knockout counts as a loss.
pub fn evaluate_outcome(player: &Shooter, enemy: &Shooter) -> Option<GamePhase> {
    if player.is_down() {
        Some(GamePhase::EnemyWon)
    } else if enemy.is_down() {
        Some(GamePhase::PlayerWon)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Bullet, ShooterId};

    fn fire_input() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_fires_and_bullet_moves() {
        let mut state = GameState::new(1);
        tick(&mut state, &fire_input());

        assert!(state.events.contains(&GameEvent::Fired {
            shooter: ShooterId::Player
        }));
        let bullet = state.player.bullets.get(0).unwrap();
        // Spawned at x=135 and advanced once in the same frame
        assert_eq!(bullet.pos.x, 135.0 + BULLET_SPEED);
        assert_eq!(state.player.cooldown, RELOAD_TICKS - 1);
    }

    #[test]
    fn test_held_fire_is_rate_limited() {
        let mut state = GameState::new(1);
        for _ in 0..RELOAD_TICKS {
            tick(&mut state, &fire_input());
        }
        assert_eq!(state.player.bullets.len(), 1);

        tick(&mut state, &fire_input());
        assert_eq!(state.player.bullets.len(), 2);
    }

    #[test]
    fn test_player_bullet_reaches_wall() {
        let mut state = GameState::new(1);
        tick(&mut state, &fire_input());
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.player.bullets.is_empty());
        assert!(state.wall.hp < WALL_MAX_HP);
        assert_eq!(state.enemy.health, MAX_HEALTH);
    }

    #[test]
    fn test_movement_input() {
        let mut state = GameState::new(1);
        let up = TickInput {
            move_up: true,
            ..Default::default()
        };
        tick(&mut state, &up);
        assert_eq!(state.player.pos.y, 300.0 - SHOOTER_SPEED);

        let both = TickInput {
            move_up: true,
            move_down: true,
            ..Default::default()
        };
        tick(&mut state, &both);
        assert_eq!(state.player.pos.y, 300.0 - SHOOTER_SPEED);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::new(12345);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let ticks = state.time_ticks;

        // Paused frames simulate nothing
        for _ in 0..10 {
            tick(&mut state, &fire_input());
        }
        assert_eq!(state.time_ticks, ticks);
        assert!(state.player.bullets.is_empty());

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_player_wins_and_state_freezes() {
        let mut state = GameState::new(5);
        state.wall.absorb(WALL_MAX_HP);
        state.enemy.health = BULLET_DAMAGE;
        // Lands on the enemy after this frame's advance
        let pos = Vec2::new(state.enemy.pos.x - 3.0 - BULLET_SPEED, state.enemy.pos.y + 25.0);
        state
            .player
            .bullets
            .push(Bullet::new(pos, ShooterId::Player.facing(), ShooterId::Player));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::PlayerWon);
        assert_eq!(state.enemy.health, 0);
        assert!(state.events.contains(&GameEvent::MatchOver {
            phase: GamePhase::PlayerWon
        }));

        let ticks = state.time_ticks;
        let y = state.player.pos.y;
        let up = TickInput {
            move_up: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &up);
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.pos.y, y);
        assert!(state.player.bullets.is_empty());
        assert_eq!(state.phase, GamePhase::PlayerWon);

        // Pause does not reopen a finished match
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::PlayerWon);
    }

    #[test]
    fn test_double_knockout_is_a_loss() {
        let mut player = Shooter::new(ShooterId::Player);
        let mut enemy = Shooter::new(ShooterId::Enemy);
        player.health = 0;
        enemy.health = 0;
        assert_eq!(evaluate_outcome(&player, &enemy), Some(GamePhase::EnemyWon));

        player.health = 1;
        assert_eq!(evaluate_outcome(&player, &enemy), Some(GamePhase::PlayerWon));
        enemy.health = 1;
        assert_eq!(evaluate_outcome(&player, &enemy), None);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..5_000 {
            tick(&mut state1, &idle);
            tick(&mut state2, &idle);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.wall, state2.wall);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.enemy.pos, state2.enemy.pos);
        assert_eq!(state1.player.health, state2.player.health);
        assert_eq!(state1.enemy.health, state2.enemy.health);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(move_up, move_down, fire)| {
            TickInput {
                move_up,
                move_down,
                fire,
                ..Default::default()
            }
        })
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_every_frame(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..600),
        ) {
            let mut state = GameState::new(seed);
            for input in &inputs {
                let before = (state.player.health, state.enemy.health);
                tick(&mut state, input);

                prop_assert!(state.player.health <= MAX_HEALTH);
                prop_assert!(state.enemy.health <= MAX_HEALTH);
                prop_assert!(state.wall.hp <= WALL_MAX_HP);
                for shooter in [&state.player, &state.enemy] {
                    prop_assert!(shooter.pos.y >= SHOOTER_MIN_Y);
                    prop_assert!(shooter.pos.y <= SHOOTER_MAX_Y);
                    prop_assert!(shooter.cooldown <= RELOAD_TICKS);
                    prop_assert!(shooter.bullets.iter().all(|b| b.owner == shooter.id));
                }
                // Health only ever goes down
                prop_assert!(state.player.health <= before.0);
                prop_assert!(state.enemy.health <= before.1);
                // An intact wall lets nothing through
                if !state.wall.is_destroyed() {
                    prop_assert_eq!(state.player.health, MAX_HEALTH);
                    prop_assert_eq!(state.enemy.health, MAX_HEALTH);
                }
            }
        }

        #[test]
        fn prop_wall_stays_destroyed(seed in any::<u64>(), frames in 1usize..2_000) {
            let mut state = GameState::new(seed);
            state.wall.absorb(WALL_MAX_HP);
            let idle = TickInput { idle_mode: true, ..Default::default() };
            for _ in 0..frames {
                tick(&mut state, &idle);
                prop_assert!(state.wall.is_destroyed());
            }
        }
    }
}
