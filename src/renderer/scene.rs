//! Scene tessellation
//!
//! Turns a [`GameState`] into one triangle list per frame. Draw order:
//! player, enemy (each with its bullets), wall, health bars. Text is left to
//! the platform layer via [`Scene::banner`].

use glam::Vec2;

use super::shapes;
use super::vertex::{Palette, Vertex, with_alpha};
use crate::Rect;
use crate::consts::*;
use crate::sim::{GamePhase, GameState, Shooter, Wall};

/// Segments used for heads and hat ellipses
const ROUND_SEGMENTS: u32 = 20;
/// Stroke width for bodies and legs
const LIMB_WIDTH: f32 = 3.0;

/// Health bar layout
pub const HEALTH_BAR_WIDTH: f32 = 100.0;
pub const HEALTH_BAR_HEIGHT: f32 = 10.0;
pub const PLAYER_BAR_POS: Vec2 = Vec2::new(20.0, 20.0);
pub const ENEMY_BAR_POS: Vec2 = Vec2::new(ARENA_WIDTH - 120.0, 20.0);

/// One frame's worth of drawing
#[derive(Debug, Clone)]
pub struct Scene {
    pub vertices: Vec<Vertex>,
    pub clear_color: [f32; 4],
    /// End-of-match text to show centered over the playfield
    pub banner: Option<&'static str>,
}

/// Build the scene for the current state
pub fn build_scene(state: &GameState, palette: &Palette) -> Scene {
    let mut vertices = Vec::with_capacity(1024);

    draw_shooter(&mut vertices, &state.player, palette.player, palette);
    draw_shooter(&mut vertices, &state.enemy, palette.enemy, palette);
    draw_wall(&mut vertices, &state.wall, palette);
    draw_health_bar(&mut vertices, state.player.health, PLAYER_BAR_POS, palette);
    draw_health_bar(&mut vertices, state.enemy.health, ENEMY_BAR_POS, palette);

    Scene {
        vertices,
        clear_color: palette.background,
        banner: banner_text(state.phase),
    }
}

/// Text for the end-of-match banner, from the human player's point of view
pub fn banner_text(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::PlayerWon => Some("YOU WIN"),
        GamePhase::EnemyWon => Some("YOU LOSE"),
        GamePhase::Playing | GamePhase::Paused => None,
    }
}

/// Filled width of a health bar, proportional to `health / MAX_HEALTH`
pub fn health_fill_width(health: u32) -> f32 {
    (health.min(MAX_HEALTH) as f32 / MAX_HEALTH as f32 * HEALTH_BAR_WIDTH).floor()
}

fn draw_shooter(out: &mut Vec<Vertex>, shooter: &Shooter, color: [f32; 4], palette: &Palette) {
    let head = shooter.pos;
    let hip = head + Vec2::new(0.0, HEAD_RADIUS + BODY_LENGTH);
    let feet_y = hip.y + LEG_LENGTH;

    out.extend(shapes::circle(head, HEAD_RADIUS, color, ROUND_SEGMENTS));
    out.extend(shapes::line(
        head + Vec2::new(0.0, HEAD_RADIUS),
        hip,
        LIMB_WIDTH,
        color,
    ));
    out.extend(shapes::line(hip, Vec2::new(head.x - 10.0, feet_y), LIMB_WIDTH, color));
    out.extend(shapes::line(hip, Vec2::new(head.x + 10.0, feet_y), LIMB_WIDTH, color));

    draw_hat(out, head, palette.ink);

    for bullet in shooter.bullets.iter() {
        out.extend(shapes::rect(&bullet.rect(), palette.ink));
    }
}

/// Wide-brim hat perched on the head
fn draw_hat(out: &mut Vec<Vertex>, head: Vec2, color: [f32; 4]) {
    const BRIM_WIDTH: f32 = 40.0;
    const BRIM_HEIGHT: f32 = 6.0;
    const CROWN_WIDTH: f32 = 20.0;
    const CROWN_HEIGHT: f32 = 12.0;

    let brim_top = head.y - HEAD_RADIUS - 4.0;
    let brim = Rect::new(head.x - BRIM_WIDTH / 2.0, brim_top, BRIM_WIDTH, BRIM_HEIGHT);
    let crown = Rect::new(
        head.x - CROWN_WIDTH / 2.0,
        brim_top - CROWN_HEIGHT,
        CROWN_WIDTH,
        CROWN_HEIGHT,
    );
    out.extend(shapes::ellipse_in(&brim, color, ROUND_SEGMENTS));
    out.extend(shapes::ellipse_in(&crown, color, ROUND_SEGMENTS));
}

fn draw_wall(out: &mut Vec<Vertex>, wall: &Wall, palette: &Palette) {
    out.extend(shapes::rect(&wall.rect(), with_alpha(palette.wall, wall.opacity())));
}

fn draw_health_bar(out: &mut Vec<Vertex>, health: u32, pos: Vec2, palette: &Palette) {
    let frame = Rect::new(pos.x, pos.y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT);
    out.extend(shapes::rect_outline(&frame, 1.0, palette.ink));

    let fill = health_fill_width(health);
    if fill > 0.0 {
        let bar = Rect::new(pos.x, pos.y, fill, HEALTH_BAR_HEIGHT);
        out.extend(shapes::rect(&bar, palette.health));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Bullet, ShooterId};

    fn wall_vertices(scene: &Scene, palette: &Palette) -> Vec<Vertex> {
        scene
            .vertices
            .iter()
            .filter(|v| v.color[..3] == palette.wall[..3])
            .copied()
            .collect()
    }

    #[test]
    fn test_wall_alpha_tracks_hp() {
        let palette = Palette::STANDARD;
        let mut state = GameState::new(1);

        let scene = build_scene(&state, &palette);
        let wall = wall_vertices(&scene, &palette);
        assert_eq!(wall.len(), 6);
        assert!(wall.iter().all(|v| v.color[3] == 1.0));

        state.wall.absorb(WALL_MAX_HP);
        let scene = build_scene(&state, &palette);
        let wall = wall_vertices(&scene, &palette);
        assert!(wall.iter().all(|v| v.color[3] == state.wall.opacity()));
        assert!(wall[0].color[3] < 0.25);
    }

    #[test]
    fn test_bullets_are_drawn() {
        let palette = Palette::STANDARD;
        let mut state = GameState::new(1);
        let base = build_scene(&state, &palette).vertices.len();

        state.enemy.bullets.push(Bullet::new(
            Vec2::new(500.0, 200.0),
            ShooterId::Enemy.facing(),
            ShooterId::Enemy,
        ));
        let with_bullet = build_scene(&state, &palette).vertices.len();
        assert_eq!(with_bullet, base + 6);
    }

    #[test]
    fn test_health_fill() {
        assert_eq!(health_fill_width(MAX_HEALTH), HEALTH_BAR_WIDTH);
        assert_eq!(health_fill_width(25), 25.0);
        assert_eq!(health_fill_width(0), 0.0);

        let palette = Palette::STANDARD;
        let mut state = GameState::new(1);
        state.enemy.health = 0;
        let scene = build_scene(&state, &palette);
        // Only the player's bar has a fill
        let fills = scene
            .vertices
            .iter()
            .filter(|v| v.color == palette.health)
            .count();
        assert_eq!(fills, 6);
    }

    #[test]
    fn test_banner() {
        assert_eq!(banner_text(GamePhase::Playing), None);
        assert_eq!(banner_text(GamePhase::Paused), None);
        assert_eq!(banner_text(GamePhase::PlayerWon), Some("YOU WIN"));
        assert_eq!(banner_text(GamePhase::EnemyWon), Some("YOU LOSE"));

        let mut state = GameState::new(1);
        state.phase = GamePhase::EnemyWon;
        assert_eq!(build_scene(&state, &Palette::STANDARD).banner, Some("YOU LOSE"));
    }

    #[test]
    fn test_high_contrast_clear_color() {
        let state = GameState::new(1);
        let scene = build_scene(&state, &Palette::HIGH_CONTRAST);
        assert_eq!(scene.clear_color, Palette::HIGH_CONTRAST.background);
    }

    #[test]
    fn test_everything_on_screen() {
        let state = GameState::new(1);
        let scene = build_scene(&state, &Palette::STANDARD);
        for v in &scene.vertices {
            assert!((-1.0..=ARENA_WIDTH + 1.0).contains(&v.position[0]));
            assert!((-1.0..=ARENA_HEIGHT + 1.0).contains(&v.position[1]));
        }
    }
}
