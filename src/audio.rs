//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::Settings;
use crate::sim::{GameEvent, GamePhase, ShooterId};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player pulls the trigger
    PlayerShot,
    /// Enemy pulls the trigger
    EnemyShot,
    /// Bullet thuds into the wall
    WallHit,
    /// Wall collapses
    WallCollapse,
    /// Bullet strikes a shooter
    BodyHit,
    /// Match won
    Victory,
    /// Match lost
    Defeat,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::Fired {
                shooter: ShooterId::Player,
            } => Some(SoundEffect::PlayerShot),
            GameEvent::Fired {
                shooter: ShooterId::Enemy,
            } => Some(SoundEffect::EnemyShot),
            GameEvent::WallHit { .. } => Some(SoundEffect::WallHit),
            GameEvent::WallDestroyed => Some(SoundEffect::WallCollapse),
            GameEvent::ShooterHit { .. } => Some(SoundEffect::BodyHit),
            GameEvent::MatchOver {
                phase: GamePhase::PlayerWon,
            } => Some(SoundEffect::Victory),
            GameEvent::MatchOver { .. } => Some(SoundEffect::Defeat),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Pick up volume/mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Play whatever the last tick produced
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::PlayerShot => self.play_shot(ctx, vol, 900.0),
            SoundEffect::EnemyShot => self.play_shot(ctx, vol * 0.7, 700.0),
            SoundEffect::WallHit => self.play_wall_hit(ctx, vol),
            SoundEffect::WallCollapse => self.play_collapse(ctx, vol),
            SoundEffect::BodyHit => self.play_body_hit(ctx, vol),
            SoundEffect::Victory => self.play_fanfare(ctx, vol, &[523.0, 659.0, 784.0, 1047.0]),
            SoundEffect::Defeat => self.play_fanfare(ctx, vol, &[392.0, 330.0, 262.0, 196.0]),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Gunshot - short square crack sweeping down
    fn play_shot(&self, ctx: &AudioContext, vol: f32, freq: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.07)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(freq * 0.2, t + 0.07)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }

    /// Wall hit - dull thump
    fn play_wall_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Wall collapse - long rumble with crackle on top
    fn play_collapse(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 80.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.8)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.8)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.85).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 2500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.08, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(2500.0, t).ok();
            osc.frequency().set_value_at_time(400.0, t + 0.05).ok();
            osc.frequency().set_value_at_time(1800.0, t + 0.1).ok();
            osc.frequency().set_value_at_time(300.0, t + 0.15).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.32).ok();
        }
    }

    /// Body hit - punchy low triangle
    fn play_body_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.22).ok();
    }

    /// Four-note jingle, one note every 120ms
    fn play_fanfare(&self, ctx: &AudioContext, vol: f32, notes: &[f32]) {
        let t = ctx.current_time();

        for (i, &freq) in notes.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                continue;
            };
            let start = t + i as f64 * 0.12;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.3, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.25)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.3).ok();
        }
    }
}
