//! Entity record shared by every object in the simulation
//!
//! One uniform record for everything on screen. The `kind` tag is mutable:
//! a tool that gets shot is re-tagged `Destroyed` in place and fades out
//! under the destroyed pass instead of being reallocated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle for a live entity (never reused within a run)
pub type EntityId = u32;

/// Type tag deciding which update pass owns an entity this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Fan,
    Tool,
    Coin,
    Star,
    Laser,
    Destroyed,
}

/// Visual clip an entity is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Agent8Fall,
    Agent8Climb,
    Agent8Halt,
    Agent8Hang,
    Fan,
    Driver,
    Spanner,
    Coin,
    Star,
    Laser,
}

impl Sprite {
    /// Asset key understood by the renderer
    pub fn key(&self) -> &'static str {
        match self {
            Sprite::Agent8Fall => "agent8_fall",
            Sprite::Agent8Climb => "agent8_climb",
            Sprite::Agent8Halt => "agent8_halt",
            Sprite::Agent8Hang => "agent8_hang",
            Sprite::Fan => "fan",
            Sprite::Driver => "driver",
            Sprite::Spanner => "spanner",
            Sprite::Coin => "coin",
            Sprite::Star => "star",
            Sprite::Laser => "laser",
        }
    }

    /// Number of frames in the clip's sprite sheet
    pub fn frames(&self) -> u32 {
        match self {
            Sprite::Agent8Climb => 8,
            Sprite::Agent8Halt => 6,
            Sprite::Agent8Hang => 4,
            Sprite::Fan => 4,
            Sprite::Coin => 6,
            Sprite::Agent8Fall
            | Sprite::Driver
            | Sprite::Spanner
            | Sprite::Star
            | Sprite::Laser => 1,
        }
    }
}

/// A simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Position at the end of the previous tick (rollback target)
    pub old_pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    /// Radians
    pub rotation: f32,
    /// Radians per tick
    pub rot_speed: f32,
    /// Collision and bounds radius
    pub radius: f32,
    pub sprite: Sprite,
    /// Current animation frame (grows without bound; renderers wrap it)
    pub frame: u32,
    /// Fractional progress toward the next frame
    pub frame_pos: f32,
    /// Frames advanced per tick (0 freezes the clip)
    pub anim_speed: f32,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, radius: f32, sprite: Sprite) -> Self {
        Self {
            id,
            kind,
            pos,
            old_pos: pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            rotation: 0.0,
            rot_speed: 0.0,
            radius,
            sprite,
            frame: 0,
            frame_pos: 0.0,
            anim_speed: 0.0,
        }
    }

    /// Switch clip and playback speed. A different clip restarts at frame 0.
    ///
    /// Returns true if the clip changed.
    pub fn set_sprite(&mut self, sprite: Sprite, anim_speed: f32) -> bool {
        let changed = self.sprite != sprite;
        if changed {
            self.sprite = sprite;
            self.frame = 0;
            self.frame_pos = 0.0;
        }
        self.anim_speed = anim_speed;
        changed
    }

    /// True once the current clip has reached its last frame
    pub fn is_animation_complete(&self) -> bool {
        self.frame + 1 >= self.sprite.frames()
    }

    /// Restore the previous-tick position
    pub fn rollback(&mut self) {
        self.pos = self.old_pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_sprite_resets_frame_only_on_change() {
        let mut e = Entity::new(1, EntityKind::Player, Vec2::ZERO, 10.0, Sprite::Agent8Hang);
        e.frame = 3;
        e.frame_pos = 0.5;

        assert!(!e.set_sprite(Sprite::Agent8Hang, 0.02));
        assert_eq!(e.frame, 3);

        assert!(e.set_sprite(Sprite::Agent8Halt, 0.333));
        assert_eq!(e.frame, 0);
        assert_eq!(e.frame_pos, 0.0);
        assert_eq!(e.anim_speed, 0.333);
    }

    #[test]
    fn test_animation_complete_on_last_frame() {
        let mut e = Entity::new(1, EntityKind::Player, Vec2::ZERO, 10.0, Sprite::Agent8Halt);
        assert!(!e.is_animation_complete());
        e.frame = Sprite::Agent8Halt.frames() - 1;
        assert!(e.is_animation_complete());

        // Single-frame clips are complete immediately
        let laser = Entity::new(2, EntityKind::Laser, Vec2::ZERO, 1.0, Sprite::Laser);
        assert!(laser.is_animation_complete());
    }
}
