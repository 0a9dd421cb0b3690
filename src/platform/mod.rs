//! Platform abstraction layer
//!
//! Everything the simulation needs from the outside world:
//! - Input: held / just-pressed queries for logical actions
//! - Rendering: visual lifecycle mirrored from the entity store, draw calls
//! - Audio: see `crate::audio`
//! - Display bounds

pub mod headless;

pub use headless::{Headless, RecordingRenderer};

use glam::Vec2;

use crate::audio::Audio;
use crate::sim::{Entity, EntityId, EntityKind, Sprite};

/// Logical actions the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Fire,
    Quit,
}

pub trait Input {
    /// Action is currently held down
    fn is_action_held(&self, action: Action) -> bool;
    /// Action went down this frame (edge-triggered)
    fn is_action_just_pressed(&self, action: Action) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
}

/// HUD fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Instructions line
    Small,
    /// Score readout
    Large,
}

impl Font {
    pub fn key(&self) -> &'static str {
        match self {
            Font::Small => "64px",
            Font::Large => "132px",
        }
    }
}

pub trait Renderer {
    /// A store entity was created; mirror it on the rendering side
    fn create_visual_entity(
        &mut self,
        id: EntityId,
        kind: EntityKind,
        pos: Vec2,
        radius: f32,
        sprite: Sprite,
    );
    fn destroy_visual_entity(&mut self, id: EntityId);
    /// Declare the clip an entity is playing (0 speed = single frame)
    fn set_animation(&mut self, id: EntityId, sprite: Sprite, anim_speed: f32);
    fn render_entity(&mut self, entity: &Entity);
    fn render_entity_rotated(&mut self, entity: &Entity, opacity: f32);
    fn render_line(&mut self, from: Vec2, to: Vec2, color: Color);
    /// Centred text
    fn render_text(&mut self, font: Font, text: &str, pos: Vec2);
}

/// A complete host for the simulation
pub trait Platform: Input + Renderer + Audio {
    /// Display size in pixels, fixed for a run
    fn display_bounds(&self) -> Vec2;
}
