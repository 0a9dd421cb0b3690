//! Headless host
//!
//! Runs the simulation with no window: input is scripted, draw calls and
//! sounds are recorded. Used by the native demo and by tests.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use super::{Action, Color, Font, Input, Platform, Renderer};
use crate::audio::{Audio, AudioManager, RecordingBackend, Sound};
use crate::consts::DISPLAY_SIZE;
use crate::settings::Settings;
use crate::sim::{Entity, EntityId, EntityKind, Sprite};

/// Draw-side bookkeeping
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// Live visuals and the clip each one plays
    pub visuals: HashMap<EntityId, (EntityKind, Sprite, f32)>,
    pub created: usize,
    pub destroyed: usize,
    /// Draw calls issued this frame
    pub draws: usize,
    /// Opacity of rotated draws this frame, by entity
    pub opacities: Vec<(EntityId, f32)>,
    pub lines: usize,
    pub texts: Vec<String>,
    /// Font key of each text this frame
    pub fonts: Vec<&'static str>,
}

impl RecordingRenderer {
    fn begin_frame(&mut self) {
        self.draws = 0;
        self.opacities.clear();
        self.lines = 0;
        self.texts.clear();
        self.fonts.clear();
    }

    /// Asset key of the clip a live visual is playing
    pub fn clip(&self, id: EntityId) -> Option<&'static str> {
        self.visuals.get(&id).map(|(_, sprite, _)| sprite.key())
    }
}

impl Renderer for RecordingRenderer {
    fn create_visual_entity(
        &mut self,
        id: EntityId,
        kind: EntityKind,
        _pos: Vec2,
        _radius: f32,
        sprite: Sprite,
    ) {
        log::trace!("visual {id} ({kind:?}) shows {}", sprite.key());
        self.visuals.insert(id, (kind, sprite, 0.0));
        self.created += 1;
    }

    fn destroy_visual_entity(&mut self, id: EntityId) {
        if self.visuals.remove(&id).is_none() {
            log::warn!("destroying unknown visual {id}");
        }
        self.destroyed += 1;
    }

    fn set_animation(&mut self, id: EntityId, sprite: Sprite, anim_speed: f32) {
        if let Some(visual) = self.visuals.get_mut(&id) {
            visual.1 = sprite;
            visual.2 = anim_speed;
        }
    }

    fn render_entity(&mut self, _entity: &Entity) {
        self.draws += 1;
    }

    fn render_entity_rotated(&mut self, entity: &Entity, opacity: f32) {
        self.draws += 1;
        self.opacities.push((entity.id, opacity));
    }

    fn render_line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {
        self.lines += 1;
    }

    fn render_text(&mut self, font: Font, text: &str, _pos: Vec2) {
        self.texts.push(text.to_owned());
        self.fonts.push(font.key());
    }
}

/// Scriptable, recording host
pub struct Headless {
    pub display: Vec2,
    held: HashSet<Action>,
    pressed: HashSet<Action>,
    pub renderer: RecordingRenderer,
    pub audio: AudioManager<RecordingBackend>,
}

impl Default for Headless {
    fn default() -> Self {
        Self::new(DISPLAY_SIZE)
    }
}

impl Headless {
    pub fn new(display: Vec2) -> Self {
        Self {
            display,
            held: HashSet::new(),
            pressed: HashSet::new(),
            renderer: RecordingRenderer::default(),
            audio: AudioManager::new(RecordingBackend::default()),
        }
    }

    pub fn with_settings(display: Vec2, settings: &Settings) -> Self {
        let mut host = Self::new(display);
        host.audio.apply_settings(settings);
        host
    }

    /// Hold or release an action
    pub fn hold(&mut self, action: Action, down: bool) {
        if down {
            if self.held.insert(action) {
                self.pressed.insert(action);
            }
        } else {
            self.held.remove(&action);
        }
    }

    /// Press and release within one frame
    pub fn tap(&mut self, action: Action) {
        self.pressed.insert(action);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Reset per-frame state. Call once before each tick.
    pub fn begin_frame(&mut self) {
        self.renderer.begin_frame();
    }

    /// Clear edge-triggered input. Call once after each tick.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    pub fn sounds(&self) -> &RecordingBackend {
        self.audio.backend()
    }
}

impl Input for Headless {
    fn is_action_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn is_action_just_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}

impl Renderer for Headless {
    fn create_visual_entity(
        &mut self,
        id: EntityId,
        kind: EntityKind,
        pos: Vec2,
        radius: f32,
        sprite: Sprite,
    ) {
        self.renderer
            .create_visual_entity(id, kind, pos, radius, sprite);
    }

    fn destroy_visual_entity(&mut self, id: EntityId) {
        self.renderer.destroy_visual_entity(id);
    }

    fn set_animation(&mut self, id: EntityId, sprite: Sprite, anim_speed: f32) {
        self.renderer.set_animation(id, sprite, anim_speed);
    }

    fn render_entity(&mut self, entity: &Entity) {
        self.renderer.render_entity(entity);
    }

    fn render_entity_rotated(&mut self, entity: &Entity, opacity: f32) {
        self.renderer.render_entity_rotated(entity, opacity);
    }

    fn render_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.renderer.render_line(from, to, color);
    }

    fn render_text(&mut self, font: Font, text: &str, pos: Vec2) {
        self.renderer.render_text(font, text, pos);
    }
}

impl Audio for Headless {
    fn play_sound(&mut self, sound: Sound) {
        self.audio.play_sound(sound);
    }

    fn start_looping_sound(&mut self, sound: Sound) {
        self.audio.start_looping_sound(sound);
    }

    fn stop_looping_sound(&mut self, sound: Sound) {
        self.audio.stop_looping_sound(sound);
    }
}

impl Platform for Headless {
    fn display_bounds(&self) -> Vec2 {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_is_edge_triggered_once() {
        let mut host = Headless::default();
        host.hold(Action::Fire, true);
        assert!(host.is_action_held(Action::Fire));
        assert!(host.is_action_just_pressed(Action::Fire));

        host.end_frame();
        host.hold(Action::Fire, true);
        assert!(host.is_action_held(Action::Fire));
        assert!(!host.is_action_just_pressed(Action::Fire));

        host.hold(Action::Fire, false);
        assert!(!host.is_action_held(Action::Fire));
    }

    #[test]
    fn test_tap_does_not_hold() {
        let mut host = Headless::default();
        host.tap(Action::Fire);
        assert!(host.is_action_just_pressed(Action::Fire));
        assert!(!host.is_action_held(Action::Fire));
        host.end_frame();
        assert!(!host.is_action_just_pressed(Action::Fire));
    }

    #[test]
    fn test_visual_lifecycle_mirrors_calls() {
        let mut host = Headless::default();
        host.create_visual_entity(4, EntityKind::Coin, Vec2::ZERO, 40.0, Sprite::Coin);
        host.set_animation(4, Sprite::Coin, 0.5);
        assert_eq!(host.renderer.visuals[&4], (EntityKind::Coin, Sprite::Coin, 0.5));
        assert_eq!(host.renderer.clip(4), Some("coin"));

        host.destroy_visual_entity(4);
        assert!(host.renderer.visuals.is_empty());
        assert_eq!((host.renderer.created, host.renderer.destroyed), (1, 1));
        assert_eq!(host.renderer.clip(4), None);
    }

    #[test]
    fn test_clip_follows_animation_changes() {
        let mut host = Headless::default();
        host.create_visual_entity(1, EntityKind::Player, Vec2::ZERO, 50.0, Sprite::Agent8Fall);
        assert_eq!(host.renderer.clip(1), Some("agent8_fall"));

        host.set_animation(1, Sprite::Agent8Climb, 0.25);
        assert_eq!(host.renderer.clip(1), Some("agent8_climb"));
    }

    #[test]
    fn test_text_records_font_key() {
        let mut host = Headless::default();
        host.render_text(Font::Large, "SCORE: 0", Vec2::ZERO);
        assert_eq!(host.renderer.fonts, vec!["132px"]);

        host.begin_frame();
        assert!(host.renderer.fonts.is_empty());
    }
}
