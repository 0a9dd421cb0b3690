//! Game state and the simulation world
//!
//! `GameState` is the score and player state every pass reads and writes.
//! `World` bundles it with the entity store and the dice, and keeps the
//! host's visuals in step with store creation and destruction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dice::{Dice, GameRng};
use super::entity::{EntityId, EntityKind, Sprite};
use super::player::PlayerState;
use super::spawner::SpawnSpec;
use super::store::{EntityStore, StoreError};
use crate::audio::Sound;
use crate::consts::*;
use crate::platform::Platform;

/// Score and player state shared by every pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    /// Never negative
    pub score: u32,
    pub player: PlayerState,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a signed score change, clamping at zero
    pub fn apply_score_delta(&mut self, delta: i64) {
        let score = (i64::from(self.score) + delta).clamp(0, i64::from(u32::MAX));
        self.score = score as u32;
    }

    /// Back to a fresh run (score 0, player appearing)
    pub fn reset(&mut self) {
        self.score = 0;
        self.player = PlayerState::Appear;
    }
}

pub struct World<D = GameRng> {
    pub store: EntityStore,
    pub state: GameState,
    pub dice: D,
    /// Display size, read once from the host
    pub display: Vec2,
}

impl<D: Dice> World<D> {
    /// Set up a run: Agent8 and the fan, music playing
    pub fn start<P: Platform + ?Sized>(dice: D, host: &mut P) -> Self {
        let mut world = Self {
            store: EntityStore::new(),
            state: GameState::new(),
            dice,
            display: host.display_bounds(),
        };

        world.spawn(
            host,
            SpawnSpec::at_rest(EntityKind::Player, AGENT8_SPAWN, AGENT8_RADIUS, Sprite::Agent8Fall),
        );

        let mut fan = SpawnSpec::at_rest(EntityKind::Fan, FAN_SPAWN, FAN_RADIUS, Sprite::Fan);
        fan.vel = FAN_VELOCITY;
        fan.anim_speed = FAN_ANIM_SPEED;
        world.spawn(host, fan);

        host.start_looping_sound(Sound::Music);
        log::info!("Agent8 started ({}x{})", world.display.x, world.display.y);
        world
    }

    /// Create an entity from a descriptor and mirror it on the host
    pub fn spawn<P: Platform + ?Sized>(&mut self, host: &mut P, spec: SpawnSpec) -> EntityId {
        let id = self
            .store
            .create(spec.kind, spec.pos, spec.radius, spec.sprite);
        host.create_visual_entity(id, spec.kind, spec.pos, spec.radius, spec.sprite);

        // The id was just inserted, so the lookup cannot miss
        if let Ok(entity) = self.store.get_mut(id) {
            entity.vel = spec.vel;
            entity.acc = spec.acc;
            entity.rot_speed = spec.rot_speed;
            entity.anim_speed = spec.anim_speed;
        }
        host.set_animation(id, spec.sprite, spec.anim_speed);
        id
    }

    /// Remove an entity from the store and the host
    pub fn despawn<P: Platform + ?Sized>(
        &mut self,
        host: &mut P,
        id: EntityId,
    ) -> Result<(), StoreError> {
        self.store.destroy(id)?;
        host.destroy_visual_entity(id);
        Ok(())
    }

    /// Re-tag every entity of `from` as `to`; returns how many changed
    pub fn reclassify(&mut self, from: EntityKind, to: EntityKind) -> Result<usize, StoreError> {
        let ids = self.store.collect_ids(from);
        for &id in &ids {
            self.store.get_mut(id)?.kind = to;
        }
        Ok(ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Headless;
    use crate::sim::dice::testing::ScriptedDice;

    #[test]
    fn test_score_delta_clamps_at_zero() {
        let mut state = GameState::new();
        state.apply_score_delta(200);
        state.apply_score_delta(-300);
        assert_eq!(state.score, 0);

        state.apply_score_delta(500);
        assert_eq!(state.score, 500);
    }

    #[test]
    fn test_reset() {
        let mut state = GameState {
            score: 1200,
            player: PlayerState::Dead,
            time_ticks: 90,
        };
        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.player, PlayerState::Appear);
        assert_eq!(state.time_ticks, 90);
    }

    #[test]
    fn test_start_creates_player_and_fan() {
        let mut host = Headless::default();
        let world = World::start(ScriptedDice::quiet(), &mut host);

        let player = world.store.get_by_type(EntityKind::Player).unwrap();
        assert_eq!(player.pos, AGENT8_SPAWN);
        let fan = world.store.get_by_type(EntityKind::Fan).unwrap();
        assert_eq!(fan.vel, FAN_VELOCITY);
        assert_eq!(fan.anim_speed, FAN_ANIM_SPEED);

        assert_eq!(host.renderer.visuals.len(), 2);
        assert!(host.sounds().is_looping(Sound::Music));
        assert_eq!(world.display, host.display_bounds());
    }

    #[test]
    fn test_spawn_and_despawn_mirror_host() {
        let mut host = Headless::default();
        let mut world = World::start(ScriptedDice::quiet(), &mut host);

        let mut spec = SpawnSpec::at_rest(EntityKind::Coin, Vec2::new(10.0, 10.0), 40.0, Sprite::Coin);
        spec.vel = COIN_VELOCITY;
        let id = world.spawn(&mut host, spec);
        assert_eq!(world.store.get(id).unwrap().vel, COIN_VELOCITY);
        assert!(host.renderer.visuals.contains_key(&id));

        world.despawn(&mut host, id).unwrap();
        assert!(!host.renderer.visuals.contains_key(&id));
        assert_eq!(world.despawn(&mut host, id), Err(StoreError::NotFound(id)));
    }

    #[test]
    fn test_reclassify() {
        let mut host = Headless::default();
        let mut world = World::start(ScriptedDice::quiet(), &mut host);
        for _ in 0..3 {
            world.spawn(
                &mut host,
                SpawnSpec::at_rest(EntityKind::Tool, FAN_SPAWN, DRIVER_RADIUS, Sprite::Driver),
            );
        }

        let moved = world
            .reclassify(EntityKind::Tool, EntityKind::Destroyed)
            .unwrap();
        assert_eq!(moved, 3);
        assert_eq!(world.store.count(EntityKind::Tool), 0);
        assert_eq!(world.store.count(EntityKind::Destroyed), 3);
    }
}
