//! Spawn rules
//!
//! Rolls are resolved into plain `SpawnSpec` descriptors; `World::spawn`
//! turns a descriptor into a live entity and its visual.

use glam::Vec2;

use super::dice::Dice;
use super::entity::{EntityKind, Sprite};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Everything needed to create an entity mid-game
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSpec {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    pub sprite: Sprite,
    pub anim_speed: f32,
    pub vel: Vec2,
    pub acc: Vec2,
    pub rot_speed: f32,
}

impl SpawnSpec {
    pub fn at_rest(kind: EntityKind, pos: Vec2, radius: f32, sprite: Sprite) -> Self {
        Self {
            kind,
            pos,
            radius,
            sprite,
            anim_speed: 0.0,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            rot_speed: 0.0,
        }
    }
}

/// Outcome of one tick of fan rolls. Both can fire in the same tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FanSpawns {
    pub tool: Option<SpawnSpec>,
    pub coin: Option<SpawnSpec>,
}

/// Roll the fan's tool and coin dice for this tick
pub fn roll_fan<D: Dice + ?Sized>(dice: &mut D, fan_pos: Vec2) -> FanSpawns {
    let mut spawns = FanSpawns::default();

    if dice.roll(TOOL_ROLL_SIDES) == TOOL_ROLL_SIDES {
        let speed_y = dice.roll_range(-1, 1) as f32 * TOOL_SPEED_Y_STEP;
        let mut tool = SpawnSpec::at_rest(EntityKind::Tool, fan_pos, DRIVER_RADIUS, Sprite::Driver);
        tool.vel = Vec2::new(DRIVER_SPEED_X, speed_y);

        if dice.roll(SPANNER_ROLL_SIDES) == 1 {
            tool.sprite = Sprite::Spanner;
            tool.radius = SPANNER_RADIUS;
            tool.vel.x = SPANNER_SPEED_X;
            tool.rot_speed = SPANNER_SPIN;
        }
        spawns.tool = Some(tool);
    }

    if dice.roll(COIN_ROLL_SIDES) == 1 {
        let mut coin = SpawnSpec::at_rest(EntityKind::Coin, fan_pos, COIN_RADIUS, Sprite::Coin);
        coin.vel = COIN_VELOCITY;
        coin.rot_speed = COIN_SPIN;
        spawns.coin = Some(coin);
    }

    spawns
}

/// Launch angles of the star burst: 45° then every 90°
pub fn star_angles() -> [f32; STAR_COUNT] {
    use std::f32::consts::PI;
    [0.25 * PI, 0.75 * PI, 1.25 * PI, 1.75 * PI]
}

/// Four stars flung out from `origin` toward the intercardinal directions
pub fn star_burst(origin: Vec2) -> Vec<SpawnSpec> {
    star_angles()
        .iter()
        .map(|&angle| {
            let mut star = SpawnSpec::at_rest(EntityKind::Star, origin, 0.0, Sprite::Star);
            star.vel = polar_to_cartesian(STAR_SPEED, angle);
            star.acc = STAR_GRAVITY;
            star.rot_speed = STAR_SPIN;
            star
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::dice::testing::ScriptedDice;

    #[test]
    fn test_no_spawn_on_misses() {
        let mut dice = ScriptedDice::new(&[1, 2], &[]);
        assert_eq!(roll_fan(&mut dice, FAN_SPAWN), FanSpawns::default());
    }

    #[test]
    fn test_screwdriver_spawn() {
        // tool face, range -1, spanner miss, coin miss
        let mut dice = ScriptedDice::new(&[50, 2, 7], &[-1]);
        let spawns = roll_fan(&mut dice, FAN_SPAWN);

        let tool = spawns.tool.expect("tool should spawn");
        assert_eq!(tool.sprite, Sprite::Driver);
        assert_eq!(tool.radius, DRIVER_RADIUS);
        assert_eq!(tool.vel, Vec2::new(-8.0, -6.0));
        assert_eq!(tool.rot_speed, 0.0);
        assert_eq!(tool.pos, FAN_SPAWN);
        assert!(spawns.coin.is_none());
    }

    #[test]
    fn test_spanner_variant() {
        let mut dice = ScriptedDice::new(&[50, 1, 9], &[1]);
        let tool = roll_fan(&mut dice, FAN_SPAWN).tool.unwrap();
        assert_eq!(tool.sprite, Sprite::Spanner);
        assert_eq!(tool.radius, SPANNER_RADIUS);
        assert_eq!(tool.vel, Vec2::new(-4.0, 6.0));
        assert!(tool.rot_speed > 0.0);
    }

    #[test]
    fn test_tool_and_coin_same_tick() {
        let fan = Vec2::new(1140.0, 400.0);
        let mut dice = ScriptedDice::new(&[50, 2, 1], &[0]);
        let spawns = roll_fan(&mut dice, fan);

        let tool = spawns.tool.unwrap();
        let coin = spawns.coin.unwrap();
        assert_eq!(tool.pos, fan);
        assert_eq!(coin.pos, fan);
        assert_eq!(tool.vel, Vec2::new(-8.0, 0.0));
        assert_eq!(coin.vel, Vec2::new(-3.0, 0.0));
        assert!(coin.rot_speed > 0.0);
    }

    #[test]
    fn test_star_burst_directions() {
        let origin = Vec2::new(115.0, 300.0);
        let stars = star_burst(origin);
        assert_eq!(stars.len(), 4);

        let expected = [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)];
        for (star, (sx, sy)) in stars.iter().zip(expected) {
            assert_eq!(star.pos, origin);
            assert_eq!(star.kind, EntityKind::Star);
            assert!((star.vel.length() - STAR_SPEED).abs() < 1e-3);
            assert_eq!(star.vel.x.signum(), sx);
            assert_eq!(star.vel.y.signum(), sy);
            assert!((star.vel.x.abs() - star.vel.y.abs()).abs() < 1e-3);
            assert!(star.acc.y > 0.0);
            assert!(star.rot_speed > 0.0);
        }
    }
}
