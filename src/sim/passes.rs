//! Per-type update passes
//!
//! Each pass snapshots the ids it walks at entry. Entities created during a
//! pass are first visited on the next tick; entities re-tagged during a pass
//! are picked up by whichever pass owns their new tag.

use glam::Vec2;

use super::collision::colliding;
use super::dice::Dice;
use super::entity::{EntityKind, Sprite};
use super::kinematics::{Axis, advance, bounce_vertical, is_leaving, is_visible};
use super::player::{PlayerEffect, PlayerState};
use super::spawner::{SpawnSpec, roll_fan, star_burst};
use super::state::World;
use super::store::StoreError;
use crate::audio::Sound;
use crate::consts::*;
use crate::platform::{Color, Platform};

/// Agent8: state machine, integration, containment, tether line
pub fn update_player<D: Dice, P: Platform + ?Sized>(
    world: &mut World<D>,
    host: &mut P,
) -> Result<(), StoreError> {
    let display = world.display;
    let id = world.store.singleton_id(EntityKind::Player)?;
    let player = world.store.get_mut(id)?;

    let prev = world.state.player;
    let step = prev.step(player, &*host, display);
    if step.next != prev {
        log::debug!("Agent8 {:?} -> {:?} at {}", prev, step.next, player.pos);
    }
    world.state.player = step.next;

    advance(player);
    if step.next.is_contained() && is_leaving(player, display, Axis::Both) {
        player.rollback();
    }

    host.set_animation(id, player.sprite, player.anim_speed);
    host.render_line(Vec2::new(player.pos.x, 0.0), player.pos, Color::WHITE);
    host.render_entity_rotated(player, 1.0);

    match step.effect {
        Some(PlayerEffect::FireLaser(at)) => {
            let mut laser = SpawnSpec::at_rest(EntityKind::Laser, at, LASER_RADIUS, Sprite::Laser);
            laser.vel = LASER_VELOCITY;
            world.spawn(host, laser);
            host.play_sound(Sound::Shoot);
        }
        Some(PlayerEffect::Restart) => restart(world, host)?,
        None => {}
    }
    Ok(())
}

/// Fresh run after a death: score cleared, music back, hazards faded out
fn restart<D: Dice, P: Platform + ?Sized>(
    world: &mut World<D>,
    host: &mut P,
) -> Result<(), StoreError> {
    let final_score = world.state.score;
    world.state.reset();
    host.start_looping_sound(Sound::Music);

    let tools = world.reclassify(EntityKind::Tool, EntityKind::Destroyed)?;
    let coins = world.reclassify(EntityKind::Coin, EntityKind::Destroyed)?;
    log::info!("Restart (last score {final_score}, cleared {tools} tools and {coins} coins)");
    Ok(())
}

/// Fan: spawn rolls, vertical bounce
pub fn update_fan<D: Dice, P: Platform + ?Sized>(
    world: &mut World<D>,
    host: &mut P,
) -> Result<(), StoreError> {
    let display = world.display;
    let id = world.store.singleton_id(EntityKind::Fan)?;
    let fan_pos = world.store.get(id)?.pos;

    let spawns = roll_fan(&mut world.dice, fan_pos);
    if let Some(tool) = spawns.tool {
        log::debug!("fan threw {:?} at {}", tool.sprite, tool.vel);
        world.spawn(host, tool);
        host.play_sound(Sound::Tool);
    }
    if let Some(coin) = spawns.coin {
        log::debug!("fan released a coin");
        world.spawn(host, coin);
    }

    let fan = world.store.get_mut(id)?;
    advance(fan);
    if is_leaving(fan, display, Axis::Vertical) {
        bounce_vertical(fan);
    }
    host.render_entity(fan);
    Ok(())
}

/// Tools: kill Agent8 on contact, bounce off top and bottom, despawn off-screen
pub fn update_tools<D: Dice, P: Platform + ?Sized>(
    world: &mut World<D>,
    host: &mut P,
) -> Result<(), StoreError> {
    let display = world.display;
    let player = world.store.get_by_type(EntityKind::Player)?.clone();

    for id in world.store.collect_ids(EntityKind::Tool) {
        let tool = world.store.get_mut(id)?;

        if world.state.player != PlayerState::Dead && colliding(tool, &player) {
            host.stop_looping_sound(Sound::Music);
            host.play_sound(Sound::Die);
            world.state.player = PlayerState::Dead;
            log::info!("Agent8 hit by {:?} (score {})", tool.sprite, world.state.score);
        }

        advance(tool);
        if is_leaving(tool, display, Axis::Vertical) {
            bounce_vertical(tool);
        }
        host.render_entity_rotated(tool, 1.0);

        if !is_visible(tool, display) {
            world.despawn(host, id)?;
        }
    }
    Ok(())
}

/// Coins: collected on contact with a star burst; stars: fly until off-screen
pub fn update_coins_and_stars<D: Dice, P: Platform + ?Sized>(
    world: &mut World<D>,
    host: &mut P,
) -> Result<(), StoreError> {
    let display = world.display;
    let player = world.store.get_by_type(EntityKind::Player)?.clone();
    let coins = world.store.collect_ids(EntityKind::Coin);
    let stars = world.store.collect_ids(EntityKind::Star);

    for id in coins {
        let coin = world.store.get_mut(id)?;
        let collected = colliding(coin, &player);

        advance(coin);
        host.render_entity_rotated(coin, 1.0);
        let gone = collected || !is_visible(coin, display);

        if collected {
            for star in star_burst(player.pos) {
                world.spawn(host, star);
            }
            world.state.apply_score_delta(COIN_COLLECT_POINTS);
            host.play_sound(Sound::Collect);
        }
        if gone {
            world.despawn(host, id)?;
        }
    }

    for id in stars {
        let star = world.store.get_mut(id)?;
        advance(star);
        host.render_entity_rotated(star, 1.0);
        if !is_visible(star, display) {
            world.despawn(host, id)?;
        }
    }
    Ok(())
}

/// Lasers: shoot tools for points, shoot coins for a penalty
pub fn update_lasers<D: Dice, P: Platform + ?Sized>(
    world: &mut World<D>,
    host: &mut P,
) -> Result<(), StoreError> {
    let display = world.display;
    let lasers = world.store.collect_ids(EntityKind::Laser);
    let tools = world.store.collect_ids(EntityKind::Tool);
    let coins = world.store.collect_ids(EntityKind::Coin);

    for laser_id in lasers {
        let laser = world.store.get(laser_id)?.clone();
        let mut hit = false;
        let mut delta = 0;

        // A laser scores against everything it overlaps this tick.
        // Targets already shot by an earlier laser are skipped.
        for &id in &tools {
            let tool = world.store.get_mut(id)?;
            if tool.kind == EntityKind::Tool && colliding(&laser, tool) {
                hit = true;
                tool.kind = EntityKind::Destroyed;
                delta += TOOL_SHOT_POINTS;
                log::debug!("laser {laser_id} destroyed tool {id}");
            }
        }
        for &id in &coins {
            let coin = world.store.get_mut(id)?;
            if coin.kind == EntityKind::Coin && colliding(&laser, coin) {
                hit = true;
                coin.kind = EntityKind::Destroyed;
                host.play_sound(Sound::Error);
                delta += COIN_SHOT_PENALTY;
                log::debug!("laser {laser_id} destroyed coin {id}");
            }
        }
        world.state.apply_score_delta(delta);

        let laser = world.store.get_mut(laser_id)?;
        advance(laser);
        host.render_entity(laser);
        if hit || !is_visible(laser, display) {
            world.despawn(host, laser_id)?;
        }
    }
    Ok(())
}

/// Opacity of a fading entity at `frame`
pub fn fade_opacity(frame: u32) -> f32 {
    ((FADE_FRAMES as f32 - frame as f32) / FADE_FRAMES as f32).clamp(0.0, 1.0)
}

/// Destroyed entities: drift and fade, drawn on odd frames only
pub fn update_destroyed<D: Dice, P: Platform + ?Sized>(
    world: &mut World<D>,
    host: &mut P,
) -> Result<(), StoreError> {
    let display = world.display;

    for id in world.store.collect_ids(EntityKind::Destroyed) {
        let dead = world.store.get_mut(id)?;
        if dead.anim_speed != DESTROYED_ANIM_SPEED {
            dead.anim_speed = DESTROYED_ANIM_SPEED;
            host.set_animation(id, dead.sprite, DESTROYED_ANIM_SPEED);
        }
        advance(dead);

        // Even frames neither draw nor check for removal
        if dead.frame % 2 == 1 {
            host.render_entity_rotated(dead, fade_opacity(dead.frame));
            if !is_visible(dead, display) || dead.frame >= FADE_FRAMES {
                world.despawn(host, id)?;
            }
        }
    }
    Ok(())
}
