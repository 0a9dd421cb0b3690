//! One simulation tick
//!
//! Runs the passes in a fixed order, then draws the HUD. The order matters:
//! the tool pass reads the player state the player pass wrote this tick.

use glam::Vec2;

use super::dice::Dice;
use super::passes::{
    update_coins_and_stars, update_destroyed, update_fan, update_lasers, update_player,
    update_tools,
};
use super::state::World;
use super::store::StoreError;
use crate::platform::{Action, Font, Platform};

pub const INSTRUCTIONS: &str = "ARROW KEYS TO MOVE UP AND DOWN AND SPACE TO FIRE";

/// Per-tick options that are not game state
#[derive(Debug, Clone, Copy)]
pub struct TickOptions {
    pub show_hud: bool,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self { show_hud: true }
    }
}

/// Advance the world by one tick. Returns true when the player asked to quit.
///
/// A store error means an invariant broke mid-tick; the world should not be
/// ticked again.
pub fn tick<D: Dice, P: Platform + ?Sized>(
    world: &mut World<D>,
    host: &mut P,
    options: TickOptions,
) -> Result<bool, StoreError> {
    world.state.time_ticks += 1;

    update_player(world, host)?;
    update_fan(world, host)?;
    update_tools(world, host)?;
    update_coins_and_stars(world, host)?;
    update_lasers(world, host)?;
    update_destroyed(world, host)?;

    if options.show_hud {
        draw_hud(world, host);
    }

    Ok(host.is_action_held(Action::Quit))
}

fn draw_hud<D, P: Platform + ?Sized>(world: &World<D>, host: &mut P) {
    let centre_x = world.display.x / 2.0;
    host.render_text(
        Font::Small,
        INSTRUCTIONS,
        Vec2::new(centre_x, world.display.y - 30.0),
    );
    host.render_text(
        Font::Large,
        &format!("SCORE: {}", world.state.score),
        Vec2::new(centre_x, 50.0),
    );
}
