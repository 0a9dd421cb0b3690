//! Agent8 state machine
//!
//! `PlayerState::step` applies one tick of per-state behaviour to the player
//! entity and reports the next state plus any effect the world must carry
//! out (spawning a laser, restarting the run). Integration and containment
//! happen afterwards in the player pass.
//!
//! Transitions:
//! - Appear -> Play once the entry fall reaches a third of the display height
//! - Play -> Halt when keys are released during a fast dive
//! - Halt -> Play when the halt clip finishes
//! - Dead -> Appear on fire (the tool pass is what moves the player to Dead)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Sprite};
use crate::consts::*;
use crate::platform::{Action, Input};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    /// Falling in from the top of the screen, no control
    #[default]
    Appear,
    /// Braking after a dive, no control
    Halt,
    /// Under player control
    Play,
    /// Hit by a tool, tumbling until fire restarts the run
    Dead,
}

/// Work the world must do on behalf of the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEffect {
    /// Spawn a laser at this position
    FireLaser(Vec2),
    /// Zero the score, restart music, clear tools and coins
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub next: PlayerState,
    pub effect: Option<PlayerEffect>,
}

impl Step {
    fn stay(state: PlayerState) -> Self {
        Self {
            next: state,
            effect: None,
        }
    }
}

/// Result of reading the controls for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlOutcome {
    /// Keys were released mid-dive; the player should brake
    pub halt: bool,
    /// Fire was pressed; a laser leaves from here
    pub fire: Option<Vec2>,
}

/// Apply directional and fire input to the player entity
pub fn handle_controls<I: Input + ?Sized>(player: &mut Entity, input: &I) -> ControlOutcome {
    let mut outcome = ControlOutcome::default();

    if input.is_action_held(Action::Up) {
        player.vel = CLIMB_VELOCITY;
        player.set_sprite(Sprite::Agent8Climb, CLIMB_ANIM_SPEED);
    } else if input.is_action_held(Action::Down) {
        player.acc = DIVE_ACCELERATION;
        player.set_sprite(Sprite::Agent8Fall, 0.0);
    } else if player.vel.y > HALT_SPEED_THRESHOLD {
        outcome.halt = true;
        player.set_sprite(Sprite::Agent8Halt, HALT_ANIM_SPEED);
        player.acc = Vec2::ZERO;
    } else {
        player.set_sprite(Sprite::Agent8Hang, HANG_ANIM_SPEED);
        player.vel *= HANG_DAMPING;
        player.acc = Vec2::ZERO;
    }

    if input.is_action_just_pressed(Action::Fire) {
        outcome.fire = Some(player.pos + LASER_OFFSET);
    }

    outcome
}

impl PlayerState {
    /// Run one tick of this state's behaviour
    pub fn step<I: Input + ?Sized>(self, player: &mut Entity, input: &I, display: Vec2) -> Step {
        match self {
            PlayerState::Appear => {
                player.vel = APPEAR_VELOCITY;
                player.acc = APPEAR_ACCELERATION;
                player.set_sprite(Sprite::Agent8Fall, 0.0);
                player.rotation = 0.0;
                if player.pos.y >= display.y / 3.0 {
                    Step::stay(PlayerState::Play)
                } else {
                    Step::stay(self)
                }
            }
            PlayerState::Halt => {
                player.vel *= HALT_DAMPING;
                if player.is_animation_complete() {
                    Step::stay(PlayerState::Play)
                } else {
                    Step::stay(self)
                }
            }
            PlayerState::Play => {
                let outcome = handle_controls(player, input);
                Step {
                    next: if outcome.halt {
                        PlayerState::Halt
                    } else {
                        PlayerState::Play
                    },
                    effect: outcome.fire.map(PlayerEffect::FireLaser),
                }
            }
            PlayerState::Dead => {
                player.acc = DEAD_ACCELERATION;
                player.rotation += DEAD_SPIN;
                if input.is_action_just_pressed(Action::Fire) {
                    player.pos = AGENT8_SPAWN;
                    player.old_pos = AGENT8_SPAWN;
                    player.vel = Vec2::ZERO;
                    player.acc = Vec2::ZERO;
                    player.frame = 0;
                    player.frame_pos = 0.0;
                    Step {
                        next: PlayerState::Appear,
                        effect: Some(PlayerEffect::Restart),
                    }
                } else {
                    Step::stay(self)
                }
            }
        }
    }

    /// Whether the display edges hold the player in
    pub fn is_contained(self) -> bool {
        self != PlayerState::Dead
    }
}
