//! Agent8 - a single-screen arcade game
//!
//! Agent8 hangs from a web on the left of the screen while a fan on the
//! right throws tools and coins at them. Dodge the tools, shoot them for
//! points, and catch the coins.
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, kinematics, collisions, scoring)
//! - `platform`: Collaborator interfaces (input, rendering) and a headless host
//! - `audio`: Sound keys and volume-aware audio manager
//! - `settings`: User preferences loaded from JSON

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Display dimensions (fixed for a run)
    pub const DISPLAY_WIDTH: f32 = 1280.0;
    pub const DISPLAY_HEIGHT: f32 = 720.0;
    pub const DISPLAY_SIZE: Vec2 = Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT);

    /// Agent8 defaults
    pub const AGENT8_SPAWN: Vec2 = Vec2::new(115.0, 0.0);
    pub const AGENT8_RADIUS: f32 = 50.0;
    /// Entry fall: fixed velocity reapplied every APPEAR tick plus gravity
    pub const APPEAR_VELOCITY: Vec2 = Vec2::new(0.0, 12.0);
    pub const APPEAR_ACCELERATION: Vec2 = Vec2::new(0.0, 0.5);
    pub const CLIMB_VELOCITY: Vec2 = Vec2::new(0.0, -4.0);
    pub const DIVE_ACCELERATION: Vec2 = Vec2::new(0.0, 0.15);
    /// Downward speed above which releasing the keys triggers a halt
    pub const HALT_SPEED_THRESHOLD: f32 = 5.0;
    pub const HALT_DAMPING: f32 = 0.9;
    pub const HANG_DAMPING: f32 = 0.5;
    /// Tumble while dead: drift left, fall, spin
    pub const DEAD_ACCELERATION: Vec2 = Vec2::new(-0.3, 0.5);
    pub const DEAD_SPIN: f32 = 0.25;

    /// Animation speeds (frames advanced per tick)
    pub const CLIMB_ANIM_SPEED: f32 = 0.25;
    pub const HALT_ANIM_SPEED: f32 = 0.333;
    pub const HANG_ANIM_SPEED: f32 = 0.02;
    pub const FAN_ANIM_SPEED: f32 = 1.0;
    pub const DESTROYED_ANIM_SPEED: f32 = 0.2;

    /// Fan defaults
    pub const FAN_SPAWN: Vec2 = Vec2::new(1140.0, 217.0);
    pub const FAN_RADIUS: f32 = 0.0;
    pub const FAN_VELOCITY: Vec2 = Vec2::new(0.0, 3.0);

    /// Spawn odds: a spawn fires when `roll(n)` hits the chosen face
    pub const TOOL_ROLL_SIDES: u32 = 50;
    pub const SPANNER_ROLL_SIDES: u32 = 2;
    pub const COIN_ROLL_SIDES: u32 = 150;

    /// Tools
    pub const DRIVER_RADIUS: f32 = 50.0;
    pub const DRIVER_SPEED_X: f32 = -8.0;
    /// Vertical launch speed is `roll_range(-1, 1)` times this
    pub const TOOL_SPEED_Y_STEP: f32 = 6.0;
    pub const SPANNER_RADIUS: f32 = 100.0;
    pub const SPANNER_SPEED_X: f32 = -4.0;
    pub const SPANNER_SPIN: f32 = 0.1;

    /// Coins and stars
    pub const COIN_RADIUS: f32 = 40.0;
    pub const COIN_VELOCITY: Vec2 = Vec2::new(-3.0, 0.0);
    pub const COIN_SPIN: f32 = 0.1;
    pub const STAR_COUNT: usize = 4;
    pub const STAR_SPEED: f32 = 16.0;
    pub const STAR_GRAVITY: Vec2 = Vec2::new(0.0, 0.5);
    pub const STAR_SPIN: f32 = 0.1;

    /// Lasers
    pub const LASER_OFFSET: Vec2 = Vec2::new(155.0, -75.0);
    pub const LASER_RADIUS: f32 = 30.0;
    pub const LASER_VELOCITY: Vec2 = Vec2::new(32.0, 0.0);

    /// Scoring
    pub const COIN_COLLECT_POINTS: i64 = 500;
    pub const TOOL_SHOT_POINTS: i64 = 100;
    pub const COIN_SHOT_PENALTY: i64 = -300;

    /// Destroyed entities fade out over this many animation frames
    pub const FADE_FRAMES: u32 = 10;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
