//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One tick per rendered frame, no wall-clock time
//! - Randomness only through `Dice`
//! - Stable iteration order (by entity ID)
//! - Rendering, audio and input only through the `platform` traits

pub mod collision;
pub mod dice;
pub mod entity;
pub mod kinematics;
pub mod passes;
pub mod player;
pub mod spawner;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::colliding;
pub use dice::{Dice, GameRng};
pub use entity::{Entity, EntityId, EntityKind, Sprite};
pub use kinematics::{Axis, advance, is_leaving, is_visible};
pub use player::{PlayerEffect, PlayerState};
pub use spawner::SpawnSpec;
pub use state::{GameState, World};
pub use store::{EntityStore, StoreError};
pub use tick::{TickOptions, tick};
