//! Circle overlap test
//!
//! Every pass tests its pairs directly. Entity counts stay small, so there is
//! no broad phase.

use super::entity::Entity;

/// True if the two bounding circles overlap (touching does not count)
#[inline]
pub fn colliding(a: &Entity, b: &Entity) -> bool {
    let reach = a.radius + b.radius;
    a.pos.distance_squared(b.pos) < reach * reach
}
