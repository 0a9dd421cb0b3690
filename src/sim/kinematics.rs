//! Per-tick integration and display-bounds queries
//!
//! `advance` is the only place positions change from physics. Every pass
//! calls it exactly once per entity per tick.

use glam::Vec2;

use super::entity::Entity;

/// Which display edges a bounds check considers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Both,
    Vertical,
    Horizontal,
}

/// Advance one tick: store the rollback position, integrate, spin, animate
pub fn advance(entity: &mut Entity) {
    entity.old_pos = entity.pos;
    entity.vel += entity.acc;
    entity.pos += entity.vel;
    entity.rotation += entity.rot_speed;

    entity.frame_pos += entity.anim_speed;
    while entity.frame_pos >= 1.0 {
        entity.frame += 1;
        entity.frame_pos -= 1.0;
    }
}

/// True while the entity's bounding circle still touches the display
pub fn is_visible(entity: &Entity, display: Vec2) -> bool {
    let closest = entity.pos.clamp(Vec2::ZERO, display);
    entity.pos.distance_squared(closest) <= entity.radius * entity.radius
}

/// True if the entity's extent is past a display edge on `axis` and still
/// moving outward. Stricter than losing visibility: it fires as soon as the
/// edge of the circle crosses the boundary.
pub fn is_leaving(entity: &Entity, display: Vec2, axis: Axis) -> bool {
    let (p, v, r) = (entity.pos, entity.vel, entity.radius);

    let horizontal = (p.x - r < 0.0 && v.x < 0.0) || (p.x + r > display.x && v.x > 0.0);
    let vertical = (p.y - r < 0.0 && v.y < 0.0) || (p.y + r > display.y && v.y > 0.0);

    match axis {
        Axis::Both => horizontal || vertical,
        Axis::Vertical => vertical,
        Axis::Horizontal => horizontal,
    }
}

/// Veto the move and reverse vertical travel
pub fn bounce_vertical(entity: &mut Entity) {
    entity.rollback();
    entity.vel.y = -entity.vel.y;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DISPLAY_SIZE;
    use crate::sim::entity::{EntityKind, Sprite};
    use proptest::prelude::*;

    fn body(pos: Vec2, vel: Vec2, radius: f32) -> Entity {
        let mut e = Entity::new(1, EntityKind::Tool, pos, radius, Sprite::Driver);
        e.vel = vel;
        e
    }

    #[test]
    fn test_advance_integrates_acceleration_first() {
        let mut e = body(Vec2::new(10.0, 10.0), Vec2::new(1.0, 0.0), 5.0);
        e.acc = Vec2::new(0.0, 2.0);
        e.rot_speed = 0.1;

        advance(&mut e);
        assert_eq!(e.old_pos, Vec2::new(10.0, 10.0));
        assert_eq!(e.vel, Vec2::new(1.0, 2.0));
        assert_eq!(e.pos, Vec2::new(11.0, 12.0));
        assert!((e.rotation - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_advance_animation_rate() {
        let mut e = body(Vec2::ZERO, Vec2::ZERO, 1.0);
        e.anim_speed = 0.25;
        for _ in 0..3 {
            advance(&mut e);
        }
        assert_eq!(e.frame, 0);
        advance(&mut e);
        assert_eq!(e.frame, 1);

        e.anim_speed = 0.0;
        for _ in 0..10 {
            advance(&mut e);
        }
        assert_eq!(e.frame, 1, "zero speed freezes the clip");
    }

    #[test]
    fn test_visibility_uses_bounding_circle() {
        // Centre off the left edge but circle still overlapping
        assert!(is_visible(&body(Vec2::new(-20.0, 100.0), Vec2::ZERO, 30.0), DISPLAY_SIZE));
        // Fully gone
        assert!(!is_visible(&body(Vec2::new(-40.0, 100.0), Vec2::ZERO, 30.0), DISPLAY_SIZE));
        // Corner case: diagonal distance exceeds radius even though both axes overlap
        assert!(!is_visible(&body(Vec2::new(-25.0, -25.0), Vec2::ZERO, 30.0), DISPLAY_SIZE));
        // Zero-radius point on screen
        assert!(is_visible(&body(Vec2::new(5.0, 5.0), Vec2::ZERO, 0.0), DISPLAY_SIZE));
    }

    #[test]
    fn test_leaving_requires_outward_motion() {
        let top = Vec2::new(300.0, 10.0);
        assert!(is_leaving(&body(top, Vec2::new(0.0, -1.0), 20.0), DISPLAY_SIZE, Axis::Both));
        assert!(!is_leaving(&body(top, Vec2::new(0.0, 1.0), 20.0), DISPLAY_SIZE, Axis::Both));
        assert!(!is_leaving(&body(top, Vec2::new(0.0, -1.0), 20.0), DISPLAY_SIZE, Axis::Horizontal));

        let left = Vec2::new(5.0, 300.0);
        let e = body(left, Vec2::new(-8.0, 0.0), 20.0);
        assert!(is_leaving(&e, DISPLAY_SIZE, Axis::Horizontal));
        assert!(!is_leaving(&e, DISPLAY_SIZE, Axis::Vertical));
        // Leaving fires while the entity is still visible
        assert!(is_visible(&e, DISPLAY_SIZE));
    }

    #[test]
    fn test_bounce_vertical() {
        let mut e = body(Vec2::new(500.0, 705.0), Vec2::new(-8.0, 6.0), 50.0);
        advance(&mut e);
        assert!(is_leaving(&e, DISPLAY_SIZE, Axis::Vertical));
        bounce_vertical(&mut e);
        assert_eq!(e.pos, Vec2::new(500.0, 705.0));
        assert_eq!(e.vel, Vec2::new(-8.0, -6.0));
    }

    proptest! {
        #[test]
        fn prop_advance_records_previous_position(
            x in -2000.0f32..2000.0, y in -2000.0f32..2000.0,
            vx in -50.0f32..50.0, vy in -50.0f32..50.0,
            ax in -5.0f32..5.0, ay in -5.0f32..5.0,
        ) {
            let mut e = body(Vec2::new(x, y), Vec2::new(vx, vy), 10.0);
            e.acc = Vec2::new(ax, ay);
            advance(&mut e);
            prop_assert_eq!(e.old_pos, Vec2::new(x, y));
        }
    }
}
