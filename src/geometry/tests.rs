//! Geometry domain: tests for masks, boxes, angles and the segment fixture.

use bevy::prelude::*;

use super::fixture::SegmentWorld;
use super::{Aabb2, CollisionMask, GeometryProvider, direction_sign, surface_angle};

#[test]
fn test_mask_without_clears_only_named_bits() {
    let platforms = CollisionMask::PLATFORM | CollisionMask::ONE_WAY_PLATFORM;
    let solid = platforms.without(CollisionMask::ONE_WAY_PLATFORM);

    assert_eq!(solid, CollisionMask::PLATFORM);
    assert!(platforms.contains(CollisionMask::ONE_WAY_PLATFORM));
    assert!(!solid.intersects(CollisionMask::ONE_WAY_PLATFORM));
    assert_eq!(platforms & !CollisionMask::PLATFORM, CollisionMask::ONE_WAY_PLATFORM);
}

#[test]
fn test_mask_layer_bits_are_distinct() {
    let layers = [
        CollisionMask::PLATFORM,
        CollisionMask::ONE_WAY_PLATFORM,
        CollisionMask::TRIGGER,
        CollisionMask::CHARACTER,
    ];
    for (i, a) in layers.iter().enumerate() {
        for b in &layers[i + 1..] {
            assert!(!a.intersects(*b));
        }
    }
}

#[test]
fn test_aabb_expanded_shrinks_every_side() {
    let aabb = Aabb2::from_center_half_extents(Vec2::new(1.0, 2.0), Vec2::new(0.5, 1.0));
    let shrunk = aabb.expanded(-0.1);

    assert!((shrunk.min.x - 0.6).abs() < 1e-6);
    assert!((shrunk.max.x - 1.4).abs() < 1e-6);
    assert!((shrunk.min.y - 1.1).abs() < 1e-6);
    assert!((shrunk.max.y - 2.9).abs() < 1e-6);
    assert!((shrunk.center() - aabb.center()).length() < 1e-6);
}

#[test]
fn test_surface_angle() {
    assert_eq!(surface_angle(Vec2::Y), 0.0);
    assert!((surface_angle(Vec2::X) - 90.0).abs() < 1e-4);
    assert!((surface_angle(Vec2::NEG_X) - 90.0).abs() < 1e-4);
    assert!((surface_angle(Vec2::NEG_Y) - 180.0).abs() < 1e-4);
    assert!((surface_angle(Vec2::new(-1.0, 1.0)) - 45.0).abs() < 1e-4);
    assert_eq!(surface_angle(Vec2::ZERO), 0.0);
}

#[test]
fn test_direction_sign_treats_zero_as_positive() {
    assert_eq!(direction_sign(0.0), 1.0);
    assert_eq!(direction_sign(3.0), 1.0);
    assert_eq!(direction_sign(-0.5), -1.0);
}

#[test]
fn test_fixture_returns_nearest_hit_facing_ray() {
    let world = SegmentWorld::new(Vec2::ZERO, Vec2::splat(0.5))
        .with_floor(-3.0, -10.0, 10.0)
        .with_floor(-2.0, -10.0, 10.0);

    let hit = world
        .cast_ray(Vec2::ZERO, Dir2::NEG_Y, 10.0, CollisionMask::PLATFORM)
        .expect("floor below");

    assert!((hit.distance - 2.0).abs() < 1e-6);
    assert!((hit.point.y + 2.0).abs() < 1e-6);
    assert_eq!(hit.normal, Vec2::Y);
}

#[test]
fn test_fixture_respects_mask_and_distance() {
    let world = SegmentWorld::new(Vec2::ZERO, Vec2::splat(0.5)).with_one_way(-1.0, -5.0, 5.0);

    assert!(
        world
            .cast_ray(Vec2::ZERO, Dir2::NEG_Y, 5.0, CollisionMask::PLATFORM)
            .is_none()
    );
    assert!(
        world
            .cast_ray(Vec2::ZERO, Dir2::NEG_Y, 0.5, CollisionMask::ONE_WAY_PLATFORM)
            .is_none()
    );
    assert!(
        world
            .cast_ray(Vec2::ZERO, Dir2::NEG_Y, 1.0, CollisionMask::ONE_WAY_PLATFORM)
            .is_some()
    );
}

#[test]
fn test_fixture_translate_moves_body() {
    let mut world = SegmentWorld::new(Vec2::ZERO, Vec2::splat(0.5));
    world.translate(Vec2::new(1.0, -2.0));

    assert_eq!(world.bounds().center(), Vec2::new(1.0, -2.0));
}
