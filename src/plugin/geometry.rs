//! Plugin domain: the controller's view of the avian2d collision world.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::geometry::{Aabb2, CollisionMask, GeometryProvider, RayHit};
use crate::plugin::components::layer_mask;

/// Ray casts through `SpatialQuery`, ignoring the character's own collider.
///
/// Translation is accumulated rather than written back, so several moves in
/// one frame (warping) see the box where the previous move left it.
pub struct AvianGeometry<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    entity: Entity,
    bounds: Aabb2,
    translation: Vec2,
}

impl<'a, 'w, 's> AvianGeometry<'a, 'w, 's> {
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>, entity: Entity, bounds: Aabb2) -> Self {
        Self {
            spatial_query,
            entity,
            bounds,
            translation: Vec2::ZERO,
        }
    }

    /// Total displacement applied since construction.
    pub fn translation(&self) -> Vec2 {
        self.translation
    }
}

impl GeometryProvider for AvianGeometry<'_, '_, '_> {
    fn bounds(&self) -> Aabb2 {
        self.bounds.translated(self.translation)
    }

    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: CollisionMask,
    ) -> Option<RayHit> {
        let filter =
            SpatialQueryFilter::from_mask(layer_mask(mask)).with_excluded_entities([self.entity]);

        self.spatial_query
            .cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| RayHit {
                point: origin + *direction * hit.distance,
                normal: hit.normal,
                distance: hit.distance,
                entity: Some(hit.entity),
            })
    }

    fn translate(&mut self, delta: Vec2) {
        self.translation += delta;
    }
}

/// World bounds of a box collider centred on `transform`. `None` for other shapes.
pub(crate) fn box_bounds(transform: &Transform, collider: &Collider) -> Option<Aabb2> {
    let cuboid = collider.shape_scaled().as_cuboid()?;
    Some(Aabb2::from_center_half_extents(
        transform.translation.truncate(),
        Vec2::new(cuboid.half_extents.x, cuboid.half_extents.y),
    ))
}
