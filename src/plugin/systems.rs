//! Plugin domain: moving controlled bodies each frame.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::controller::{CharacterController2D, FrameResolution};
use crate::geometry::GeometryProvider;
use crate::plugin::components::{LastResolution, MovementRequest};
use crate::plugin::geometry::{AvianGeometry, box_bounds};
use crate::plugin::messages::ControllerCollided;

/// Upper bound on warp steps before giving up on finding ground.
pub const MAX_WARP_STEPS: u32 = 1000;

/// Carry out one request against `geometry` and return the step to keep as
/// the latest resolution.
pub(crate) fn apply_request<G: GeometryProvider + ?Sized>(
    entity: Entity,
    controller: &mut CharacterController2D,
    geometry: &mut G,
    request: MovementRequest,
    dt: f32,
) -> FrameResolution {
    if request.warp_to_ground {
        let warped = match controller.try_warp_to_ground(geometry, dt, MAX_WARP_STEPS) {
            Ok(warp) => {
                debug!("Warped {:?} to ground in {} steps", entity, warp.steps);
                warp.last
            }
            Err(e) => {
                warn!("Warp to ground for {:?} failed: {}", entity, e);
                FrameResolution::default()
            }
        };

        // A bare warp request has nothing left to move
        if request.delta == Vec2::ZERO {
            return warped;
        }
    }

    controller.move_by(geometry, request.delta, dt)
}

pub(crate) fn apply_movement_requests(
    spatial_query: SpatialQuery,
    time: Res<Time>,
    mut controllers: Query<(
        Entity,
        &mut CharacterController2D,
        &mut MovementRequest,
        &mut LastResolution,
        &mut Transform,
        &Collider,
    )>,
    mut collided: MessageWriter<ControllerCollided>,
) {
    let dt = time.delta_secs();

    for (entity, mut controller, mut request, mut last, mut transform, collider) in &mut controllers
    {
        let request = std::mem::take(&mut *request);

        let Some(bounds) = box_bounds(&transform, collider) else {
            warn!("Controller {:?} needs a rectangle collider, skipping", entity);
            continue;
        };

        let mut geometry = AvianGeometry::new(&spatial_query, entity, bounds);
        let resolution = apply_request(entity, &mut controller, &mut geometry, request, dt);

        for hit in &resolution.hits {
            collided.write(ControllerCollided {
                controller: entity,
                hit: *hit,
            });
        }
        last.0 = resolution;

        let translation = geometry.translation();
        if translation != Vec2::ZERO {
            transform.translation += translation.extend(0.0);
        }
    }
}
