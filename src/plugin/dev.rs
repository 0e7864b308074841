//! Plugin domain: debug drawing of controller rays (dev-tools only).

use bevy::prelude::*;

use crate::controller::{CastRecord, Sweep};
use crate::plugin::ControllerSet;
use crate::plugin::components::LastResolution;

/// Rays cast by every controller during the last move.
#[derive(Resource, Debug)]
pub struct ControllerDebugRays {
    pub enabled: bool,
    pub hit_marker_radius: f32,
    pub casts: Vec<CastRecord>,
}

impl Default for ControllerDebugRays {
    fn default() -> Self {
        Self {
            enabled: true,
            hit_marker_radius: 2.0,
            casts: Vec::new(),
        }
    }
}

pub(crate) fn build(app: &mut App) {
    app.init_resource::<ControllerDebugRays>().add_systems(
        Update,
        (toggle_debug_rays, collect_debug_rays, draw_debug_rays)
            .chain()
            .after(ControllerSet::Move),
    );
}

pub(crate) fn ray_color(sweep: Sweep) -> Color {
    match sweep {
        Sweep::Horizontal => Color::srgb(1.0, 0.0, 0.0),
        Sweep::Vertical => Color::srgb(1.0, 1.0, 0.0),
        Sweep::SlopeAscend | Sweep::SlopeDescend => Color::srgb(0.0, 1.0, 1.0),
    }
}

/// Where the drawn ray stops: the hit point, or full length on a miss.
pub(crate) fn ray_end(cast: &CastRecord) -> Vec2 {
    cast.hit.unwrap_or(cast.origin + *cast.direction * cast.distance)
}

fn toggle_debug_rays(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut rays: ResMut<ControllerDebugRays>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    // F3: toggle ray drawing
    if keyboard.just_pressed(KeyCode::F3) {
        rays.enabled = !rays.enabled;
        info!("Controller debug rays {}", if rays.enabled { "ON" } else { "OFF" });
    }
}

fn collect_debug_rays(mut rays: ResMut<ControllerDebugRays>, frames: Query<&LastResolution>) {
    rays.casts.clear();
    if !rays.enabled {
        return;
    }

    for frame in &frames {
        rays.casts.extend(frame.0.casts.iter().copied());
    }
}

fn draw_debug_rays(rays: Res<ControllerDebugRays>, mut gizmos: Gizmos) {
    let hit_color = Color::srgb(0.0, 1.0, 0.0);

    for cast in &rays.casts {
        gizmos.line_2d(cast.origin, ray_end(cast), ray_color(cast.sweep));

        if let Some(hit) = cast.hit {
            gizmos.circle_2d(hit, rays.hit_marker_radius, hit_color);
        }
    }
}
