//! Plugin domain: runs character controllers inside a bevy app on avian2d.

mod components;
mod geometry;
mod messages;
mod systems;
mod triggers;

#[cfg(feature = "dev-tools")]
mod dev;


pub use components::{
    ControllerDefaults, ControllerLayer, KinematicCharacterBundle, LastResolution,
    MovementRequest, layer_mask,
};
#[cfg(feature = "dev-tools")]
pub use dev::ControllerDebugRays;
pub use geometry::AvianGeometry;
pub use messages::{ControllerCollided, TriggerEntered, TriggerExited, TriggerStayed};
pub use systems::MAX_WARP_STEPS;

use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::config::{ControllerConfig, load_config};
use crate::controller::{CollisionState, GroundTransition, SlopeContact};
use crate::geometry::CollisionMask;
use crate::plugin::systems::apply_movement_requests;
use crate::plugin::triggers::forward_trigger_contacts;

/// Ordering of the controller systems inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    /// Consume `MovementRequest`s and move bodies.
    Move,
    /// Forward sensor overlaps to controllers.
    Triggers,
}

#[derive(Default)]
pub struct RaycastControllerPlugin {
    /// RON or JSON file providing `ControllerDefaults`. Built-in defaults when unset.
    pub config_path: Option<PathBuf>,
}

impl RaycastControllerPlugin {
    pub fn with_config(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }
}

impl Plugin for RaycastControllerPlugin {
    fn build(&self, app: &mut App) {
        let defaults = load_defaults(self.config_path.as_deref());

        app.insert_resource(ControllerDefaults(defaults))
            .register_type::<ControllerConfig>()
            .register_type::<CollisionMask>()
            .register_type::<CollisionState>()
            .register_type::<SlopeContact>()
            .register_type::<GroundTransition>()
            .register_type::<MovementRequest>()
            .add_message::<ControllerCollided>()
            .add_message::<TriggerEntered>()
            .add_message::<TriggerStayed>()
            .add_message::<TriggerExited>()
            .configure_sets(Update, (ControllerSet::Move, ControllerSet::Triggers).chain())
            .add_systems(Update, apply_movement_requests.in_set(ControllerSet::Move))
            .add_systems(Update, forward_trigger_contacts.in_set(ControllerSet::Triggers));

        #[cfg(feature = "dev-tools")]
        dev::build(app);
    }
}

/// Load the config at `path`, falling back to the built-in defaults on any failure.
pub fn load_defaults(path: Option<&Path>) -> ControllerConfig {
    let Some(path) = path else {
        return ControllerConfig::default();
    };

    match load_config(path) {
        Ok(config) => {
            info!("Loaded controller config from {}", path.display());
            config
        }
        Err(e) => {
            error!("{}; using default controller config", e);
            ControllerConfig::default()
        }
    }
}
