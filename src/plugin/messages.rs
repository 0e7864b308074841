//! Plugin domain: messages mirroring controller notifications.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::geometry::RayHit;

/// A sweep ray of `controller` hit something during its move.
#[derive(Debug, Clone, Copy)]
pub struct ControllerCollided {
    pub controller: Entity,
    pub hit: RayHit,
}

impl Message for ControllerCollided {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEntered {
    pub controller: Entity,
    pub trigger: Entity,
}

impl Message for TriggerEntered {}

/// Sent every frame after the first that `controller` overlaps `trigger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerStayed {
    pub controller: Entity,
    pub trigger: Entity,
}

impl Message for TriggerStayed {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerExited {
    pub controller: Entity,
    pub trigger: Entity,
}

impl Message for TriggerExited {}
