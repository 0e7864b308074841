//! Controller domain: observer list for collision and trigger notifications.

use bevy::prelude::*;

use crate::geometry::RayHit;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum TriggerPhase {
    Enter,
    Stay,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControllerEvent {
    /// A sweep ray hit something this frame.
    Collided(RayHit),
    /// Overlap reported by the collision world, passed through untouched.
    Trigger { phase: TriggerPhase, other: Entity },
}

type Listener = Box<dyn FnMut(&ControllerEvent) + Send + Sync>;

/// Listeners are called in registration order.
#[derive(Default)]
pub struct ControllerListeners {
    listeners: Vec<Listener>,
}

impl ControllerListeners {
    pub fn push(&mut self, listener: impl FnMut(&ControllerEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn dispatch(&mut self, event: &ControllerEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl std::fmt::Debug for ControllerListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
