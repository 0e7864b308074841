//! Plugin domain: forwarding sensor overlaps to controllers.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::controller::{CharacterController2D, TriggerPhase};
use crate::geometry::CollisionMask;
use crate::plugin::messages::{TriggerEntered, TriggerExited, TriggerStayed};

/// Whether a sensor on `layers` raises trigger events for `controller`.
pub(crate) fn is_trigger_for(controller: &CharacterController2D, layers: &CollisionLayers) -> bool {
    controller.accepts_trigger(CollisionMask(layers.memberships.0))
}

pub(crate) fn forward_trigger_contacts(
    mut collision_start_events: MessageReader<CollisionStart>,
    mut collision_end_events: MessageReader<CollisionEnd>,
    mut controllers: Query<(Entity, &mut CharacterController2D, &CollidingEntities)>,
    sensors: Query<&CollisionLayers, With<Sensor>>,
    mut entered: MessageWriter<TriggerEntered>,
    mut stayed: MessageWriter<TriggerStayed>,
    mut exited: MessageWriter<TriggerExited>,
) {
    // Pairs that started this frame get an enter, not a stay
    let mut just_entered: HashSet<(Entity, Entity)> = HashSet::default();

    for event in collision_start_events.read() {
        let (controller_entity, trigger) = if controllers.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if controllers.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        let Ok(layers) = sensors.get(trigger) else {
            continue;
        };
        let Ok((_, mut controller, _)) = controllers.get_mut(controller_entity) else {
            continue;
        };
        if !is_trigger_for(&controller, layers) {
            continue;
        }

        debug!("{:?} entered trigger {:?}", controller_entity, trigger);
        controller.forward_trigger(TriggerPhase::Enter, trigger);
        entered.write(TriggerEntered {
            controller: controller_entity,
            trigger,
        });
        just_entered.insert((controller_entity, trigger));
    }

    for (controller_entity, mut controller, colliding) in &mut controllers {
        for &trigger in colliding.iter() {
            if just_entered.contains(&(controller_entity, trigger)) {
                continue;
            }
            let Ok(layers) = sensors.get(trigger) else {
                continue;
            };
            if !is_trigger_for(&controller, layers) {
                continue;
            }

            controller.forward_trigger(TriggerPhase::Stay, trigger);
            stayed.write(TriggerStayed {
                controller: controller_entity,
                trigger,
            });
        }
    }

    for event in collision_end_events.read() {
        let (controller_entity, trigger) = if controllers.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if controllers.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        // Despawned sensors can no longer be matched against the trigger mask
        let Ok(layers) = sensors.get(trigger) else {
            continue;
        };
        let Ok((_, mut controller, _)) = controllers.get_mut(controller_entity) else {
            continue;
        };
        if !is_trigger_for(&controller, layers) {
            continue;
        }

        debug!("{:?} exited trigger {:?}", controller_entity, trigger);
        controller.forward_trigger(TriggerPhase::Exit, trigger);
        exited.write(TriggerExited {
            controller: controller_entity,
            trigger,
        });
    }
}
