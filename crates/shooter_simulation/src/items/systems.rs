//! Item systems: overlap → trace → select → interp → pickup

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{CrosshairTrace, ItemKind, ItemProgress, ItemState, ItemTracker, WorldItem};
use super::events::*;
use super::throw::spawn_thrown_weapon;
use crate::combat::{CombatController, DroppedWeapon, ReloadCancelled, WeaponDropped, WeaponEquipped};
use crate::config::{ItemConfig, ShooterConfig};
use crate::input::{ActionIntent, ShooterAction};
use crate::movement::CameraRig;
use crate::DeterministicRng;

/// Передача оружия из рук в мир (drop / swap)
#[derive(SystemParam)]
pub struct WeaponHandoff<'w, 's> {
    commands: Commands<'w, 's>,
    rng: ResMut<'w, DeterministicRng>,
    dropped: EventWriter<'w, WeaponDropped>,
    cancelled: EventWriter<'w, ReloadCancelled>,
    equipped: EventWriter<'w, WeaponEquipped>,
}

impl WeaponHandoff<'_, '_> {
    fn throw(
        &mut self,
        shooter: Entity,
        dropped: DroppedWeapon,
        origin: &Transform,
        config: &ItemConfig,
    ) -> Entity {
        if dropped.reload_cancelled {
            crate::logger::log(&format!("⛔ {:?} reload cancelled by drop", shooter));
            self.cancelled.write(ReloadCancelled { shooter });
        }

        let item = spawn_thrown_weapon(&mut self.commands, dropped.weapon, origin, &mut self.rng, config);
        self.dropped.write(WeaponDropped { shooter, item });
        item
    }
}

/// System: overlap counter (host area events)
pub fn process_item_overlaps(
    mut overlaps: EventReader<ItemOverlapChanged>,
    mut trackers: Query<&mut ItemTracker>,
) {
    for event in overlaps.read() {
        if let Ok(mut tracker) = trackers.get_mut(event.shooter) {
            tracker.increment_overlapped_item_count(event.amount);
        }
    }
}

/// System: Select → предмет под прицелом летит к камере
pub fn process_select_actions(
    mut intents: EventReader<ActionIntent>,
    trackers: Query<&ItemTracker>,
    mut items: Query<(&mut WorldItem, &Transform)>,
    config: Res<ShooterConfig>,
) {
    for intent in intents.read() {
        if intent.action != ShooterAction::SelectPressed {
            continue;
        }
        let Some(hit) = trackers.get(intent.entity).ok().and_then(ItemTracker::trace_hit_item) else {
            continue;
        };
        let Ok((mut item, transform)) = items.get_mut(hit) else {
            continue;
        };

        if item.start_item_curve(intent.entity, transform.translation, &config.items) {
            crate::logger::log(&format!("🎯 {:?} picking up {:?}", intent.entity, hit));
        }
    }
}

/// System: явный drop оружия
pub fn process_drop_requests(
    mut requests: EventReader<DropWeaponRequested>,
    mut shooters: Query<(&mut CombatController, &Transform)>,
    config: Res<ShooterConfig>,
    mut handoff: WeaponHandoff,
) {
    for request in requests.read() {
        let Ok((mut controller, transform)) = shooters.get_mut(request.shooter) else {
            continue;
        };
        if let Some(dropped) = controller.drop_weapon() {
            handoff.throw(request.shooter, dropped, transform, &config.items);
        }
    }
}

/// System: trace for items (pickup widget visibility)
pub fn trace_for_items(
    mut shooters: Query<(&mut ItemTracker, &CrosshairTrace)>,
    items: Query<&WorldItem>,
    mut widgets: EventWriter<PickupWidgetVisibility>,
) {
    for (mut tracker, trace) in shooters.iter_mut() {
        let hit = trace
            .hit
            .filter(|entity| items.get(*entity).is_ok_and(|item| item.state() == ItemState::Pickup));

        let changes = tracker.update_trace(hit);
        if let Some(item) = changes.hide {
            widgets.write(PickupWidgetVisibility { item, visible: false });
        }
        if let Some(item) = changes.show {
            widgets.write(PickupWidgetVisibility { item, visible: true });
        }
    }
}

/// System: item timers (falling, interp к камере, pickup)
pub fn update_item_lifecycle(
    mut items: Query<(Entity, &mut WorldItem, &mut Transform), Without<CombatController>>,
    mut shooters: Query<
        (&mut CombatController, &mut ItemTracker, &CameraRig, &Transform),
        Without<WorldItem>,
    >,
    config: Res<ShooterConfig>,
    time: Res<Time>,
    mut handoff: WeaponHandoff,
    mut picked: EventWriter<ItemPickedUp>,
) {
    let delta = time.delta();

    for (entity, mut item, mut transform) in items.iter_mut() {
        match item.advance(delta) {
            ItemProgress::Idle => {}
            ItemProgress::Landed => {
                handoff
                    .commands
                    .entity(entity)
                    .remove::<(RigidBody, ExternalImpulse)>();
            }
            ItemProgress::Interping { collector, alpha } => {
                if let Ok((_, _, rig, _)) = shooters.get(collector) {
                    let target = rig.interp_target_location(&config.camera);
                    transform.translation = item.interp_start().lerp(target, alpha);
                }
            }
            ItemProgress::ReadyForPickup { collector } => {
                let Ok((mut controller, mut tracker, _, origin)) = shooters.get_mut(collector) else {
                    crate::logger::log_warning(&format!(
                        "Item {:?}: collector {:?} gone, back to Pickup",
                        entity, collector
                    ));
                    item.reset_to_pickup();
                    continue;
                };

                match item.kind.clone() {
                    ItemKind::Weapon(weapon) => {
                        let previous = controller.swap_weapon(weapon.clone());
                        tracker.clear_trace_refs();
                        if let Some(dropped) = previous {
                            handoff.throw(collector, dropped, origin, &config.items);
                        }
                        handoff.equipped.write(WeaponEquipped {
                            shooter: collector,
                            weapon,
                        });
                    }
                    ItemKind::Ammo { kind, amount } => {
                        controller.ammo_inventory_mut().add(kind, amount);
                    }
                    ItemKind::Other => {
                        item.reset_to_pickup();
                        continue;
                    }
                }

                crate::logger::log(&format!("📦 {:?} picked up {:?}", collector, item.kind));
                picked.write(ItemPickedUp {
                    shooter: collector,
                    item: entity,
                    kind: item.kind.clone(),
                });
                handoff.commands.entity(entity).despawn();
            }
        }
    }
}
