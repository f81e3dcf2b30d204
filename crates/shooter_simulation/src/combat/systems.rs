//! Combat systems: timers → actions → animation notifies
//!
//! Порядок задаётся в `CombatPlugin` (chain).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::controller::{AutoFireOutcome, CombatController, FireOutcome};
use super::events::*;
use crate::input::{ActionIntent, ShooterAction};

/// Все sim → host combat events одним параметром
#[derive(SystemParam)]
pub struct CombatEventWriters<'w> {
    fired: EventWriter<'w, WeaponFired>,
    dry_fired: EventWriter<'w, DryFired>,
    reload_started: EventWriter<'w, ReloadStarted>,
    reload_completed: EventWriter<'w, ReloadCompleted>,
}

impl CombatEventWriters<'_> {
    fn fire_outcome(&mut self, shooter: Entity, controller: &CombatController, outcome: FireOutcome) {
        match outcome {
            FireOutcome::Fired { ammo_remaining } => {
                let Some(weapon) = controller.equipped_weapon() else {
                    return;
                };
                self.fired.write(WeaponFired {
                    shooter,
                    weapon_kind: weapon.kind,
                    ammo_remaining,
                });
            }
            FireOutcome::DryFire => {
                self.dry_fired.write(DryFired { shooter });
            }
            FireOutcome::Blocked => {}
        }
    }

    fn auto_fire_outcome(
        &mut self,
        shooter: Entity,
        controller: &CombatController,
        outcome: AutoFireOutcome,
    ) {
        match outcome {
            AutoFireOutcome::Refired { ammo_remaining } => {
                self.fire_outcome(shooter, controller, FireOutcome::Fired { ammo_remaining });
            }
            AutoFireOutcome::ReloadStarted => self.reload_started(shooter, controller),
            AutoFireOutcome::Idle => {}
        }
    }

    fn reload_started(&mut self, shooter: Entity, controller: &CombatController) {
        let Some(weapon) = controller.equipped_weapon() else {
            return;
        };
        crate::logger::log(&format!(
            "🔄 {:?} reloading {:?} ({} in magazine)",
            shooter,
            weapon.kind,
            weapon.ammo()
        ));
        self.reload_started.write(ReloadStarted {
            shooter,
            reload_section: weapon.reload_section.clone(),
        });
    }
}

/// System: fire-rate timer + shot window
///
/// Истёкший fire timer = re-fire (кнопка зажата) или auto-reload (магазин пуст).
pub fn tick_combat_timers(
    mut shooters: Query<(Entity, &mut CombatController)>,
    time: Res<Time>,
    mut events: CombatEventWriters,
) {
    let delta = time.delta();

    for (entity, mut controller) in shooters.iter_mut() {
        let outcome = controller.advance_timers(delta);
        events.auto_fire_outcome(entity, &controller, outcome);
    }
}

/// System: fire / aim / reload кнопки
///
/// Crouch, jump, sprint и select обрабатываются в movement и items.
pub fn process_combat_actions(
    mut intents: EventReader<ActionIntent>,
    mut shooters: Query<&mut CombatController>,
    mut events: CombatEventWriters,
) {
    for intent in intents.read() {
        let Ok(mut controller) = shooters.get_mut(intent.entity) else {
            continue;
        };

        match intent.action {
            ShooterAction::FirePressed => {
                let outcome = controller.fire_button_pressed();
                events.fire_outcome(intent.entity, &controller, outcome);
            }
            ShooterAction::FireReleased => controller.fire_button_released(),
            ShooterAction::AimPressed => controller.aiming_button_pressed(),
            ShooterAction::AimReleased => controller.aiming_button_released(),
            ShooterAction::ReloadPressed => {
                if controller.reload_weapon() {
                    events.reload_started(intent.entity, &controller);
                }
            }
            _ => {}
        }
    }
}

/// System: animation notifies от host (reload montage, clip bone)
pub fn process_animation_notifies(
    mut finished: EventReader<ReloadAnimationFinished>,
    mut grabbed: EventReader<ClipGrabbed>,
    mut released: EventReader<ClipReleased>,
    mut shooters: Query<&mut CombatController>,
    mut events: CombatEventWriters,
) {
    for event in grabbed.read() {
        if let Ok(mut controller) = shooters.get_mut(event.shooter) {
            controller.grab_clip();
        }
    }

    for event in released.read() {
        if let Ok(mut controller) = shooters.get_mut(event.shooter) {
            controller.release_clip();
        }
    }

    for event in finished.read() {
        let Ok(mut controller) = shooters.get_mut(event.shooter) else {
            crate::logger::log_warning(&format!(
                "ReloadAnimationFinished for {:?} without CombatController",
                event.shooter
            ));
            continue;
        };

        // None = reload отменён раньше (drop/swap), сигнал устарел
        let Some(transfer) = controller.finish_reloading() else {
            continue;
        };
        let Some(ammo_kind) = controller.equipped_weapon().map(|weapon| weapon.ammo_kind) else {
            continue;
        };

        crate::logger::log(&format!(
            "✅ {:?} reloaded: +{} → magazine {}, carried {}",
            event.shooter, transfer.moved, transfer.magazine, transfer.carried
        ));
        events.reload_completed.write(ReloadCompleted {
            shooter: event.shooter,
            ammo_kind,
            transfer,
        });
    }
}
