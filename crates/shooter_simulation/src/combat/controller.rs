//! CombatController - fire/reload state machine
//!
//! Состояния: Unoccupied → FireTimerInProgress → Unoccupied (auto-fire цикл)
//!            Unoccupied → Reloading → Unoccupied (finish_reloading от анимации)
//!
//! Fire и reload взаимоисключающие: обе операции требуют Unoccupied.
//! Все невалидные действия - тихий no-op (state не меняется).
//!
//! Таймеры = scheduled continuations:
//! - fire-rate timer → `on_fire_timer_elapsed` (re-fire или reload)
//! - shot window (0.05s) → держит crosshair shooting factor поднятым
//! `None` = не взведён, `take()` = отмена.

use bevy::prelude::*;
use std::time::Duration;

use super::ammo::AmmoInventory;
use super::weapon::Weapon;
use crate::config::CombatConfig;

/// Боевое состояние (ровно одно активно)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum CombatState {
    #[default]
    Unoccupied,
    FireTimerInProgress,
    Reloading,
}

/// Результат попытки выстрела
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Нет оружия или state != Unoccupied - ничего не изменилось
    Blocked,
    /// Магазин пуст: выстрела нет, но crosshair всё равно дёргается
    DryFire,
    /// Выстрел: патрон списан, fire-rate timer взведён
    Fired { ammo_remaining: u32 },
}

/// Что произошло когда fire-rate timer истёк
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoFireOutcome {
    /// Таймер не истекал или ничего не последовало
    Idle,
    /// Кнопка всё ещё зажата → следующий выстрел
    Refired { ammo_remaining: u32 },
    /// Магазин пуст → начали reload
    ReloadStarted,
}

/// Перенос патронов из запаса в магазин (finish_reloading)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTransfer {
    /// Сколько патронов перешло в магазин
    pub moved: u32,
    /// Магазин после reload
    pub magazine: u32,
    /// Запас того же kind после reload
    pub carried: u32,
}

/// Оружие, покинувшее руки (drop/swap)
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedWeapon {
    pub weapon: Weapon,
    /// true если drop прервал незавершённый reload
    pub reload_cancelled: bool,
}

/// Боевой контроллер персонажа
///
/// Владеет оружием в руках по значению (никаких back-references),
/// запасом патронов и таймерами auto-fire.
#[derive(Component, Debug, Clone)]
pub struct CombatController {
    state: CombatState,
    equipped: Option<Weapon>,
    ammo: AmmoInventory,

    fire_button_held: bool,
    aiming_button_held: bool,
    /// Реально целимся (во время reload выключено даже при зажатой кнопке)
    aiming: bool,

    fire_timer: Option<Timer>,
    shot_window: Option<Timer>,

    /// Пауза между выстрелами (секунды)
    automatic_fire_rate: f32,
    /// Сколько crosshair держит "shooting" после выстрела (секунды)
    shoot_time_duration: f32,
}

impl Default for CombatController {
    fn default() -> Self {
        Self::new(0.1, 0.05)
    }
}

impl CombatController {
    /// Пустой контроллер: без оружия, без запаса
    pub fn new(automatic_fire_rate: f32, shoot_time_duration: f32) -> Self {
        Self {
            state: CombatState::Unoccupied,
            equipped: None,
            ammo: AmmoInventory::new(),
            fire_button_held: false,
            aiming_button_held: false,
            aiming: false,
            fire_timer: None,
            shot_window: None,
            automatic_fire_rate,
            shoot_time_duration,
        }
    }

    /// Spawn-конфигурация: default weapon в руках + стартовый запас патронов
    pub fn from_config(config: &CombatConfig) -> Self {
        let mut controller = Self::new(config.automatic_fire_rate, config.shoot_time_duration);
        controller.ammo =
            AmmoInventory::with_starting_ammo(config.starting_9mm_ammo, config.starting_ar_ammo);
        controller.equipped = Some(Weapon::from_kind(config.default_weapon));
        controller
    }

    pub fn with_ammo(mut self, ammo: AmmoInventory) -> Self {
        self.ammo = ammo;
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.equipped = Some(weapon);
        self
    }

    // === Query surface ===

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn is_reloading(&self) -> bool {
        self.state == CombatState::Reloading
    }

    pub fn is_aiming(&self) -> bool {
        self.aiming
    }

    pub fn is_fire_button_held(&self) -> bool {
        self.fire_button_held
    }

    /// true в течение shoot_time_duration после попытки выстрела
    pub fn is_shot_window_open(&self) -> bool {
        self.shot_window.is_some()
    }

    pub fn is_fire_timer_armed(&self) -> bool {
        self.fire_timer.is_some()
    }

    pub fn equipped_weapon(&self) -> Option<&Weapon> {
        self.equipped.as_ref()
    }

    pub fn ammo_inventory(&self) -> &AmmoInventory {
        &self.ammo
    }

    pub fn ammo_inventory_mut(&mut self) -> &mut AmmoInventory {
        &mut self.ammo
    }

    pub fn weapon_has_ammo(&self) -> bool {
        self.equipped.as_ref().is_some_and(Weapon::has_ammo)
    }

    /// Есть ли запас патронов под оружие в руках
    pub fn carrying_ammo(&self) -> bool {
        self.equipped
            .as_ref()
            .is_some_and(|weapon| self.ammo.has(weapon.ammo_kind))
    }

    // === Buttons ===

    pub fn fire_button_pressed(&mut self) -> FireOutcome {
        self.fire_button_held = true;
        self.fire_weapon()
    }

    pub fn fire_button_released(&mut self) {
        self.fire_button_held = false;
    }

    /// Во время reload только запоминает кнопку, прицеливание начнётся после
    pub fn aiming_button_pressed(&mut self) {
        self.aiming_button_held = true;
        if self.state != CombatState::Reloading {
            self.aiming = true;
        }
    }

    pub fn aiming_button_released(&mut self) {
        self.aiming_button_held = false;
        self.aiming = false;
    }

    pub fn is_aiming_button_held(&self) -> bool {
        self.aiming_button_held
    }

    /// Выход из Reloading: вернуть прицел если кнопка всё ещё зажата
    fn leave_reloading(&mut self) {
        self.state = CombatState::Unoccupied;
        self.aiming = self.aiming_button_held;
    }

    // === State machine ===

    /// Выстрел
    ///
    /// Crosshair shot window открывается даже при пустом магазине (dry fire).
    pub fn fire_weapon(&mut self) -> FireOutcome {
        if self.state != CombatState::Unoccupied {
            return FireOutcome::Blocked;
        }
        let Some(weapon) = self.equipped.as_mut() else {
            return FireOutcome::Blocked;
        };

        let outcome = if weapon.has_ammo() {
            weapon.decrement_ammo();
            let ammo_remaining = weapon.ammo();
            self.start_fire_timer();
            FireOutcome::Fired { ammo_remaining }
        } else {
            FireOutcome::DryFire
        };

        self.start_crosshair_bullet_fire();
        outcome
    }

    fn start_fire_timer(&mut self) {
        self.state = CombatState::FireTimerInProgress;
        self.fire_timer = Some(Timer::from_seconds(self.automatic_fire_rate, TimerMode::Once));
    }

    fn start_crosshair_bullet_fire(&mut self) {
        self.shot_window = Some(Timer::from_seconds(self.shoot_time_duration, TimerMode::Once));
    }

    /// Fire-rate timer истёк: Unoccupied, затем re-fire (кнопка зажата) или reload (магазин пуст)
    ///
    /// Вне FireTimerInProgress - no-op (устаревший таймер).
    pub fn on_fire_timer_elapsed(&mut self) -> AutoFireOutcome {
        if self.state != CombatState::FireTimerInProgress {
            return AutoFireOutcome::Idle;
        }

        self.fire_timer = None;
        self.state = CombatState::Unoccupied;

        if self.weapon_has_ammo() {
            if self.fire_button_held {
                if let FireOutcome::Fired { ammo_remaining } = self.fire_weapon() {
                    return AutoFireOutcome::Refired { ammo_remaining };
                }
            }
            AutoFireOutcome::Idle
        } else if self.reload_weapon() {
            AutoFireOutcome::ReloadStarted
        } else {
            AutoFireOutcome::Idle
        }
    }

    /// Начать reload
    ///
    /// Требует: Unoccupied, оружие в руках, запас нужного kind, магазин не полный.
    /// Прицеливание сбрасывается на время reload.
    /// Перенос патронов - позже, в `finish_reloading` (сигнал от анимации).
    pub fn reload_weapon(&mut self) -> bool {
        if self.state != CombatState::Unoccupied {
            return false;
        }
        if !self.carrying_ammo() || self.equipped.as_ref().is_none_or(Weapon::clip_is_full) {
            return false;
        }

        self.state = CombatState::Reloading;
        self.aiming = false;
        true
    }

    /// Reload анимация закончилась: перенести min(запас, свободное место) в магазин
    ///
    /// Сумма магазин + запас сохраняется. Вне Reloading (например reload отменён drop'ом) - no-op.
    pub fn finish_reloading(&mut self) -> Option<ReloadTransfer> {
        if self.state != CombatState::Reloading {
            return None;
        }
        self.leave_reloading();

        let weapon = self.equipped.as_mut()?;
        let carried = self.ammo.count(weapon.ammo_kind);
        let mag_empty_space = weapon.empty_space();

        let moved = if carried > mag_empty_space {
            mag_empty_space
        } else {
            carried
        };

        let taken = self.ammo.take(weapon.ammo_kind, moved);
        weapon.reload_ammo(taken);

        Some(ReloadTransfer {
            moved: taken,
            magazine: weapon.ammo(),
            carried: self.ammo.count(weapon.ammo_kind),
        })
    }

    /// Animation notify: рука взяла магазин
    pub fn grab_clip(&mut self) -> bool {
        match self.equipped.as_mut() {
            Some(weapon) => {
                weapon.moving_clip = true;
                true
            }
            None => false,
        }
    }

    /// Animation notify: магазин вставлен обратно
    pub fn release_clip(&mut self) {
        if let Some(weapon) = self.equipped.as_mut() {
            weapon.moving_clip = false;
        }
    }

    // === Ownership transfer ===

    /// Взять оружие в руки, возвращает то что было в слоте
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.equipped.replace(weapon)
    }

    /// Выпустить оружие из рук
    ///
    /// Drop во время Reloading отменяет reload: Unoccupied, патроны не переносятся.
    pub fn drop_weapon(&mut self) -> Option<DroppedWeapon> {
        let mut weapon = self.equipped.take()?;
        weapon.moving_clip = false;

        let reload_cancelled = self.state == CombatState::Reloading;
        if reload_cancelled {
            self.leave_reloading();
        }

        Some(DroppedWeapon {
            weapon,
            reload_cancelled,
        })
    }

    /// Drop текущего + equip нового
    pub fn swap_weapon(&mut self, weapon: Weapon) -> Option<DroppedWeapon> {
        let dropped = self.drop_weapon();
        self.equip_weapon(weapon);
        dropped
    }

    // === Tick ===

    /// Продвинуть таймеры на `delta`
    ///
    /// Shot window тикает первым, чтобы re-fire открыл свежее окно.
    pub fn advance_timers(&mut self, delta: Duration) -> AutoFireOutcome {
        if let Some(window) = self.shot_window.as_mut() {
            if window.tick(delta).finished() {
                self.shot_window = None;
            }
        }

        let fire_elapsed = match self.fire_timer.as_mut() {
            Some(timer) => timer.tick(delta).finished(),
            None => false,
        };

        if fire_elapsed {
            self.on_fire_timer_elapsed()
        } else {
            AutoFireOutcome::Idle
        }
    }
}
