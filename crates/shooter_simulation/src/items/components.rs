//! Item components
//!
//! # Lifecycle
//!
//! ```text
//! Pickup ──select──▶ EquipInterping ──item_interp_time──▶ (подобран, entity despawn)
//!   ▲                                                     Weapon → руки, Ammo → запас
//!   └──throw_weapon_time── Falling ◀──drop/swap── оружие из рук
//! ```
//!
//! `PickedUp` - последнее состояние world entity перед despawn,
//! дальше предмет живёт в CombatController.

use bevy::prelude::*;
use std::time::Duration;

use crate::combat::{AmmoKind, Weapon};
use crate::config::ItemConfig;

/// Что лежит в мире
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Weapon(Weapon),
    Ammo { kind: AmmoKind, amount: u32 },
    /// Декоративный предмет (подбирать нечего)
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ItemState {
    #[default]
    Pickup,
    EquipInterping,
    PickedUp,
    Falling,
}

/// Что произошло с предметом за tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemProgress {
    Idle,
    /// Интерполяция к камере, alpha в [0, 1)
    Interping { collector: Entity, alpha: f32 },
    /// Долетел до камеры → отдать `collector`
    ReadyForPickup { collector: Entity },
    /// Брошенное оружие упало → снова Pickup
    Landed,
}

/// Предмет в мире
#[derive(Component, Debug, Clone)]
pub struct WorldItem {
    pub kind: ItemKind,
    state: ItemState,
    timer: Option<Timer>,
    /// Кто подбирает (EquipInterping)
    collector: Option<Entity>,
    /// Позиция в момент select
    interp_start: Vec3,
}

impl WorldItem {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            state: ItemState::Pickup,
            timer: None,
            collector: None,
            interp_start: Vec3::ZERO,
        }
    }

    /// Брошенный предмет: Falling на `throw_weapon_time`
    pub fn falling(kind: ItemKind, config: &ItemConfig) -> Self {
        let mut item = Self::new(kind);
        item.state = ItemState::Falling;
        item.timer = Some(Timer::from_seconds(config.throw_weapon_time, TimerMode::Once));
        item
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn collector(&self) -> Option<Entity> {
        self.collector
    }

    pub fn interp_start(&self) -> Vec3 {
        self.interp_start
    }

    /// Select: начать полёт к камере `collector`. Только из Pickup.
    pub fn start_item_curve(&mut self, collector: Entity, start: Vec3, config: &ItemConfig) -> bool {
        if self.state != ItemState::Pickup {
            return false;
        }
        self.state = ItemState::EquipInterping;
        self.collector = Some(collector);
        self.interp_start = start;
        self.timer = Some(Timer::from_seconds(config.item_interp_time, TimerMode::Once));
        true
    }

    /// Вернуть в мир (Other не подбирается)
    pub fn reset_to_pickup(&mut self) {
        self.state = ItemState::Pickup;
        self.timer = None;
        self.collector = None;
    }

    pub fn advance(&mut self, delta: Duration) -> ItemProgress {
        let Some(timer) = self.timer.as_mut() else {
            return ItemProgress::Idle;
        };
        let finished = timer.tick(delta).finished();
        let alpha = timer.fraction();

        match self.state {
            ItemState::Falling if finished => {
                self.state = ItemState::Pickup;
                self.timer = None;
                ItemProgress::Landed
            }
            ItemState::EquipInterping => {
                let Some(collector) = self.collector else {
                    self.reset_to_pickup();
                    return ItemProgress::Idle;
                };
                if finished {
                    self.state = ItemState::PickedUp;
                    self.timer = None;
                    ItemProgress::ReadyForPickup { collector }
                } else {
                    ItemProgress::Interping { collector, alpha }
                }
            }
            _ => ItemProgress::Idle,
        }
    }
}

/// Результат trace'а за tick: какие pickup widgets переключить
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetChanges {
    pub show: Option<Entity>,
    pub hide: Option<Entity>,
}

/// Overlap + trace-for-items состояние персонажа
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ItemTracker {
    overlapped_item_count: u32,
    trace_hit_item: Option<Entity>,
    trace_hit_item_last_frame: Option<Entity>,
}

impl ItemTracker {
    /// Счётчик не уходит ниже 0
    pub fn increment_overlapped_item_count(&mut self, amount: i32) {
        let next = self.overlapped_item_count as i64 + amount as i64;
        self.overlapped_item_count = next.clamp(0, u32::MAX as i64) as u32;
    }

    pub fn overlapped_item_count(&self) -> u32 {
        self.overlapped_item_count
    }

    pub fn should_trace_for_items(&self) -> bool {
        self.overlapped_item_count > 0
    }

    pub fn trace_hit_item(&self) -> Option<Entity> {
        self.trace_hit_item
    }

    /// Применить результат crosshair trace (`hit` - только WorldItem entities)
    pub fn update_trace(&mut self, hit: Option<Entity>) -> WidgetChanges {
        let mut changes = WidgetChanges::default();

        if !self.should_trace_for_items() {
            changes.hide = self.trace_hit_item_last_frame.take();
            self.trace_hit_item = None;
            return changes;
        }

        self.trace_hit_item = hit;
        changes.show = hit;
        if self.trace_hit_item_last_frame != hit {
            changes.hide = self.trace_hit_item_last_frame;
        }
        self.trace_hit_item_last_frame = hit;
        changes
    }

    /// После swap ссылки на подобранный предмет недействительны
    pub fn clear_trace_refs(&mut self) {
        self.trace_hit_item = None;
        self.trace_hit_item_last_frame = None;
    }
}

/// Результат crosshair trace от host'а (физический ray cast)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CrosshairTrace {
    pub hit: Option<Entity>,
    /// Точка попадания (или конец луча)
    pub location: Vec3,
}
