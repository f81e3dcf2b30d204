//! Carried ammo (запас вне магазина)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Тип патронов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AmmoKind {
    NineMillimeter,
    AssaultRifle,
}

/// AmmoKind → количество в запасе
///
/// Инвариант: счётчики неотрицательны (u32 + saturating операции)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmmoInventory {
    counts: HashMap<AmmoKind, u32>,
}

impl AmmoInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Стартовый запас (один раз при spawn)
    pub fn with_starting_ammo(nine_millimeter: u32, assault_rifle: u32) -> Self {
        let mut inventory = Self::new();
        inventory.set(AmmoKind::NineMillimeter, nine_millimeter);
        inventory.set(AmmoKind::AssaultRifle, assault_rifle);
        inventory
    }

    /// 0 для отсутствующих kind
    pub fn count(&self, kind: AmmoKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn has(&self, kind: AmmoKind) -> bool {
        self.count(kind) > 0
    }

    pub fn set(&mut self, kind: AmmoKind, amount: u32) {
        self.counts.insert(kind, amount);
    }

    pub fn add(&mut self, kind: AmmoKind, amount: u32) {
        let entry = self.counts.entry(kind).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Забрать до `amount` патронов, возвращает сколько реально забрали
    pub fn take(&mut self, kind: AmmoKind, amount: u32) -> u32 {
        let Some(entry) = self.counts.get_mut(&kind) else {
            return 0;
        };
        let taken = amount.min(*entry);
        *entry -= taken;
        taken
    }

    /// Сумма всех запасов (для инвариантов в тестах)
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&count| count as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_ammo() {
        let inventory = AmmoInventory::with_starting_ammo(85, 123);
        assert_eq!(inventory.count(AmmoKind::NineMillimeter), 85);
        assert_eq!(inventory.count(AmmoKind::AssaultRifle), 123);
        assert_eq!(inventory.total(), 208);
    }

    #[test]
    fn test_take_never_goes_negative() {
        let mut inventory = AmmoInventory::with_starting_ammo(10, 0);
        assert_eq!(inventory.take(AmmoKind::NineMillimeter, 25), 10);
        assert_eq!(inventory.count(AmmoKind::NineMillimeter), 0);
        assert_eq!(inventory.take(AmmoKind::NineMillimeter, 1), 0);
    }

    #[test]
    fn test_missing_kind_is_empty() {
        let mut inventory = AmmoInventory::new();
        assert!(!inventory.has(AmmoKind::AssaultRifle));
        assert_eq!(inventory.take(AmmoKind::AssaultRifle, 5), 0);

        inventory.add(AmmoKind::AssaultRifle, 5);
        assert!(inventory.has(AmmoKind::AssaultRifle));
    }
}
