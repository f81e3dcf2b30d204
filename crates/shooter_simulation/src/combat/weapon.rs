//! Weapon (magazine state) - то, что держит CombatController
//!
//! Architecture:
//! - ECS: Weapon хранит magazine + capacity + ammo kind (game state)
//! - Host: mesh, sockets, muzzle flash, beam trace
//! - Weapon передаётся по значению: controller ↔ world item (drop/pickup)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::ammo::AmmoKind;

/// Тип оружия (выбирает preset + reload montage section)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum WeaponKind {
    SubmachineGun,
    AssaultRifle,
}

/// Оружие с магазином
///
/// Инвариант: `ammo <= magazine_capacity`
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Weapon {
    pub kind: WeaponKind,

    /// Патроны в магазине
    ammo: u32,

    /// Ёмкость магазина
    magazine_capacity: u32,

    /// Какие патроны принимает
    pub ammo_kind: AmmoKind,

    /// Montage section для reload анимации (host проигрывает)
    pub reload_section: String,

    /// Кость магазина (host берёт transform при GrabClip)
    pub clip_bone: String,

    /// true пока рука держит магазин во время reload
    pub moving_clip: bool,
}

impl Weapon {
    /// Магазин клампится к capacity
    pub fn new(kind: WeaponKind, ammo: u32, magazine_capacity: u32, ammo_kind: AmmoKind) -> Self {
        let (reload_section, clip_bone) = match kind {
            WeaponKind::SubmachineGun => ("Reload SMG", "smg_clip"),
            WeaponKind::AssaultRifle => ("Reload AR", "ar_clip"),
        };

        Self {
            kind,
            ammo: ammo.min(magazine_capacity),
            magazine_capacity,
            ammo_kind,
            reload_section: reload_section.to_string(),
            clip_bone: clip_bone.to_string(),
            moving_clip: false,
        }
    }

    /// SMG preset (9mm, 30 в магазине)
    pub fn submachine_gun() -> Self {
        Self::new(WeaponKind::SubmachineGun, 30, 30, AmmoKind::NineMillimeter)
    }

    /// Assault rifle preset (AR ammo, 30 в магазине)
    pub fn assault_rifle() -> Self {
        Self::new(WeaponKind::AssaultRifle, 30, 30, AmmoKind::AssaultRifle)
    }

    pub fn from_kind(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::SubmachineGun => Self::submachine_gun(),
            WeaponKind::AssaultRifle => Self::assault_rifle(),
        }
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn magazine_capacity(&self) -> u32 {
        self.magazine_capacity
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0
    }

    pub fn clip_is_full(&self) -> bool {
        self.ammo >= self.magazine_capacity
    }

    /// Свободное место в магазине
    pub fn empty_space(&self) -> u32 {
        self.magazine_capacity - self.ammo
    }

    /// Минус один патрон (пустой магазин не трогаем)
    pub fn decrement_ammo(&mut self) {
        self.ammo = self.ammo.saturating_sub(1);
    }

    /// Добавить патроны в магазин, возвращает сколько реально влезло
    pub fn reload_ammo(&mut self, amount: u32) -> u32 {
        let accepted = amount.min(self.empty_space());
        self.ammo += accepted;
        accepted
    }
}

/// Конец weapon trace: луч от дула продлевается на 25% за точку под прицелом
///
/// Host делает второй ray cast от `muzzle` до этой точки: препятствие между стволом
/// и целью перехватывает beam.
pub fn weapon_trace_end(muzzle: Vec3, crosshair_target: Vec3) -> Vec3 {
    muzzle + (crosshair_target - muzzle) * 1.25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_presets() {
        let smg = Weapon::submachine_gun();
        assert_eq!(smg.ammo_kind, AmmoKind::NineMillimeter);
        assert_eq!(smg.magazine_capacity(), 30);
        assert_eq!(smg.reload_section, "Reload SMG");
        assert!(smg.clip_is_full());

        let ar = Weapon::assault_rifle();
        assert_eq!(ar.ammo_kind, AmmoKind::AssaultRifle);
        assert_eq!(ar.reload_section, "Reload AR");
    }

    #[test]
    fn test_new_clamps_magazine() {
        let weapon = Weapon::new(WeaponKind::SubmachineGun, 50, 30, AmmoKind::NineMillimeter);
        assert_eq!(weapon.ammo(), 30);
    }

    #[test]
    fn test_decrement_stops_at_zero() {
        let mut weapon = Weapon::new(WeaponKind::SubmachineGun, 1, 30, AmmoKind::NineMillimeter);
        weapon.decrement_ammo();
        assert!(!weapon.has_ammo());
        weapon.decrement_ammo();
        assert_eq!(weapon.ammo(), 0);
    }

    #[test]
    fn test_reload_ammo_never_exceeds_capacity() {
        let mut weapon = Weapon::new(WeaponKind::AssaultRifle, 25, 30, AmmoKind::AssaultRifle);
        assert_eq!(weapon.reload_ammo(20), 5);
        assert_eq!(weapon.ammo(), 30);
        assert!(weapon.clip_is_full());
    }

    #[test]
    fn test_weapon_trace_end_extends_ray() {
        let end = weapon_trace_end(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0));
        assert_eq!(end, Vec3::new(0.0, 0.0, -125.0));
    }
}
