//! Locomotion blend: turn-in-place, lean, aim offset state
//!
//! `advance_blend` - чистая функция (history, snapshot, dt) → (blend, history).
//! Одна предыдущая выборка (BlendHistory) - вся память между tick'ами.

use bevy::prelude::*;

use crate::combat::CombatState;
use crate::config::AnimationConfig;
use crate::math::{delta_degrees, horizontal_speed, interp_to, normalize_degrees, yaw_from_direction};

/// Какой aim offset blend space активен
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum OffsetState {
    Aiming,
    #[default]
    Hip,
    Reloading,
    InAir,
}

impl OffsetState {
    /// Приоритет: Reloading > InAir > Aiming > Hip
    pub fn resolve(reloading: bool, in_air: bool, aiming: bool) -> Self {
        if reloading {
            OffsetState::Reloading
        } else if in_air {
            OffsetState::InAir
        } else if aiming {
            OffsetState::Aiming
        } else {
            OffsetState::Hip
        }
    }
}

/// Всё, что блендеру нужно знать о персонаже в этот tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionSnapshot {
    pub velocity: Vec3,
    pub in_air: bool,
    pub accelerating: bool,
    /// Yaw актёра (градусы)
    pub actor_yaw: f32,
    pub aim_yaw: f32,
    pub aim_pitch: f32,
    pub aiming: bool,
    pub crouching: bool,
    pub combat_state: CombatState,
    /// Значение curve "Turning" из turn-in-place анимации (> 0 = идёт поворот)
    pub turning_curve: f32,
    /// Значение curve "Rotation" (накопленный поворот анимации)
    pub rotation_curve: f32,
}

impl LocomotionSnapshot {
    pub fn reloading(&self) -> bool {
        self.combat_state == CombatState::Reloading
    }
}

/// Выборка предыдущего tick'а
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BlendHistory {
    /// false до первого tick'а: yaw ещё не с чем сравнивать
    pub primed: bool,
    /// Yaw актёра для turn-in-place
    pub turn_in_place_yaw: f32,
    pub rotation_curve: f32,
    pub root_yaw_offset: f32,
    /// Yaw актёра для lean
    pub lean_yaw: f32,
    /// Сглаженная yaw-скорость (градусы/сек)
    pub yaw_delta: f32,
    pub last_movement_offset_yaw: f32,
}

/// Параметры для animation graph (read-only для host'а)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationBlend {
    pub speed: f32,
    pub in_air: bool,
    pub accelerating: bool,
    /// Yaw движения относительно прицела (strafe blend)
    pub movement_offset_yaw: f32,
    /// Последний offset пока двигались (для jog stop анимаций)
    pub last_movement_offset_yaw: f32,
    pub aiming: bool,
    pub crouching: bool,
    pub reloading: bool,
    pub combat_state: CombatState,
    pub offset_state: OffsetState,
    /// Насколько root отстаёт от актёра (градусы, ±max)
    pub root_yaw_offset: f32,
    pub turning_in_place: bool,
    pub pitch: f32,
    /// Lean (градусы/сек, clamp ±max_lean)
    pub yaw_delta: f32,
    pub recoil_weight: f32,
}

/// Один tick блендера
pub fn advance_blend(
    history: &BlendHistory,
    snapshot: &LocomotionSnapshot,
    delta_time: f32,
    config: &AnimationConfig,
) -> (AnimationBlend, BlendHistory) {
    let mut next = *history;
    if !history.primed {
        next.turn_in_place_yaw = snapshot.actor_yaw;
        next.lean_yaw = snapshot.actor_yaw;
        next.rotation_curve = snapshot.rotation_curve;
        next.primed = true;
    }

    let speed = horizontal_speed(snapshot.velocity);
    let reloading = snapshot.reloading();

    let movement_offset_yaw = yaw_from_direction(snapshot.velocity)
        .map(|movement_yaw| delta_degrees(movement_yaw, snapshot.aim_yaw))
        .unwrap_or(0.0);
    if speed > 0.0 {
        next.last_movement_offset_yaw = movement_offset_yaw;
    }

    let turning_in_place = turn_in_place(&mut next, snapshot, speed, config);
    lean(&mut next, snapshot.actor_yaw, delta_time, config);

    let recoil_weight = recoil_weight(turning_in_place, snapshot.crouching, snapshot.aiming, reloading);

    let blend = AnimationBlend {
        speed,
        in_air: snapshot.in_air,
        accelerating: snapshot.accelerating,
        movement_offset_yaw,
        last_movement_offset_yaw: next.last_movement_offset_yaw,
        aiming: snapshot.aiming,
        crouching: snapshot.crouching,
        reloading,
        combat_state: snapshot.combat_state,
        offset_state: OffsetState::resolve(reloading, snapshot.in_air, snapshot.aiming),
        root_yaw_offset: next.root_yaw_offset,
        turning_in_place,
        pitch: normalize_degrees(snapshot.aim_pitch),
        yaw_delta: next.yaw_delta,
        recoil_weight,
    };

    (blend, next)
}

/// Root yaw offset: в движении/воздухе = 0, на месте копит поворот актёра
///
/// Пока играет turn-in-place анимация (curve "Turning" > 0), offset
/// возвращается к нулю на дельту curve "Rotation".
fn turn_in_place(
    history: &mut BlendHistory,
    snapshot: &LocomotionSnapshot,
    speed: f32,
    config: &AnimationConfig,
) -> bool {
    if speed > 0.0 || snapshot.in_air {
        history.root_yaw_offset = 0.0;
        history.turn_in_place_yaw = snapshot.actor_yaw;
        history.rotation_curve = snapshot.rotation_curve;
        return false;
    }

    let yaw_delta = delta_degrees(snapshot.actor_yaw, history.turn_in_place_yaw);
    history.turn_in_place_yaw = snapshot.actor_yaw;
    history.root_yaw_offset = normalize_degrees(history.root_yaw_offset - yaw_delta);

    let turning = snapshot.turning_curve > 0.0;
    if turning {
        let rotation_delta = snapshot.rotation_curve - history.rotation_curve;
        if history.root_yaw_offset > 0.0 {
            history.root_yaw_offset -= rotation_delta;
        } else {
            history.root_yaw_offset += rotation_delta;
        }

        let max = config.max_root_yaw_offset;
        history.root_yaw_offset = history.root_yaw_offset.clamp(-max, max);
    }
    history.rotation_curve = snapshot.rotation_curve;

    turning
}

/// Lean = сглаженная yaw-скорость актёра
fn lean(history: &mut BlendHistory, actor_yaw: f32, delta_time: f32, config: &AnimationConfig) {
    let yaw_change = delta_degrees(actor_yaw, history.lean_yaw);
    history.lean_yaw = actor_yaw;

    if delta_time <= 0.0 {
        return;
    }

    let target = yaw_change / delta_time;
    let interped = interp_to(history.yaw_delta, target, delta_time, config.lean_interp_speed);
    history.yaw_delta = interped.clamp(-config.max_lean, config.max_lean);
}

/// Вес recoil слоя
///
/// Turn-in-place глушит recoil (кроме reload), присед почти глушит,
/// стоя: полный при прицеливании/reload, половина от бедра.
pub fn recoil_weight(turning_in_place: bool, crouching: bool, aiming: bool, reloading: bool) -> f32 {
    if turning_in_place {
        if reloading {
            1.0
        } else {
            0.0
        }
    } else if crouching {
        if reloading {
            1.0
        } else {
            0.1
        }
    } else if aiming || reloading {
        1.0
    } else {
        0.5
    }
}
