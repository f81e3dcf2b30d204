//! Crosshair spread - четыре сглаженных фактора → один multiplier
//!
//! spread = base + velocity + in_air − aim + shooting
//!
//! Каждый фактор раз в tick экспоненциально подтягивается к своему target
//! (`math::interp_to`), никогда не прыгает мгновенно.

use bevy::prelude::*;

use crate::combat::CombatController;
use crate::config::{CrosshairConfig, ShooterConfig};
use crate::math::{horizontal_speed, interp_to, map_range_clamped};
use crate::movement::CharacterMotion;
use crate::SimulationSet;

/// Входы одного tick'а
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrosshairInputs {
    /// Горизонтальная скорость персонажа
    pub speed: f32,
    pub in_air: bool,
    pub aiming: bool,
    /// Открыто окно после выстрела (0.05s)
    pub firing_bullet: bool,
}

/// Состояние разброса прицела (читает HUD)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CrosshairSpread {
    pub velocity_factor: f32,
    pub in_air_factor: f32,
    pub aim_factor: f32,
    pub shooting_factor: f32,
    /// Итоговый multiplier (0.0 до первого tick'а)
    pub multiplier: f32,
}

impl CrosshairSpread {
    /// Один tick расчёта разброса
    pub fn update(&mut self, inputs: &CrosshairInputs, delta_time: f32, config: &CrosshairConfig) {
        let velocity_target = map_range_clamped(
            (0.0, config.walk_speed_range),
            (0.0, 1.0),
            inputs.speed,
        );
        self.velocity_factor = interp_to(
            self.velocity_factor,
            velocity_target,
            delta_time,
            config.velocity_interp_speed,
        );

        // В воздухе разброс растёт медленно, на земле схлопывается быстро
        self.in_air_factor = if inputs.in_air {
            interp_to(self.in_air_factor, config.in_air_target, delta_time, config.in_air_rise_speed)
        } else {
            interp_to(self.in_air_factor, 0.0, delta_time, config.in_air_fall_speed)
        };

        let aim_target = if inputs.aiming { config.aim_target } else { 0.0 };
        self.aim_factor = interp_to(self.aim_factor, aim_target, delta_time, config.aim_interp_speed);

        let shooting_target = if inputs.firing_bullet {
            config.shooting_target
        } else {
            0.0
        };
        self.shooting_factor = interp_to(
            self.shooting_factor,
            shooting_target,
            delta_time,
            config.shooting_interp_speed,
        );

        self.multiplier = config.base_spread + self.velocity_factor + self.in_air_factor
            - self.aim_factor
            + self.shooting_factor;
    }
}

/// System: пересчёт crosshair spread для всех стрелков
pub fn calculate_crosshair_spread(
    mut shooters: Query<(&mut CrosshairSpread, &CombatController, &CharacterMotion)>,
    config: Res<ShooterConfig>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut spread, controller, motion) in shooters.iter_mut() {
        let inputs = CrosshairInputs {
            speed: horizontal_speed(motion.velocity),
            in_air: motion.is_falling,
            aiming: controller.is_aiming(),
            firing_bullet: controller.is_shot_window_open(),
        };
        spread.update(&inputs, delta, &config.crosshair);
    }
}

/// Crosshair Plugin (после camera zoom, до item trace)
pub struct CrosshairPlugin;

impl Plugin for CrosshairPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CrosshairSpread>().add_systems(
            Update,
            calculate_crosshair_spread.in_set(SimulationSet::CrosshairUpdate),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run(spread: &mut CrosshairSpread, inputs: CrosshairInputs, ticks: usize) {
        let config = CrosshairConfig::default();
        for _ in 0..ticks {
            spread.update(&inputs, DT, &config);
        }
    }

    #[test]
    fn test_idle_spread_is_base() {
        let mut spread = CrosshairSpread::default();
        run(&mut spread, CrosshairInputs::default(), 1);
        assert_eq!(spread.multiplier, 0.5);
    }

    #[test]
    fn test_factors_rise_gradually_not_instantly() {
        let mut spread = CrosshairSpread::default();
        let inputs = CrosshairInputs {
            speed: 600.0,
            in_air: true,
            aiming: true,
            firing_bullet: true,
        };
        run(&mut spread, inputs, 1);

        assert!(spread.velocity_factor > 0.0 && spread.velocity_factor < 1.0);
        assert!(spread.in_air_factor > 0.0 && spread.in_air_factor < 2.25);
        assert!(spread.aim_factor > 0.0 && spread.aim_factor < 0.6);
        assert!(spread.shooting_factor > 0.0 && spread.shooting_factor <= 0.3);
    }

    #[test]
    fn test_factors_bounded_and_converge() {
        let mut spread = CrosshairSpread::default();
        let inputs = CrosshairInputs {
            speed: 300.0,
            in_air: true,
            aiming: true,
            firing_bullet: true,
        };

        let config = CrosshairConfig::default();
        for _ in 0..2000 {
            spread.update(&inputs, DT, &config);
            assert!((0.0..=1.0).contains(&spread.velocity_factor));
            assert!((0.0..=2.25).contains(&spread.in_air_factor));
            assert!((0.0..=0.6).contains(&spread.aim_factor));
            assert!((0.0..=0.3).contains(&spread.shooting_factor));
        }

        assert!((spread.velocity_factor - 0.5).abs() < 1e-3);
        assert!((spread.in_air_factor - 2.25).abs() < 1e-3);
        assert!((spread.aim_factor - 0.6).abs() < 1e-3);
        assert!((spread.shooting_factor - 0.3).abs() < 1e-3);

        // Steady state: ещё один tick ничего не меняет
        let before = spread;
        spread.update(&inputs, DT, &config);
        assert!((spread.multiplier - before.multiplier).abs() < 1e-4);
    }

    #[test]
    fn test_in_air_rise_slower_than_fall() {
        let config = CrosshairConfig::default();
        let mut spread = CrosshairSpread::default();

        let airborne = CrosshairInputs { in_air: true, ..Default::default() };
        spread.update(&airborne, DT, &config);
        let rise = spread.in_air_factor;

        spread.in_air_factor = 2.25;
        spread.update(&CrosshairInputs::default(), DT, &config);
        let fall = 2.25 - spread.in_air_factor;

        assert!(fall > rise);
    }

    #[test]
    fn test_large_dt_lands_on_target() {
        let config = CrosshairConfig::default();
        let mut spread = CrosshairSpread::default();
        let inputs = CrosshairInputs {
            speed: 1200.0,
            in_air: false,
            aiming: true,
            firing_bullet: true,
        };

        spread.update(&inputs, 1.0, &config);
        assert_eq!(spread.velocity_factor, 1.0);
        assert_eq!(spread.aim_factor, 0.6);
        assert_eq!(spread.shooting_factor, 0.3);
        assert!((spread.multiplier - (0.5 + 1.0 - 0.6 + 0.3)).abs() < 1e-6);
    }
}
