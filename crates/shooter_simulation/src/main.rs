//! Headless симуляция стрелка
//!
//! Зажимает fire, опустошает магазин, ждёт auto-reload, "доигрывает"
//! reload montage вместо host'а и снова стреляет.
//! Опционально читает tuning из TOML (первый аргумент).

use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use shooter_simulation::combat::{ReloadAnimationFinished, ReloadStarted, WeaponFired};
use shooter_simulation::{
    create_headless_app_with_config, log_error, spawn_shooter, ActionIntent, CombatController,
    CrosshairSpread, ShooterAction, ShooterConfig, SimulationPlugin,
};

const TICK: Duration = Duration::from_micros(16_667);

fn main() {
    let seed = 42;

    let config = match std::env::args().nth(1) {
        Some(path) => match ShooterConfig::from_file(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Failed to load config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => ShooterConfig::default(),
    };

    println!("Starting shooter headless simulation (seed: {})", seed);

    let mut app = create_headless_app_with_config(seed, config.clone());
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    let shooter = spawn_shooter(&mut app.world_mut().commands(), &config, Transform::default());
    app.update();

    let mut shots = 0;
    for tick in 0..600 {
        // Отпущенный на reload fire снова зажимается, когда магазин полон
        let idle = app
            .world()
            .get::<CombatController>(shooter)
            .is_some_and(|controller| !controller.is_fire_button_held() && !controller.is_reloading());
        if idle {
            app.world_mut()
                .send_event(ActionIntent::new(shooter, ShooterAction::FirePressed));
        }

        app.update();

        shots += app
            .world()
            .resource::<Events<WeaponFired>>()
            .iter_current_update_events()
            .count();

        let reload_started = app
            .world()
            .resource::<Events<ReloadStarted>>()
            .iter_current_update_events()
            .next()
            .is_some();
        if reload_started {
            println!("Tick {}: magazine empty after {} shots, reloading", tick, shots);
            app.world_mut()
                .send_event(ActionIntent::new(shooter, ShooterAction::FireReleased));
            app.world_mut()
                .send_event(ReloadAnimationFinished { shooter });
        }

        if tick % 100 == 0 {
            let world = app.world();
            let spread = world
                .get::<CrosshairSpread>(shooter)
                .map(|spread| spread.multiplier)
                .unwrap_or_default();
            let magazine = world
                .get::<CombatController>(shooter)
                .and_then(CombatController::equipped_weapon)
                .map(|weapon| weapon.ammo())
                .unwrap_or_default();
            println!("Tick {}: magazine {}, spread {:.3}", tick, magazine, spread);
        }
    }

    println!("Simulation complete! {} shots fired", shots);
}
