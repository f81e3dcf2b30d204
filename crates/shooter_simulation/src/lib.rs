//! Shooter Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: gameplay ядро third-person shooter персонажа.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = game state (fire/reload state machine, crosshair spread, blend параметры)
//! - Host = движок (physics ray cast, animation graph, звук, UI)
//!
//! Host пишет input components (CharacterMotion, CrosshairTrace, TurnCurves)
//! и шлёт events (ActionIntent, animation notifies), читает output events
//! (WeaponFired, ReloadStarted, ...) и components (AnimationBlend, CrosshairSpread).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod combat;
pub mod config;
pub mod crosshair;
pub mod input;
pub mod items;
pub mod logger;
pub mod math;
pub mod movement;
pub mod player;

// Re-export базовых типов для удобства
pub use animation::{AnimationBlend, AnimationPlugin, OffsetState, TurnCurves};
pub use combat::{
    AmmoInventory, AmmoKind, CombatController, CombatPlugin, CombatState, Weapon, WeaponKind,
};
pub use config::{ConfigError, ShooterConfig};
pub use crosshair::{CrosshairPlugin, CrosshairSpread};
pub use input::{ActionIntent, LookInput, ShooterAction};
pub use items::{ItemKind, ItemState, ItemsPlugin, WorldItem};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use movement::{CameraRig, CharacterMotion, MovementPlugin, Stance};
pub use player::{spawn_shooter, Shooter};

/// Фазы одного tick'а (Update, строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Fire-rate timer, shot window (auto-fire / auto-reload)
    CombatTimers,
    /// ActionIntent, look input, overlaps, drop requests
    Actions,
    /// Reload finished, grab / release clip
    AnimationNotifies,
    /// FOV zoom + look rates
    CameraUpdate,
    CrosshairUpdate,
    ItemTrace,
    CapsuleUpdate,
    /// Falling / interp к камере / pickup
    ItemLifecycle,
    AnimationBlend,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationSet::CombatTimers,
                SimulationSet::Actions,
                SimulationSet::AnimationNotifies,
                SimulationSet::CameraUpdate,
                SimulationSet::CrosshairUpdate,
                SimulationSet::ItemTrace,
                SimulationSet::CapsuleUpdate,
                SimulationSet::ItemLifecycle,
                SimulationSet::AnimationBlend,
            )
                .chain(),
        );

        app
            // Не перетираем то, что host / create_headless_app уже вставили
            .init_resource::<DeterministicRng>()
            .init_resource::<ShooterConfig>()
            .add_event::<ActionIntent>()
            .add_event::<LookInput>()
            .register_type::<Shooter>()
            // Подсистемы
            .add_plugins((
                CombatPlugin,
                MovementPlugin,
                CrosshairPlugin,
                ItemsPlugin,
                AnimationPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции (default tuning)
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(seed, ShooterConfig::default())
}

pub fn create_headless_app_with_config(seed: u64, config: ShooterConfig) -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(config);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
