//! Items integration test: overlap → trace → select → interp → pickup

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;
use shooter_simulation::combat::{WeaponDropped, WeaponEquipped};
use shooter_simulation::items::*;
use shooter_simulation::*;

const TICK: Duration = Duration::from_micros(16_667);

fn create_items_app() -> (App, Entity) {
    let mut app = create_headless_app(7);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    let config = ShooterConfig::default();
    let shooter = spawn_shooter(&mut app.world_mut().commands(), &config, Transform::default());
    app.update();

    (app, shooter)
}

fn events<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

fn spawn_item(app: &mut App, kind: ItemKind, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((WorldItem::new(kind), Transform::from_translation(position)))
        .id()
}

/// Overlap + crosshair на предмете
fn aim_at(app: &mut App, shooter: Entity, item: Entity) {
    app.world_mut().send_event(ItemOverlapChanged { shooter, amount: 1 });
    app.world_mut()
        .get_mut::<CrosshairTrace>(shooter)
        .expect("shooter has CrosshairTrace")
        .hit = Some(item);
    app.update();
}

/// Крутим tick'и пока не придёт ItemPickedUp
fn run_until_picked(app: &mut App) -> Option<ItemPickedUp> {
    for _ in 0..120 {
        app.update();
        if let Some(picked) = events::<ItemPickedUp>(app).into_iter().next() {
            return Some(picked);
        }
    }
    None
}

#[test]
fn test_trace_toggles_pickup_widget() {
    let (mut app, shooter) = create_items_app();
    let item = spawn_item(&mut app, ItemKind::Other, Vec3::new(0.0, 0.0, -100.0));

    // Без overlap trace выключен
    app.world_mut()
        .get_mut::<CrosshairTrace>(shooter)
        .expect("trace")
        .hit = Some(item);
    app.update();
    assert!(events::<PickupWidgetVisibility>(&app).is_empty());

    app.world_mut().send_event(ItemOverlapChanged { shooter, amount: 1 });
    app.update();
    assert_eq!(
        events::<PickupWidgetVisibility>(&app),
        vec![PickupWidgetVisibility { item, visible: true }]
    );

    // Overlap закончился → widget прячется
    app.world_mut().send_event(ItemOverlapChanged { shooter, amount: -1 });
    app.update();
    assert_eq!(
        events::<PickupWidgetVisibility>(&app),
        vec![PickupWidgetVisibility { item, visible: false }]
    );
    let tracker = app.world().get::<ItemTracker>(shooter).expect("tracker");
    assert_eq!(tracker.overlapped_item_count(), 0);
}

#[test]
fn test_pickup_weapon_swaps_and_throws_old() {
    let (mut app, shooter) = create_items_app();
    let rifle = spawn_item(
        &mut app,
        ItemKind::Weapon(Weapon::assault_rifle()),
        Vec3::new(0.0, 0.0, -100.0),
    );
    aim_at(&mut app, shooter, rifle);

    app.world_mut()
        .send_event(ActionIntent::new(shooter, ShooterAction::SelectPressed));
    app.update();
    assert_eq!(
        app.world().get::<WorldItem>(rifle).map(WorldItem::state),
        Some(ItemState::EquipInterping)
    );

    // Во время интерполяции предмет летит к камере
    app.update();
    let position = app.world().get::<Transform>(rifle).expect("rifle").translation;
    assert_ne!(position, Vec3::new(0.0, 0.0, -100.0));

    let picked = run_until_picked(&mut app).expect("rifle picked up");
    assert_eq!(picked.item, rifle);
    assert!(matches!(picked.kind, ItemKind::Weapon(_)));

    let equipped = events::<WeaponEquipped>(&app);
    assert_eq!(equipped.len(), 1);
    assert_eq!(equipped[0].weapon.kind, WeaponKind::AssaultRifle);

    let dropped = events::<WeaponDropped>(&app);
    assert_eq!(dropped.len(), 1);

    let world = app.world();
    let controller = world.get::<CombatController>(shooter).expect("controller");
    assert_eq!(
        controller.equipped_weapon().map(|weapon| weapon.kind),
        Some(WeaponKind::AssaultRifle)
    );
    assert!(world.get_entity(rifle).is_err());
    assert_eq!(
        world.get::<ItemTracker>(shooter).and_then(ItemTracker::trace_hit_item),
        None
    );

    let thrown = dropped[0].item;
    let item = world.get::<WorldItem>(thrown).expect("thrown SMG");
    assert_eq!(item.state(), ItemState::Falling);
    assert!(matches!(&item.kind, ItemKind::Weapon(weapon) if weapon.kind == WeaponKind::SubmachineGun));
    let impulse = world.get::<ExternalImpulse>(thrown).expect("impulse");
    assert!((impulse.impulse.length() - 20_000.0).abs() < 1.0);
}

#[test]
fn test_thrown_weapon_lands_into_pickup() {
    let (mut app, shooter) = create_items_app();
    app.world_mut()
        .send_event(DropWeaponRequested { shooter });
    app.update();

    let thrown = events::<WeaponDropped>(&app)
        .first()
        .map(|dropped| dropped.item)
        .expect("weapon dropped");

    for _ in 0..60 {
        app.update();
    }

    let world = app.world();
    assert_eq!(
        world.get::<WorldItem>(thrown).map(WorldItem::state),
        Some(ItemState::Pickup)
    );
    assert!(world.get::<RigidBody>(thrown).is_none());
}

#[test]
fn test_pickup_ammo_adds_to_inventory() {
    let (mut app, shooter) = create_items_app();
    let ammo = spawn_item(
        &mut app,
        ItemKind::Ammo {
            kind: AmmoKind::AssaultRifle,
            amount: 30,
        },
        Vec3::new(50.0, 0.0, -50.0),
    );
    aim_at(&mut app, shooter, ammo);

    app.world_mut()
        .send_event(ActionIntent::new(shooter, ShooterAction::SelectPressed));
    let picked = run_until_picked(&mut app).expect("ammo picked up");
    assert_eq!(picked.item, ammo);

    let controller = app.world().get::<CombatController>(shooter).expect("controller");
    assert_eq!(controller.ammo_inventory().count(AmmoKind::AssaultRifle), 153);
    assert_eq!(
        controller.equipped_weapon().map(|weapon| weapon.kind),
        Some(WeaponKind::SubmachineGun)
    );
}

#[test]
fn test_other_item_is_not_collected() {
    let (mut app, shooter) = create_items_app();
    let prop = spawn_item(&mut app, ItemKind::Other, Vec3::new(0.0, 0.0, -30.0));
    aim_at(&mut app, shooter, prop);

    app.world_mut()
        .send_event(ActionIntent::new(shooter, ShooterAction::SelectPressed));
    assert!(run_until_picked(&mut app).is_none());
    assert_eq!(
        app.world().get::<WorldItem>(prop).map(WorldItem::state),
        Some(ItemState::Pickup)
    );
}

#[test]
fn test_select_without_trace_hit_does_nothing() {
    let (mut app, shooter) = create_items_app();
    let rifle = spawn_item(
        &mut app,
        ItemKind::Weapon(Weapon::assault_rifle()),
        Vec3::new(0.0, 0.0, -100.0),
    );

    app.world_mut()
        .send_event(ActionIntent::new(shooter, ShooterAction::SelectPressed));
    app.update();
    assert_eq!(
        app.world().get::<WorldItem>(rifle).map(WorldItem::state),
        Some(ItemState::Pickup)
    );
}
