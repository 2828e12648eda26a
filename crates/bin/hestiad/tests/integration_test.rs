//! End-to-end smoke tests for the full hestiad stack.
//!
//! Each test wires the complete application (in-memory stores, real
//! services, real event bus) and drives it through the service layer —
//! exactly the surface the daemon's demo run uses.

use std::sync::Arc;

use chrono::TimeZone;
use hestia_adapter_memory::{
    MemoryDeviceStore, MemoryHouseholdStore, MemoryRoomStore, MemorySceneStore,
};
use hestia_app::event_bus::InProcessEventBus;
use hestia_app::services::catalog_service::CatalogService;
use hestia_app::services::device_service::DeviceService;
use hestia_app::services::energy_service::EnergyService;
use hestia_app::services::scene_service::SceneService;
use hestia_domain::attribute::AttributeValue;
use hestia_domain::device::{Device, DeviceKind, PowerMode, PowerState};
use hestia_domain::error::HestiaError;
use hestia_domain::event::{Event, EventType};
use hestia_domain::household::Household;
use hestia_domain::id::DeviceId;
use hestia_domain::room::Room;
use hestia_domain::scene::{AttributeMap, Scene};
use hestia_domain::time::Timestamp;
use tokio::sync::broadcast;

struct App {
    catalog: CatalogService<MemoryHouseholdStore, MemoryRoomStore>,
    devices: DeviceService<MemoryDeviceStore, Arc<InProcessEventBus>>,
    scenes: SceneService<MemorySceneStore, MemoryDeviceStore, Arc<InProcessEventBus>>,
    energy: EnergyService<MemoryDeviceStore>,
    bus: Arc<InProcessEventBus>,
}

/// Wire the full service stack over fresh in-memory stores.
fn app() -> App {
    let device_store = MemoryDeviceStore::new();
    let bus = Arc::new(InProcessEventBus::new(256));

    App {
        catalog: CatalogService::new(MemoryHouseholdStore::new(), MemoryRoomStore::new()),
        devices: DeviceService::new(device_store.clone(), Arc::clone(&bus)),
        scenes: SceneService::new(
            MemorySceneStore::new(),
            device_store.clone(),
            Arc::clone(&bus),
        ),
        energy: EnergyService::new(device_store),
        bus,
    }
}

/// Collect everything already sitting in the receiver.
fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn ts(day: u32, hour: u32) -> Timestamp {
    chrono::Utc
        .with_ymd_and_hms(2024, 5, day, hour, 0, 0)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Device lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_device_lifecycle() {
    let app = app();
    let mut rx = app.bus.subscribe();

    let device = app
        .devices
        .register_device(
            Device::builder()
                .name("Desk Lamp")
                .kind(DeviceKind::Light)
                .power_draw_watts(9.0)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    app.devices.connect_device(device.id).await.unwrap();
    app.devices
        .set_attribute(device.id, "luminance", AttributeValue::Int(80))
        .await
        .unwrap();
    app.devices.power_on(device.id).await.unwrap();
    app.devices.power_off(device.id).await.unwrap();
    app.devices.delete_device(device.id).await.unwrap();

    let result = app.devices.get_device(device.id).await;
    assert!(matches!(result, Err(HestiaError::NotFound(_))));

    let kinds: Vec<EventType> = drain(&mut rx)
        .into_iter()
        .map(|event| event.event_type)
        .collect();
    assert_eq!(
        kinds,
        vec![
            EventType::DeviceRegistered,
            EventType::ConnectionChanged,
            EventType::AttributeChanged,
            EventType::PowerChanged,
            EventType::PowerChanged,
            EventType::DeviceRemoved,
        ]
    );
}

// ---------------------------------------------------------------------------
// Household → rooms → devices → scene
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_dispatch_scene_across_household() {
    let app = app();

    let household = app
        .catalog
        .create_household(Household::builder().name("Baker Street").build().unwrap())
        .await
        .unwrap();
    let room = app
        .catalog
        .create_room(
            Room::builder()
                .name("Living Room")
                .household_id(household.id)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let lamp = app
        .devices
        .register_device(
            Device::builder()
                .name("Lamp")
                .kind(DeviceKind::Light)
                .room_id(room.id)
                .power_draw_watts(9.0)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
    let aircon = app
        .devices
        .register_device(
            Device::builder()
                .name("AC")
                .kind(DeviceKind::AirConditioner)
                .room_id(room.id)
                .power_draw_watts(900.0)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let scene = app
        .scenes
        .create_scene(
            Scene::builder()
                .name("Evening")
                .binding(
                    lamp.id,
                    AttributeMap::from([
                        ("luminance".to_string(), AttributeValue::Int(10)),
                        ("power".to_string(), AttributeValue::Bool(true)),
                    ]),
                )
                .binding(
                    aircon.id,
                    AttributeMap::from([("temperature".to_string(), AttributeValue::Int(21))]),
                )
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let mut rx = app.bus.subscribe();
    let run = app.scenes.trigger(scene.id).await.unwrap();
    assert_eq!(run.tally(), (2, 2));

    let lamp = app.devices.get_device(lamp.id).await.unwrap();
    assert_eq!(
        lamp.attributes().value("luminance"),
        Some(&AttributeValue::Int(10))
    );
    assert_eq!(lamp.power(), &PowerState::Powered);

    let aircon = app.devices.get_device(aircon.id).await.unwrap();
    assert_eq!(
        aircon.attributes().value("temperature"),
        Some(&AttributeValue::Int(21))
    );

    let events = drain(&mut rx);
    let last = events.last().unwrap();
    assert_eq!(last.event_type, EventType::SceneTriggered);
    assert_eq!(last.data["scene_id"], serde_json::json!(scene.id));
    assert_eq!(last.data["succeeded"], 2);
    assert_eq!(last.data["total"], 2);
}

#[tokio::test]
async fn should_carry_on_when_one_binding_targets_missing_device() {
    let app = app();

    let lamp = app
        .devices
        .register_device(
            Device::builder()
                .name("Lamp")
                .kind(DeviceKind::Light)
                .power_draw_watts(9.0)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let scene = app
        .scenes
        .create_scene(
            Scene::builder()
                .name("Evening")
                .binding(
                    DeviceId::new(),
                    AttributeMap::from([("power".to_string(), AttributeValue::Bool(true))]),
                )
                .binding(
                    lamp.id,
                    AttributeMap::from([("luminance".to_string(), AttributeValue::Int(25))]),
                )
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let run = app.scenes.trigger(scene.id).await.unwrap();
    assert_eq!(run.tally(), (1, 2));

    let lamp = app.devices.get_device(lamp.id).await.unwrap();
    assert_eq!(
        lamp.attributes().value("luminance"),
        Some(&AttributeValue::Int(25))
    );
}

#[tokio::test]
async fn should_validate_scene_without_touching_devices() {
    let app = app();

    let lamp = app
        .devices
        .register_device(
            Device::builder()
                .name("Lamp")
                .kind(DeviceKind::Light)
                .power_draw_watts(9.0)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let scene = app
        .scenes
        .create_scene(
            Scene::builder()
                .name("Evening")
                .binding(
                    lamp.id,
                    AttributeMap::from([
                        ("luminance".to_string(), AttributeValue::Int(10)),
                        ("thrust".to_string(), AttributeValue::Int(1)),
                    ]),
                )
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let mut rx = app.bus.subscribe();
    let run = app.scenes.check(scene.id).await.unwrap();
    assert_eq!(run.tally(), (0, 1));

    let lamp = app.devices.get_device(lamp.id).await.unwrap();
    assert_eq!(
        lamp.attributes().value("luminance"),
        Some(&AttributeValue::Int(50))
    );
    assert!(drain(&mut rx).is_empty());
}

// ---------------------------------------------------------------------------
// Energy reports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_price_daily_energy_for_room() {
    let app = app();

    let household = app
        .catalog
        .create_household(Household::builder().name("Baker Street").build().unwrap())
        .await
        .unwrap();
    let room = app
        .catalog
        .create_room(
            Room::builder()
                .name("Bedroom")
                .household_id(household.id)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let mut heater = Device::builder()
        .name("Heater")
        .room_id(room.id)
        .power_draw_watts(1000.0)
        .build()
        .unwrap();
    heater.power_on(ts(1, 10));
    heater.power_off(ts(1, 12));
    let heater = app.devices.register_device(heater).await.unwrap();

    let mut sensor = Device::builder()
        .name("Door Sensor")
        .kind(DeviceKind::Scale)
        .room_id(room.id)
        .power_mode(PowerMode::Battery)
        .power_draw_watts(500.0)
        .build()
        .unwrap();
    sensor.power_on(ts(1, 10));
    sensor.power_off(ts(1, 12));
    let sensor = app.devices.register_device(sensor).await.unwrap();

    let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let heater_kwh = app.energy.daily(heater.id, date).await.unwrap();
    assert!((heater_kwh - 2.0).abs() < 1e-9);

    let sensor_kwh = app.energy.daily(sensor.id, date).await.unwrap();
    assert!(sensor_kwh.abs() < 1e-9);

    let room_kwh = app
        .energy
        .room_report(room.id, ts(1, 0), ts(2, 0))
        .await
        .unwrap();
    assert!((room_kwh - 2.0).abs() < 1e-9);
}
