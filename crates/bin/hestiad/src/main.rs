//! # hestiad — hestia daemon
//!
//! Composition root that wires the in-memory adapters together and runs
//! the control-plane simulation.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize tracing from the configured filter
//! - Construct store implementations (adapters)
//! - Construct application services, injecting stores via port traits
//! - Subscribe to the event bus and log every domain event
//! - Seed a demo household and run its scenes when demo mode is on
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use chrono::Duration;
use hestia_adapter_memory::{
    MemoryDeviceStore, MemoryHouseholdStore, MemoryRoomStore, MemorySceneStore,
};
use hestia_app::event_bus::InProcessEventBus;
use hestia_app::services::catalog_service::CatalogService;
use hestia_app::services::device_service::DeviceService;
use hestia_app::services::energy_service::EnergyService;
use hestia_app::services::scene_service::SceneService;
use hestia_domain::attribute::AttributeValue;
use hestia_domain::device::{ConnectMode, Device, DeviceKind, PowerMode};
use hestia_domain::event::Event;
use hestia_domain::household::Household;
use hestia_domain::room::Room;
use hestia_domain::scene::{AttributeMap, Scene};
use hestia_domain::time::now;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

type Bus = Arc<InProcessEventBus>;
type Catalog = CatalogService<MemoryHouseholdStore, MemoryRoomStore>;
type Devices = DeviceService<MemoryDeviceStore, Bus>;
type Scenes = SceneService<MemorySceneStore, MemoryDeviceStore, Bus>;
type Energy = EnergyService<MemoryDeviceStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    tracing::info!(
        filter = %config.logging.filter,
        demo = config.demo.enabled,
        "hestiad starting"
    );

    // Stores — clones share the same underlying map.
    let device_store = MemoryDeviceStore::new();
    let scene_store = MemorySceneStore::new();
    let room_store = MemoryRoomStore::new();
    let household_store = MemoryHouseholdStore::new();

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(256));
    let drain = spawn_event_log(event_bus.subscribe());

    // Services
    let catalog = CatalogService::new(household_store, room_store);
    let devices = DeviceService::new(device_store.clone(), Arc::clone(&event_bus));
    let scenes = SceneService::new(scene_store, device_store.clone(), Arc::clone(&event_bus));
    let energy = EnergyService::new(device_store);

    if config.demo.enabled {
        run_demo(&catalog, &devices, &scenes, &energy).await?;
    }

    // Dropping every publisher handle closes the bus, which ends the drain.
    drop(devices);
    drop(scenes);
    drop(event_bus);
    drain.await?;

    Ok(())
}

/// Forward every bus event into the log until the bus closes.
fn spawn_event_log(mut events: broadcast::Receiver<Event>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::info!(
                    kind = ?event.event_type,
                    device_id = ?event.device_id,
                    data = %event.data,
                    "domain event"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event log fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Seed a household, run its scenes, and price the day's consumption.
///
/// The air conditioner is pre-loaded with a finished two-hour run so the
/// daily report has an interval to price.
#[allow(clippy::too_many_lines)]
async fn run_demo(
    catalog: &Catalog,
    devices: &Devices,
    scenes: &Scenes,
    energy: &Energy,
) -> anyhow::Result<()> {
    let household = catalog
        .create_household(Household::builder().name("Baker Street").build()?)
        .await?;
    let living_room = catalog
        .create_room(
            Room::builder()
                .name("Living Room")
                .household_id(household.id)
                .build()?,
        )
        .await?;
    let bedroom = catalog
        .create_room(
            Room::builder()
                .name("Bedroom")
                .household_id(household.id)
                .build()?,
        )
        .await?;

    let lamp = devices
        .register_device(
            Device::builder()
                .name("Living Room Lamp")
                .kind(DeviceKind::Light)
                .room_id(living_room.id)
                .power_draw_watts(9.0)
                .build()?,
        )
        .await?;

    let mut aircon = Device::builder()
        .name("Bedroom AC")
        .kind(DeviceKind::AirConditioner)
        .room_id(bedroom.id)
        .power_draw_watts(900.0)
        .build()?;
    aircon.power_on(now() - Duration::hours(3));
    aircon.power_off(now() - Duration::hours(1));
    let aircon = devices.register_device(aircon).await?;

    let lock = devices
        .register_device(
            Device::builder()
                .name("Front Door Lock")
                .kind(DeviceKind::Lock)
                .room_id(living_room.id)
                .connect_mode(ConnectMode::Zigbee)
                .power_mode(PowerMode::Battery)
                .power_draw_watts(1.0)
                .build()?,
        )
        .await?;

    devices.connect_device(lamp.id).await?;
    devices.connect_device(aircon.id).await?;

    let movie_night = scenes
        .create_scene(
            Scene::builder()
                .name("Movie Night")
                .description("Dim the lights, cool the bedroom")
                .binding(
                    lamp.id,
                    AttributeMap::from([
                        ("luminance".to_string(), AttributeValue::Int(10)),
                        (
                            "color_temperature".to_string(),
                            AttributeValue::from("WARM"),
                        ),
                        ("power".to_string(), AttributeValue::Bool(true)),
                    ]),
                )
                .binding(
                    aircon.id,
                    AttributeMap::from([
                        ("temperature".to_string(), AttributeValue::Int(21)),
                        ("power".to_string(), AttributeValue::Bool(true)),
                    ]),
                )
                .binding(
                    lock.id,
                    // "SIDEWAYS" is outside the lock's choice set; the tally
                    // below shows the run carrying on past the refusal.
                    AttributeMap::from([(
                        "lock_status".to_string(),
                        AttributeValue::from("SIDEWAYS"),
                    )]),
                )
                .build()?,
        )
        .await?;
    let all_off = scenes
        .create_scene(
            Scene::builder()
                .name("All Off")
                .description("Shut the powered devices down")
                .binding(
                    lamp.id,
                    AttributeMap::from([("power".to_string(), AttributeValue::Bool(false))]),
                )
                .binding(
                    aircon.id,
                    AttributeMap::from([("power".to_string(), AttributeValue::Bool(false))]),
                )
                .build()?,
        )
        .await?;

    for scene in [&movie_night, &all_off] {
        let run = scenes.trigger(scene.id).await?;
        let (succeeded, total) = run.tally();
        tracing::info!(scene = %scene.name, succeeded, total, "scene dispatched");
    }

    let today = now().date_naive();
    for device in devices.list_devices().await? {
        let kwh = energy.daily(device.id, today).await?;
        tracing::info!(device = %device.name, kwh, "daily consumption");
    }

    Ok(())
}
