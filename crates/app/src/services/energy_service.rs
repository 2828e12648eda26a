//! Energy service — consumption reports computed from usage ledgers.

use chrono::NaiveDate;

use hestia_domain::energy;
use hestia_domain::error::{HestiaError, NotFoundError};
use hestia_domain::id::{DeviceId, RoomId};
use hestia_domain::time::Timestamp;

use crate::ports::DeviceStore;

/// Read-side service pricing device usage in kilowatt-hours.
///
/// All queries work on the stored device's ledger as it is right now; an
/// open power-on span counts up to the end of the requested window.
pub struct EnergyService<S> {
    devices: S,
}

impl<S: DeviceStore> EnergyService<S> {
    /// Create a new service backed by the given device store.
    pub fn new(devices: S) -> Self {
        Self { devices }
    }

    /// Energy consumed by a device within `[start, end)`, in kWh.
    ///
    /// An inverted or empty window yields `0.0` rather than an error, as
    /// does a battery-powered device.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no device with `id` exists,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn report(
        &self,
        id: DeviceId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<f64, HestiaError> {
        let device = self.devices.get_by_id(id).await?.ok_or_else(|| NotFoundError {
            entity: "Device",
            id: id.to_string(),
        })?;
        Ok(energy::consumed_kwh(&device, start, end))
    }

    /// Energy consumed on a calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no device with `id` exists,
    /// or a storage error from the store.
    pub async fn daily(&self, id: DeviceId, date: NaiveDate) -> Result<f64, HestiaError> {
        match energy::day_window(date) {
            Some((start, end)) => self.report(id, start, end).await,
            None => Ok(0.0),
        }
    }

    /// Energy consumed in a calendar month. An invalid month yields `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no device with `id` exists,
    /// or a storage error from the store.
    pub async fn monthly(&self, id: DeviceId, year: i32, month: u32) -> Result<f64, HestiaError> {
        match energy::month_window(year, month) {
            Some((start, end)) => self.report(id, start, end).await,
            None => Ok(0.0),
        }
    }

    /// Energy consumed in a calendar year.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no device with `id` exists,
    /// or a storage error from the store.
    pub async fn yearly(&self, id: DeviceId, year: i32) -> Result<f64, HestiaError> {
        match energy::year_window(year) {
            Some((start, end)) => self.report(id, start, end).await,
            None => Ok(0.0),
        }
    }

    /// Total energy consumed by a room's devices within `[start, end)`.
    ///
    /// Battery-powered devices contribute `0.0`, so the sum covers the
    /// metered devices only.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn room_report(
        &self,
        room_id: RoomId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<f64, HestiaError> {
        let devices = self.devices.find_by_room(room_id).await?;
        Ok(devices
            .iter()
            .map(|device| energy::consumed_kwh(device, start, end))
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hestia_domain::device::{Device, DeviceKind, PowerMode};
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    struct InMemoryDeviceStore {
        store: Mutex<HashMap<DeviceId, Device>>,
    }

    impl InMemoryDeviceStore {
        fn with(devices: Vec<Device>) -> Self {
            let map: HashMap<_, _> = devices.into_iter().map(|d| (d.id, d)).collect();
            Self {
                store: Mutex::new(map),
            }
        }
    }

    impl DeviceStore for InMemoryDeviceStore {
        fn create(&self, device: Device) -> impl Future<Output = Result<Device, HestiaError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(device.id, device.clone());
            async { Ok(device) }
        }
        fn get_by_id(
            &self,
            id: DeviceId,
        ) -> impl Future<Output = Result<Option<Device>, HestiaError>> + Send {
            let store = self.store.lock().unwrap();
            let r = store.get(&id).cloned();
            async { Ok(r) }
        }
        fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, HestiaError>> + Send {
            let store = self.store.lock().unwrap();
            let r: Vec<_> = store.values().cloned().collect();
            async { Ok(r) }
        }
        fn find_by_room(
            &self,
            room_id: RoomId,
        ) -> impl Future<Output = Result<Vec<Device>, HestiaError>> + Send {
            let store = self.store.lock().unwrap();
            let r: Vec<_> = store
                .values()
                .filter(|d| d.room_id == Some(room_id))
                .cloned()
                .collect();
            async { Ok(r) }
        }
        fn update(&self, device: Device) -> impl Future<Output = Result<Device, HestiaError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(device.id, device.clone());
            async { Ok(device) }
        }
        fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HestiaError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.remove(&id);
            async { Ok(()) }
        }
    }

    fn ts(day: u32, hour: u32) -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn heater(watts: f64) -> Device {
        Device::builder()
            .name("Space Heater")
            .kind(DeviceKind::Custom)
            .power_draw_watts(watts)
            .build()
            .unwrap()
    }

    fn assert_kwh(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected} kWh, got {actual}"
        );
    }

    #[tokio::test]
    async fn should_report_consumption_for_window() {
        let mut device = heater(1000.0);
        device.power_on(ts(1, 10));
        device.power_off(ts(1, 12));
        let id = device.id;

        let svc = EnergyService::new(InMemoryDeviceStore::with(vec![device]));
        let kwh = svc.report(id, ts(1, 0), ts(2, 0)).await.unwrap();
        assert_kwh(kwh, 2.0);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_device() {
        let svc = EnergyService::new(InMemoryDeviceStore::with(vec![]));
        let result = svc.report(DeviceId::new(), ts(1, 0), ts(2, 0)).await;
        assert!(matches!(result, Err(HestiaError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_zero_for_inverted_window() {
        let mut device = heater(1000.0);
        device.power_on(ts(1, 10));
        device.power_off(ts(1, 12));
        let id = device.id;

        let svc = EnergyService::new(InMemoryDeviceStore::with(vec![device]));
        let kwh = svc.report(id, ts(2, 0), ts(1, 0)).await.unwrap();
        assert_kwh(kwh, 0.0);
    }

    #[tokio::test]
    async fn should_report_daily_consumption() {
        let mut device = heater(500.0);
        device.power_on(ts(3, 8));
        device.power_off(ts(3, 10));
        // A span on another day stays out of the report.
        device.power_on(ts(4, 8));
        device.power_off(ts(4, 9));
        let id = device.id;

        let svc = EnergyService::new(InMemoryDeviceStore::with(vec![device]));
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let kwh = svc.daily(id, date).await.unwrap();
        assert_kwh(kwh, 1.0);
    }

    #[tokio::test]
    async fn should_report_monthly_consumption() {
        let mut device = heater(2000.0);
        device.power_on(ts(10, 0));
        device.power_off(ts(10, 3));
        let id = device.id;

        let svc = EnergyService::new(InMemoryDeviceStore::with(vec![device]));
        let kwh = svc.monthly(id, 2024, 5).await.unwrap();
        assert_kwh(kwh, 6.0);
    }

    #[tokio::test]
    async fn should_return_zero_for_invalid_month() {
        let device = heater(2000.0);
        let id = device.id;
        let svc = EnergyService::new(InMemoryDeviceStore::with(vec![device]));
        let kwh = svc.monthly(id, 2024, 13).await.unwrap();
        assert_kwh(kwh, 0.0);
    }

    #[tokio::test]
    async fn should_report_yearly_consumption() {
        let mut device = heater(100.0);
        device.power_on(ts(1, 0));
        device.power_off(ts(1, 10));
        let id = device.id;

        let svc = EnergyService::new(InMemoryDeviceStore::with(vec![device]));
        let kwh = svc.yearly(id, 2024).await.unwrap();
        assert_kwh(kwh, 1.0);
    }

    #[tokio::test]
    async fn should_sum_room_consumption_across_metered_devices() {
        let room_id = RoomId::new();

        let mut heater_a = heater(1000.0);
        heater_a.room_id = Some(room_id);
        heater_a.power_on(ts(1, 10));
        heater_a.power_off(ts(1, 11));

        let mut heater_b = heater(500.0);
        heater_b.room_id = Some(room_id);
        heater_b.power_on(ts(1, 10));
        heater_b.power_off(ts(1, 12));

        // Battery devices never contribute.
        let mut sensor = Device::builder()
            .name("Door Sensor")
            .power_mode(PowerMode::Battery)
            .power_draw_watts(2.0)
            .build()
            .unwrap();
        sensor.room_id = Some(room_id);
        sensor.power_on(ts(1, 0));
        sensor.power_off(ts(1, 20));

        // In another room entirely.
        let mut elsewhere = heater(9000.0);
        elsewhere.power_on(ts(1, 10));
        elsewhere.power_off(ts(1, 11));

        let svc = EnergyService::new(InMemoryDeviceStore::with(vec![
            heater_a, heater_b, sensor, elsewhere,
        ]));
        let kwh = svc.room_report(room_id, ts(1, 0), ts(2, 0)).await.unwrap();
        assert_kwh(kwh, 2.0);
    }

    #[tokio::test]
    async fn should_return_zero_for_room_with_no_devices() {
        let svc = EnergyService::new(InMemoryDeviceStore::with(vec![]));
        let kwh = svc
            .room_report(RoomId::new(), ts(1, 0), ts(2, 0))
            .await
            .unwrap();
        assert_kwh(kwh, 0.0);
    }
}
