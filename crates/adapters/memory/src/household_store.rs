//! In-memory implementation of [`HouseholdStore`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hestia_app::ports::HouseholdStore;
use hestia_domain::error::HestiaError;
use hestia_domain::household::Household;
use hestia_domain::id::HouseholdId;

/// Thread-safe in-memory household store.
#[derive(Clone, Default)]
pub struct MemoryHouseholdStore {
    households: Arc<Mutex<HashMap<HouseholdId, Household>>>,
}

impl MemoryHouseholdStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<HouseholdId, Household>> {
        self.households
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl HouseholdStore for MemoryHouseholdStore {
    fn create(
        &self,
        household: Household,
    ) -> impl Future<Output = Result<Household, HestiaError>> + Send {
        let mut households = self.lock();
        households.insert(household.id, household.clone());
        async { Ok(household) }
    }

    fn get_by_id(
        &self,
        id: HouseholdId,
    ) -> impl Future<Output = Result<Option<Household>, HestiaError>> + Send {
        let result = self.lock().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Household>, HestiaError>> + Send {
        let result: Vec<Household> = self.lock().values().cloned().collect();
        async { Ok(result) }
    }

    fn update(
        &self,
        household: Household,
    ) -> impl Future<Output = Result<Household, HestiaError>> + Send {
        let mut households = self.lock();
        households.insert(household.id, household.clone());
        async { Ok(household) }
    }

    fn delete(&self, id: HouseholdId) -> impl Future<Output = Result<(), HestiaError>> + Send {
        let mut households = self.lock();
        households.remove(&id);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_create_and_retrieve_household() {
        let store = MemoryHouseholdStore::new();
        let household = store
            .create(Household::builder().name("Baker Street").build().unwrap())
            .await
            .unwrap();

        let found = store.get_by_id(household.id).await.unwrap();
        assert_eq!(found, Some(household));
    }

    #[tokio::test]
    async fn should_return_none_when_household_is_missing() {
        let store = MemoryHouseholdStore::new();
        let found = store.get_by_id(HouseholdId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn should_list_all_households() {
        let store = MemoryHouseholdStore::new();
        store
            .create(Household::builder().name("Baker Street").build().unwrap())
            .await
            .unwrap();
        store
            .create(Household::builder().name("Summer House").build().unwrap())
            .await
            .unwrap();

        assert_eq!(store.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_delete_household() {
        let store = MemoryHouseholdStore::new();
        let household = store
            .create(Household::builder().name("Baker Street").build().unwrap())
            .await
            .unwrap();

        store.delete(household.id).await.unwrap();
        assert!(store.get_by_id(household.id).await.unwrap().is_none());
    }
}
