//! In-memory implementation of [`SceneStore`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hestia_app::ports::SceneStore;
use hestia_domain::error::HestiaError;
use hestia_domain::id::SceneId;
use hestia_domain::scene::Scene;

/// Thread-safe in-memory scene store.
#[derive(Clone, Default)]
pub struct MemorySceneStore {
    scenes: Arc<Mutex<HashMap<SceneId, Scene>>>,
}

impl MemorySceneStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SceneId, Scene>> {
        self.scenes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SceneStore for MemorySceneStore {
    fn create(&self, scene: Scene) -> impl Future<Output = Result<Scene, HestiaError>> + Send {
        let mut scenes = self.lock();
        scenes.insert(scene.id, scene.clone());
        async { Ok(scene) }
    }

    fn get_by_id(
        &self,
        id: SceneId,
    ) -> impl Future<Output = Result<Option<Scene>, HestiaError>> + Send {
        let result = self.lock().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Scene>, HestiaError>> + Send {
        let result: Vec<Scene> = self.lock().values().cloned().collect();
        async { Ok(result) }
    }

    fn update(&self, scene: Scene) -> impl Future<Output = Result<Scene, HestiaError>> + Send {
        let mut scenes = self.lock();
        scenes.insert(scene.id, scene.clone());
        async { Ok(scene) }
    }

    fn delete(&self, id: SceneId) -> impl Future<Output = Result<(), HestiaError>> + Send {
        let mut scenes = self.lock();
        scenes.remove(&id);
        async { Ok(()) }
    }
}
