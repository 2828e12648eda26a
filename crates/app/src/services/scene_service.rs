//! Scene service — authoring scenes and dispatching them to devices.

use hestia_domain::error::{HestiaError, NotFoundError};
use hestia_domain::id::{DeviceId, SceneId};
use hestia_domain::scene::{AttributeMap, Scene};

use crate::ports::{DeviceStore, EventPublisher, SceneStore};
use crate::scene_engine::{SceneEngine, SceneRun};

/// Application service for scene CRUD, binding edits, and dispatch.
///
/// Dispatch delegates to an embedded [`SceneEngine`], so triggering through
/// this service and running the engine directly behave the same.
pub struct SceneService<SS, DS, P> {
    scenes: SS,
    engine: SceneEngine<DS, P>,
}

impl<SS, DS, P> SceneService<SS, DS, P>
where
    SS: SceneStore,
    DS: DeviceStore,
    P: EventPublisher,
{
    /// Create a new service. The device store and publisher feed the
    /// embedded engine.
    pub fn new(scenes: SS, devices: DS, publisher: P) -> Self {
        Self {
            scenes,
            engine: SceneEngine::new(devices, publisher),
        }
    }

    /// Create a new scene after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] if invariants fail, or a
    /// storage error propagated from the store.
    #[tracing::instrument(skip(self, scene), fields(scene_name = %scene.name))]
    pub async fn create_scene(&self, scene: Scene) -> Result<Scene, HestiaError> {
        scene.validate()?;
        self.scenes.create(scene).await
    }

    /// Look up a scene by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no scene with `id` exists,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn get_scene(&self, id: SceneId) -> Result<Scene, HestiaError> {
        self.scenes.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Scene",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all scenes.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_scenes(&self) -> Result<Vec<Scene>, HestiaError> {
        self.scenes.get_all().await
    }

    /// Delete a scene by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn delete_scene(&self, id: SceneId) -> Result<(), HestiaError> {
        self.scenes.delete(id).await
    }

    /// Bind a device to a scene, merging with any existing binding for the
    /// same device (newest value wins per key).
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the scene does not exist,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self, attributes))]
    pub async fn bind_device(
        &self,
        scene_id: SceneId,
        device_id: DeviceId,
        attributes: AttributeMap,
    ) -> Result<Scene, HestiaError> {
        let mut scene = self.get_scene(scene_id).await?;
        scene.bind(device_id, attributes);
        self.scenes.update(scene).await
    }

    /// Remove a device's binding from a scene. Unbinding a device that was
    /// never bound is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the scene does not exist,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn unbind_device(
        &self,
        scene_id: SceneId,
        device_id: DeviceId,
    ) -> Result<Scene, HestiaError> {
        let mut scene = self.get_scene(scene_id).await?;
        scene.unbind(device_id);
        self.scenes.update(scene).await
    }

    /// Run a scene against its devices and report the outcome per binding.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the scene does not exist, or a
    /// storage error from loading or saving devices. Per-binding failures
    /// land in the returned [`SceneRun`].
    #[tracing::instrument(skip(self))]
    pub async fn trigger(&self, scene_id: SceneId) -> Result<SceneRun, HestiaError> {
        let scene = self.get_scene(scene_id).await?;
        self.engine.execute(&scene).await
    }

    /// Dry-run a scene: resolve targets and keys without applying anything.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the scene does not exist,
    /// or a storage error from loading devices.
    #[tracing::instrument(skip(self))]
    pub async fn check(&self, scene_id: SceneId) -> Result<SceneRun, HestiaError> {
        let scene = self.get_scene(scene_id).await?;
        self.engine.validate(&scene).await
    }
}
