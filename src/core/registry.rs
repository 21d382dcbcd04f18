//! Ownership of map views keyed by the host's view identity.
//!
//! Hosts that embed several native maps look views up here by the id they
//! assigned at creation, so camera values of one view can never leak into
//! another. Dropping a view from the registry drops its camera with it.

use crate::core::{config::MapViewOptions, map::MapView};
use crate::input::commands::{MapCommand, MapReply};
use crate::prelude::HashMap;
use crate::traits::MapControl;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Host-assigned identity of one native map view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapViewId(pub u64);

impl std::fmt::Display for MapViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "map-view-{}", self.0)
    }
}

#[derive(Debug)]
pub struct MapViewRegistry<C: MapControl> {
    views: HashMap<MapViewId, MapView<C>>,
}

impl<C: MapControl> Default for MapViewRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MapControl> MapViewRegistry<C> {
    pub fn new() -> Self {
        Self {
            views: HashMap::default(),
        }
    }

    /// Associates a control with `id`, replacing (and returning) any view
    /// previously registered under the same id.
    pub fn create(
        &mut self,
        id: MapViewId,
        control: C,
        options: MapViewOptions,
    ) -> Result<Option<MapView<C>>> {
        let view = MapView::with_options(control, options)?;
        let previous = self.views.insert(id, view);
        if previous.is_some() {
            log::warn!("{} was registered twice, replacing the old view", id);
        }
        log::debug!("{} created", id);
        Ok(previous)
    }

    pub fn get(&self, id: MapViewId) -> Result<&MapView<C>> {
        self.views.get(&id).ok_or(MapError::UnknownMapView(id.0))
    }

    pub fn get_mut(&mut self, id: MapViewId) -> Result<&mut MapView<C>> {
        self.views.get_mut(&id).ok_or(MapError::UnknownMapView(id.0))
    }

    /// Tears a view down, returning it so the caller can release the control.
    pub fn remove(&mut self, id: MapViewId) -> Option<MapView<C>> {
        let removed = self.views.remove(&id);
        if removed.is_some() {
            log::debug!("{} disposed", id);
        }
        removed
    }

    /// Routes a command to the view registered under `id`.
    pub fn dispatch(&mut self, id: MapViewId, command: MapCommand) -> Result<MapReply> {
        self.get_mut(id)?.handle(command)
    }

    pub fn contains(&self, id: MapViewId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::headless::HeadlessMapControl;

    #[test]
    fn test_views_do_not_share_camera() {
        let mut registry = MapViewRegistry::new();
        let first = MapViewId(1);
        let second = MapViewId(2);
        registry
            .create(first, HeadlessMapControl::default(), MapViewOptions::default())
            .unwrap();
        registry
            .create(second, HeadlessMapControl::default(), MapViewOptions::default())
            .unwrap();

        registry
            .dispatch(first, MapCommand::ZoomTo { zoom_level: 14.0, animated: None })
            .unwrap();

        assert_eq!(registry.get(first).unwrap().zoom_level(), 14.0);
        assert_eq!(registry.get(second).unwrap().zoom_level(), 0.0);
    }

    #[test]
    fn test_unknown_view() {
        let mut registry: MapViewRegistry<HeadlessMapControl> = MapViewRegistry::new();
        assert!(matches!(
            registry.dispatch(MapViewId(9), MapCommand::GetVisibleRegion),
            Err(MapError::UnknownMapView(9))
        ));
    }

    #[test]
    fn test_remove_clears_state() {
        let mut registry = MapViewRegistry::new();
        let id = MapViewId(3);
        registry
            .create(id, HeadlessMapControl::default(), MapViewOptions::default())
            .unwrap();
        registry.get_mut(id).unwrap().zoom_to(9.0, false);

        assert!(registry.remove(id).is_some());
        assert!(registry.is_empty());

        registry
            .create(id, HeadlessMapControl::default(), MapViewOptions::default())
            .unwrap();
        assert_eq!(registry.get(id).unwrap().zoom_level(), 0.0);
    }

    #[test]
    fn test_recreate_returns_previous() {
        let mut registry = MapViewRegistry::new();
        let id = MapViewId(4);
        let none = registry
            .create(id, HeadlessMapControl::default(), MapViewOptions::default())
            .unwrap();
        assert!(none.is_none());
        let previous = registry
            .create(id, HeadlessMapControl::default(), MapViewOptions::default())
            .unwrap();
        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(id.to_string(), "map-view-4");
    }
}
