use crate::{
    core::{
        bounds::{Bounds, EdgePadding},
        camera::CameraState,
        config::MapViewOptions,
        geo::{CoordinateRegion, CoordinateSpan, LatLng, LatLngBounds},
        viewport,
    },
    input::commands::{MapCommand, MapReply, SetBoundsRequest, SetCenterRequest},
    traits::MapControl,
    Result,
};
use serde::Serialize;

/// Camera and region that were pushed to the native control
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraUpdate {
    pub camera: CameraState,
    pub region: CoordinateRegion,
}

/// One native map view together with the camera values it does not track.
///
/// Each view owns its own [`CameraState`]; two views never share zoom or
/// limits. All methods expect to be called from the thread that owns the
/// native control. Interleaving calls from several threads without external
/// locking is unsupported and gives no ordering guarantee.
#[derive(Debug)]
pub struct MapView<C: MapControl> {
    control: C,
    camera: CameraState,
    options: MapViewOptions,
}

impl<C: MapControl> MapView<C> {
    /// Wraps a control with a default camera
    pub fn new(control: C) -> Self {
        Self {
            control,
            camera: CameraState::default(),
            options: MapViewOptions::default(),
        }
    }

    pub fn with_options(control: C, options: MapViewOptions) -> Result<Self> {
        let camera = options.camera()?;
        Ok(Self {
            control,
            camera,
            options,
        })
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn options(&self) -> &MapViewOptions {
        &self.options
    }

    /// Last commanded or synchronised zoom level
    pub fn zoom_level(&self) -> f64 {
        self.camera.zoom_level
    }

    /// Zoom level recomputed from what the control renders right now.
    ///
    /// Independent of [`zoom_level`](Self::zoom_level); use
    /// [`sync_zoom_from_control`](Self::sync_zoom_from_control) to store it.
    pub fn calculated_zoom_level(&self) -> Result<f64> {
        let region = self.control.region();
        viewport::calculated_zoom_level(&region.center, &region.span, &self.control.size())
    }

    /// Stores the calculated zoom level as the camera zoom.
    pub fn sync_zoom_from_control(&mut self) -> Result<f64> {
        let zoom_level = self.calculated_zoom_level()?;
        self.camera.zoom_level = zoom_level;
        Ok(zoom_level)
    }

    pub fn min_max_zoom_levels(&self) -> (f64, f64) {
        (self.camera.min_zoom_level, self.camera.max_zoom_level)
    }

    pub fn set_min_max_zoom_levels(&mut self, min_zoom_level: f64, max_zoom_level: f64) -> Result<()> {
        self.camera.set_zoom_limits(min_zoom_level, max_zoom_level)?;
        log::debug!(
            "zoom limits set to [{}, {}]",
            min_zoom_level,
            max_zoom_level
        );
        Ok(())
    }

    /// Viewport span at an integer zoom around the control's center.
    pub fn span_for_zoom_in_viewport(&self, zoom_level: i32) -> CoordinateSpan {
        viewport::span_for_zoom_in_viewport(
            &self.control.center_coordinate(),
            zoom_level,
            &self.control.size(),
        )
    }

    /// Rectangle visible around the control's center at the stored zoom.
    pub fn visible_region(&self) -> LatLngBounds {
        viewport::visible_region(
            &self.control.center_coordinate(),
            self.camera.zoom_level,
            &self.control.size(),
        )
    }

    /// "Go here": recentre on `target` (default: current center) at `zoom`
    /// (default: stored zoom). Pitch and heading are always flattened.
    pub fn set_center_coordinate(&mut self, request: SetCenterRequest, animated: bool) -> CameraUpdate {
        let center = request
            .target
            .unwrap_or_else(|| self.control.center_coordinate());
        let zoom_level = request.zoom.unwrap_or(self.camera.zoom_level);
        self.set_center_region(center, zoom_level, animated)
    }

    /// Stores `zoom_level` unclamped, flattens the camera and shows the
    /// naive span for that zoom around `center`.
    pub fn set_center_region(&mut self, center: LatLng, zoom_level: f64, animated: bool) -> CameraUpdate {
        self.camera.zoom_level = zoom_level;
        self.camera.flatten();
        self.control
            .set_camera_orientation(self.camera.pitch, self.camera.heading);

        let region = CoordinateRegion::new(center, viewport::span_for_zoom(zoom_level));
        self.control.set_region(region, animated);

        log::debug!(
            "camera moved to ({:.5}, {:.5}) at zoom {}",
            center.lat,
            center.lng,
            zoom_level
        );

        CameraUpdate {
            camera: self.camera,
            region,
        }
    }

    /// Fits every target coordinate in view, inset by a uniform padding.
    /// An empty target leaves both the camera and the control untouched.
    pub fn set_bounds(&mut self, request: SetBoundsRequest, animated: bool) -> Option<Bounds> {
        let rect = Bounds::from_lat_lngs(&request.target)?;
        self.control
            .set_visible_map_rect(rect, EdgePadding::uniform(request.padding), animated);
        log::debug!(
            "showing map rect {}x{} for {} coordinates",
            rect.width(),
            rect.height(),
            request.target.len()
        );
        Some(rect)
    }

    fn apply_zoom(&mut self, animated: bool) -> CameraUpdate {
        let center = self.control.center_coordinate();
        self.set_center_region(center, self.camera.zoom_level, animated)
    }

    /// One level closer. Returns `None` when the guard refuses the step.
    pub fn zoom_in(&mut self, animated: bool) -> Option<CameraUpdate> {
        if self.camera.zoom_in() {
            Some(self.apply_zoom(animated))
        } else {
            log::debug!("zoom in refused at zoom {}", self.camera.zoom_level);
            None
        }
    }

    /// One level further out. Returns `None` when the guard refuses the step.
    pub fn zoom_out(&mut self, animated: bool) -> Option<CameraUpdate> {
        if self.camera.zoom_out() {
            Some(self.apply_zoom(animated))
        } else {
            log::debug!("zoom out refused at zoom {}", self.camera.zoom_level);
            None
        }
    }

    pub fn zoom_to(&mut self, zoom_level: f64, animated: bool) -> CameraUpdate {
        self.camera.zoom_to(zoom_level);
        self.apply_zoom(animated)
    }

    pub fn zoom_by(&mut self, delta: f64, animated: bool) -> CameraUpdate {
        self.camera.zoom_by(delta);
        self.apply_zoom(animated)
    }

    /// Resynchronises the stored camera after the user moved the control
    /// directly. Nothing is clamped or pushed back to the control.
    pub fn update_stored_camera_values(&mut self, zoom_level: f64, pitch: f64, heading: f64) {
        self.camera.update_stored_values(zoom_level, pitch, heading);
    }

    /// Runs one host command and builds its reply.
    pub fn handle(&mut self, command: MapCommand) -> Result<MapReply> {
        let default_animated = self.options.animated;
        let reply = match command {
            MapCommand::SetCenterCoordinate(request) => {
                let animated = request.animated.unwrap_or(default_animated);
                MapReply::CameraUpdate(self.set_center_coordinate(request, animated))
            }
            MapCommand::SetBounds(request) => {
                let animated = request.animated.unwrap_or(default_animated);
                match self.set_bounds(request, animated) {
                    Some(rect) => MapReply::MapRect(rect),
                    None => MapReply::None,
                }
            }
            MapCommand::ZoomIn { animated } => {
                let applied = self.zoom_in(animated.unwrap_or(default_animated));
                MapReply::Applied(applied.is_some())
            }
            MapCommand::ZoomOut { animated } => {
                let applied = self.zoom_out(animated.unwrap_or(default_animated));
                MapReply::Applied(applied.is_some())
            }
            MapCommand::ZoomTo {
                zoom_level,
                animated,
            } => MapReply::CameraUpdate(
                self.zoom_to(zoom_level, animated.unwrap_or(default_animated)),
            ),
            MapCommand::ZoomBy { delta, animated } => {
                MapReply::CameraUpdate(self.zoom_by(delta, animated.unwrap_or(default_animated)))
            }
            MapCommand::GetVisibleRegion => MapReply::VisibleRegion(self.visible_region()),
            MapCommand::GetZoomLevel => MapReply::ZoomLevel(self.calculated_zoom_level()?),
            MapCommand::GetMinMaxZoomLevels => {
                let (min, max) = self.min_max_zoom_levels();
                MapReply::ZoomLevels([min, max])
            }
            MapCommand::SetMinMaxZoomLevels { min, max } => {
                let (current_min, current_max) = self.min_max_zoom_levels();
                self.set_min_max_zoom_levels(min.unwrap_or(current_min), max.unwrap_or(current_max))?;
                let (min, max) = self.min_max_zoom_levels();
                MapReply::ZoomLevels([min, max])
            }
            MapCommand::UpdateStoredCameraValues {
                zoom,
                pitch,
                heading,
            } => {
                self.update_stored_camera_values(
                    zoom.unwrap_or(self.camera.zoom_level),
                    pitch.unwrap_or(self.camera.pitch),
                    heading.unwrap_or(self.camera.heading),
                );
                MapReply::Camera(self.camera)
            }
        };
        Ok(reply)
    }
}

impl Default for MapView<crate::core::headless::HeadlessMapControl> {
    fn default() -> Self {
        Self::new(crate::core::headless::HeadlessMapControl::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Size;
    use crate::core::headless::{ControlCall, HeadlessMapControl};

    fn view() -> MapView<HeadlessMapControl> {
        MapView::new(HeadlessMapControl::new(Size::new(390.0, 844.0)))
    }

    #[test]
    fn test_set_center_uses_stored_zoom_by_default() {
        let mut map = view();
        map.update_stored_camera_values(7.0, 0.0, 0.0);

        let update = map.set_center_coordinate(
            SetCenterRequest {
                target: Some(LatLng::new(40.0, -3.7)),
                ..Default::default()
            },
            false,
        );

        assert_eq!(update.camera.zoom_level, 7.0);
        assert_eq!(update.region.center, LatLng::new(40.0, -3.7));
        assert_eq!(update.region.span, viewport::span_for_zoom(7.0));
        assert_eq!(map.control().center_coordinate(), LatLng::new(40.0, -3.7));
    }

    #[test]
    fn test_set_center_keeps_current_center_by_default() {
        let mut map = view();
        map.set_center_coordinate(
            SetCenterRequest {
                target: Some(LatLng::new(-22.9, -43.2)),
                zoom: Some(9.0),
                animated: None,
            },
            true,
        );
        let update = map.set_center_coordinate(
            SetCenterRequest {
                zoom: Some(12.0),
                ..Default::default()
            },
            true,
        );

        assert_eq!(update.region.center, LatLng::new(-22.9, -43.2));
        assert_eq!(map.zoom_level(), 12.0);
    }

    #[test]
    fn test_set_center_flattens_camera() {
        let mut map = view();
        map.update_stored_camera_values(5.0, 60.0, 270.0);
        map.control_mut().gesture_orientation(60.0, 270.0);

        let update = map.set_center_coordinate(SetCenterRequest::default(), false);

        assert_eq!(update.camera.pitch, 0.0);
        assert_eq!(update.camera.heading, 0.0);
        assert_eq!(map.control().pitch(), 0.0);
        assert_eq!(map.control().heading(), 0.0);
    }

    #[test]
    fn test_set_bounds_empty_is_noop() {
        let mut map = view();
        map.update_stored_camera_values(4.0, 0.0, 0.0);
        let before = *map.camera();

        assert!(map.set_bounds(SetBoundsRequest::default(), true).is_none());
        assert_eq!(*map.camera(), before);
        assert!(map.control().calls().is_empty());
    }

    #[test]
    fn test_set_bounds_pushes_padded_rect() {
        let mut map = view();
        let request = SetBoundsRequest {
            target: vec![LatLng::new(10.0, 10.0), LatLng::new(20.0, 30.0)],
            padding: 16.0,
            animated: None,
        };
        let rect = map.set_bounds(request, false).unwrap();

        assert_eq!(
            map.control().calls(),
            &[ControlCall::SetVisibleMapRect {
                rect,
                padding: EdgePadding::uniform(16.0),
                animated: false,
            }]
        );
    }

    #[test]
    fn test_zoom_in_then_out() {
        let mut map = view();
        map.update_stored_camera_values(1.0, 0.0, 0.0);

        let update = map.zoom_in(true).unwrap();
        assert_eq!(update.camera.zoom_level, 3.0);
        assert_eq!(update.region.span, viewport::span_for_zoom(3.0));

        let update = map.zoom_out(true).unwrap();
        assert_eq!(update.camera.zoom_level, 0.0);
    }

    #[test]
    fn test_refused_zoom_does_not_touch_control() {
        let mut map = view();
        assert!(map.zoom_out(false).is_none());
        assert!(map.control().calls().is_empty());
    }

    #[test]
    fn test_zoom_keeps_control_center() {
        let mut map = view();
        let center = LatLng::new(35.68, 139.76);
        map.set_center_region(center, 10.0, false);

        let update = map.zoom_by(2.5, false);
        assert_eq!(update.region.center, center);
        assert_eq!(map.zoom_level(), 12.5);

        let update = map.zoom_to(99.0, false);
        assert_eq!(update.camera.zoom_level, 21.0);
    }

    #[test]
    fn test_calculated_zoom_is_distinct_from_stored() {
        let mut map = view();
        map.set_center_region(LatLng::new(0.0, 0.0), 10.0, false);
        map.update_stored_camera_values(3.0, 0.0, 0.0);

        let calculated = map.calculated_zoom_level().unwrap();
        assert_ne!(calculated, 3.0);
        assert_eq!(map.zoom_level(), 3.0);

        let synced = map.sync_zoom_from_control().unwrap();
        assert_eq!(synced, calculated);
        assert_eq!(map.zoom_level(), calculated);
    }

    #[test]
    fn test_visible_region_before_layout() {
        let mut map = MapView::new(HeadlessMapControl::new(Size::new(0.0, 0.0)));
        map.zoom_to(8.0, false);
        assert_eq!(map.visible_region(), LatLngBounds::zero());
    }

    #[test]
    fn test_with_options() {
        let options = MapViewOptions {
            min_zoom_level: 3.0,
            max_zoom_level: 12.0,
            initial_zoom_level: 5.0,
            animated: false,
        };
        let mut map = MapView::with_options(HeadlessMapControl::default(), options).unwrap();
        assert_eq!(map.min_max_zoom_levels(), (3.0, 12.0));
        assert_eq!(map.zoom_level(), 5.0);

        map.handle(MapCommand::ZoomIn { animated: None }).unwrap();
        assert_eq!(
            map.control().calls().last(),
            Some(&ControlCall::SetRegion {
                region: CoordinateRegion::new(LatLng::new(0.0, 0.0), viewport::span_for_zoom(6.0)),
                animated: false,
            })
        );
    }
}
