use crate::wheel::drag::DragState;
use crate::wheel::error::WheelError;
use crate::wheel::item::{ClickOutcome, Item, ViewFactory};
use crate::wheel::model::{Geometry, WheelModel};
use crate::wheel::settings::WheelSettings;
use crate::wheel::snap::{SnapPoll, SnapTask, snap_interval};
use crate::wheel::surface::{PointerSource, Surface, SurfaceLocator, SurfaceQuery};
use rondelctl::geom::Point;
use std::f64::consts::PI;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No snap in flight.
    Idle,
    /// A snap is waiting for its next step.
    Waiting,
    Stepped,
    /// The snap finished and selected this item.
    Finished { index: usize },
}

/// Drives a wheel: rebuilds, drags, snapping and click routing.
///
/// Nothing here returns an error to the caller. Failing operations log why and
/// leave the wheel as it was.
pub struct WheelController<T> {
    settings: WheelSettings,
    model: WheelModel<T>,
    query: SurfaceQuery,
    locator: Box<dyn SurfaceLocator>,
    factory: Box<dyn ViewFactory<T>>,
    surface: Option<Box<dyn Surface>>,
    snap: Option<SnapTask>,
    drag: DragState,
    current_selected_index: usize,
    initialized: bool,
}

impl<T> WheelController<T> {
    pub fn new(
        settings: WheelSettings,
        query: SurfaceQuery,
        locator: impl SurfaceLocator + 'static,
        factory: impl ViewFactory<T> + 'static,
    ) -> Self {
        let settings = settings.sanitized();
        Self {
            model: WheelModel::new(Geometry::from(&settings)),
            settings,
            query,
            locator: Box::new(locator),
            factory: Box::new(factory),
            surface: None,
            snap: None,
            drag: DragState::default(),
            current_selected_index: 0,
            initialized: false,
        }
    }

    /// Looks up the surface the wheel draws on. Until this succeeds every
    /// operation is a no-op.
    pub fn init(&mut self) -> bool {
        if self.initialized {
            return true;
        }

        match self.locator.locate(&self.query) {
            Some(surface) => {
                self.surface = Some(surface);
                self.model.clear_data();
                self.initialized = true;
                log::debug!(
                    "wheel attached to surface {} '{}'",
                    self.query.find_mode,
                    self.query.name
                );
            }
            None => log::warn!(
                "{}",
                WheelError::SurfaceNotFound {
                    mode: self.query.find_mode,
                    name: self.query.name.clone(),
                }
            ),
        }
        self.initialized
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_snapping(&self) -> bool {
        self.snap.is_some()
    }

    pub fn current_selected_index(&self) -> usize {
        self.current_selected_index
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    pub fn model(&self) -> &WheelModel<T> {
        &self.model
    }

    pub fn items(&self) -> &[Item<T>] {
        self.model.items()
    }

    pub fn item(&self, index: usize) -> Option<&Item<T>> {
        self.model.item(index)
    }

    pub fn closest_to_center(&self) -> Option<usize> {
        self.model.closest_to_center()
    }

    pub fn snap_target(&self) -> Option<usize> {
        self.snap.as_ref().map(SnapTask::target)
    }

    /// When the in-flight snap wants its next `tick`.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.snap.as_ref().map(SnapTask::resume_at)
    }

    /// Replaces the tunables. Items keep their angles until the next jump,
    /// snap or drag.
    pub fn apply_settings(&mut self, settings: WheelSettings) {
        self.settings = settings.sanitized();
        self.model.set_geometry(Geometry::from(&self.settings));
    }

    pub fn add(&mut self, data: T, with_refresh: bool) {
        if let Err(e) = self.ensure_initialized() {
            log::warn!("add ignored: {}", e);
            return;
        }
        self.model.push_data(data);
        if with_refresh {
            self.refresh();
        }
    }

    pub fn remove(&mut self, index: usize, with_refresh: bool) {
        if let Err(e) = self.try_remove(index) {
            log::warn!("remove ignored: {}", e);
            return;
        }
        if with_refresh {
            self.refresh();
        }
    }

    fn try_remove(&mut self, index: usize) -> Result<(), WheelError> {
        self.ensure_initialized()?;
        let len = self.model.pending().len();
        self.model
            .remove_data(index)
            .map(|_| ())
            .ok_or(WheelError::IndexOutOfBounds { index, len })
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.ensure_initialized() {
            log::warn!("clear ignored: {}", e);
            return;
        }
        self.model.clear_data();
        self.refresh();
    }

    /// Tears down every item view and rebuilds one item per pending entry,
    /// spaced evenly around the circle starting at angle 0.
    pub fn refresh(&mut self) {
        if let Err(e) = self.try_refresh() {
            log::warn!("refresh: {}", e);
        }
    }

    fn try_refresh(&mut self) -> Result<(), WheelError> {
        self.ensure_initialized()?;
        self.reset();
        let Some(surface) = self.surface.as_deref() else {
            return Err(WheelError::NotInitialized);
        };

        let pending = self.model.pending().to_vec();
        if pending.is_empty() {
            return Ok(());
        }

        let average_angle = 2.0 * PI / pending.len() as f64;
        let mut failure = None;

        for (i, data) in pending.into_iter().enumerate() {
            let Some(view) = self.factory.create(i, surface) else {
                failure = Some(WheelError::ViewCreation { index: i });
                break;
            };
            self.model
                .push_item(Item::new(i, data, view), i as f64 * average_angle);
        }

        self.model.check_ranges();
        self.model.sort_siblings();
        log::debug!("wheel rebuilt with {} items", self.model.len());

        failure.map_or(Ok(()), Err)
    }

    /// Animates the item at `index` into the center slot, replacing any snap
    /// already in flight.
    pub fn snap_to_center(&mut self, index: usize) {
        self.snap_to_center_at(index, Instant::now());
    }

    pub fn snap_to_center_at(&mut self, index: usize, now: Instant) {
        self.snap = None;
        if let Err(e) = self.try_snap(index, now) {
            log::warn!("snap to {} ignored: {}", index, e);
        }
    }

    fn try_snap(&mut self, index: usize, now: Instant) -> Result<(), WheelError> {
        self.ensure_initialized()?;
        let angle = self.target_angle(index)?;
        let geometry = self.model.geometry();

        let task = SnapTask::plan(
            index,
            geometry.offset_to_center(angle),
            geometry.normalized_distance_to_center(angle),
            snap_interval(self.settings.snap_speed),
            now,
        );
        log::debug!(
            "snapping item {} in {} steps of {:.4} rad",
            index,
            task.steps(),
            task.step_delta()
        );

        self.snap = Some(task);
        // the first step runs right away
        self.tick(now);
        Ok(())
    }

    /// Moves the item at `index` into the center slot in one step.
    pub fn jump_to_center(&mut self, index: usize) {
        self.snap = None;
        if let Err(e) = self.try_jump(index) {
            log::warn!("jump to {} ignored: {}", index, e);
        }
    }

    fn try_jump(&mut self, index: usize) -> Result<(), WheelError> {
        self.ensure_initialized()?;
        let angle = self.target_angle(index)?;
        let offset = self.model.geometry().offset_to_center(angle);

        self.model.rotate_all(offset);
        self.finish_selection(index);
        self.model.sort_siblings();
        Ok(())
    }

    /// Advances the in-flight snap by at most one step.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let Some(task) = self.snap.as_mut() else {
            return TickOutcome::Idle;
        };

        match task.poll(now) {
            SnapPoll::Pending => TickOutcome::Waiting,
            SnapPoll::Step(delta) => {
                self.model.rotate_all(delta);
                self.model.sort_siblings();
                TickOutcome::Stepped
            }
            SnapPoll::Done(index) => {
                self.snap = None;
                self.finish_selection(index);
                TickOutcome::Finished { index }
            }
        }
    }

    fn finish_selection(&mut self, index: usize) {
        if let Some(item) = self.model.item_mut(index) {
            item.select();
        }
        self.current_selected_index = index;
    }

    fn target_angle(&self, index: usize) -> Result<f64, WheelError> {
        self.model
            .item(index)
            .map(Item::angle)
            .ok_or(WheelError::IndexOutOfBounds {
                index,
                len: self.model.len(),
            })
    }

    /// A click activates a selected item and snaps any other item to center.
    pub fn click(&mut self, index: usize) {
        if !self.initialized {
            log::warn!("click on {} ignored: {}", index, WheelError::NotInitialized);
            return;
        }
        let len = self.model.len();
        let Some(item) = self.model.item_mut(index) else {
            log::warn!(
                "click ignored: {}",
                WheelError::IndexOutOfBounds { index, len }
            );
            return;
        };

        if item.click() == ClickOutcome::SnapRequested {
            self.snap_to_center(index);
        }
    }

    pub fn begin_drag(&mut self, pointer: &impl PointerSource) {
        match self.drag_sample(pointer) {
            Some(local) => self.drag.begin(local),
            None => self.drag.reset(),
        }
    }

    pub fn drag(&mut self, pointer: &impl PointerSource) {
        let Some(local) = self.drag_sample(pointer) else {
            return;
        };

        let delta = self.drag.advance(local, self.settings.drag_speed);
        if delta == 0.0 {
            return;
        }

        self.model.rotate_all(delta);
        if self.settings.sort_sibling_while_dragging {
            self.model.sort_siblings();
        }
    }

    /// Settles on whichever item ended up nearest the center.
    pub fn end_drag(&mut self) {
        if !self.can_drag() {
            return;
        }
        let Some(nearest) = self.model.closest_to_center() else {
            return;
        };
        if self.model.item(nearest).is_some_and(Item::is_selected) {
            return;
        }
        self.snap_to_center(nearest);
    }

    fn can_drag(&self) -> bool {
        self.initialized && self.settings.enable_drag && !self.is_snapping() && !self.model.is_empty()
    }

    fn drag_sample(&self, pointer: &impl PointerSource) -> Option<Point> {
        if !self.can_drag() {
            return None;
        }
        self.surface
            .as_ref()
            .map(|s| s.to_local(pointer.pointer_position()))
    }

    /// Stops any snap, destroys every item and detaches from the surface.
    /// The wheel needs a fresh `init` afterwards.
    pub fn release(&mut self) {
        self.reset();
        self.model.clear_data();
        self.surface = None;
        self.initialized = false;
        log::debug!("wheel released");
    }

    fn reset(&mut self) {
        self.snap = None;
        self.drag.reset();
        self.model.clear_items();
    }

    fn ensure_initialized(&mut self) -> Result<(), WheelError> {
        if self.init() {
            Ok(())
        } else {
            Err(WheelError::NotInitialized)
        }
    }
}

impl<T> Drop for WheelController<T> {
    fn drop(&mut self) {
        self.reset();
    }
}
