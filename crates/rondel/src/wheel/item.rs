use crate::wheel::angle::normalize_angle;
use crate::wheel::model::{Geometry, Transform};
use crate::wheel::surface::Surface;
use std::rc::Rc;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum RangeStatus {
    #[default]
    Unset,
    InRange,
    OutRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum SelectStatus {
    #[default]
    Unset,
    Selected,
    Deselected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The item was already selected; its activation hook ran.
    Activated,
    /// The item is not selected yet and should be brought to the center.
    SnapRequested,
}

/// Host-supplied presentation of one wheel item.
///
/// The wheel drives placement and stacking; everything about how an item looks
/// or reacts lives behind this trait. The three `init_*` methods run once per
/// rebuild, in the order components, events, display.
pub trait ItemView<T> {
    fn init_components(&mut self) {}

    /// Register transition callbacks for this item.
    fn init_events(&mut self, _index: usize, _data: &T, _hooks: &mut ItemHooks) {}

    fn init_display(&mut self, _index: usize, _data: &T) {}

    fn set_transform(&mut self, transform: Transform);

    /// `order` 0 is the back of the stack.
    fn set_sibling_index(&mut self, _order: usize) {}

    /// Called when the wheel discards this view.
    fn teardown(&mut self) {}
}

/// Builds one view per item, on the surface the wheel attached to.
pub trait ViewFactory<T> {
    fn create(&mut self, index: usize, surface: &dyn Surface) -> Option<Box<dyn ItemView<T>>>;
}

impl<T, F> ViewFactory<T> for F
where
    F: FnMut(usize, &dyn Surface) -> Option<Box<dyn ItemView<T>>>,
{
    fn create(&mut self, index: usize, surface: &dyn Surface) -> Option<Box<dyn ItemView<T>>> {
        self(index, surface)
    }
}

type Hook = Box<dyn FnMut()>;
type DistanceHook = Box<dyn FnMut(f64)>;

/// One registrant per event; registering again replaces the previous hook.
#[derive(Default)]
pub struct ItemHooks {
    enter_range: Option<Hook>,
    leave_range: Option<Hook>,
    selected: Option<Hook>,
    activated: Option<Hook>,
    distance: Option<DistanceHook>,
}

impl ItemHooks {
    pub fn on_enter_range(&mut self, f: impl FnMut() + 'static) -> &mut Self {
        self.enter_range = Some(Box::new(f));
        self
    }

    pub fn on_leave_range(&mut self, f: impl FnMut() + 'static) -> &mut Self {
        self.leave_range = Some(Box::new(f));
        self
    }

    pub fn on_selected(&mut self, f: impl FnMut() + 'static) -> &mut Self {
        self.selected = Some(Box::new(f));
        self
    }

    pub fn on_activated(&mut self, f: impl FnMut() + 'static) -> &mut Self {
        self.activated = Some(Box::new(f));
        self
    }

    /// Runs on every angle update with the item's normalized distance to center.
    pub fn on_distance(&mut self, f: impl FnMut(f64) + 'static) -> &mut Self {
        self.distance = Some(Box::new(f));
        self
    }

    fn fire(hook: &mut Option<Hook>) {
        if let Some(f) = hook {
            f();
        }
    }
}

pub struct Item<T> {
    index: usize,
    angle: f64,
    data: Rc<T>,
    range_status: RangeStatus,
    select_status: SelectStatus,
    view: Box<dyn ItemView<T>>,
    hooks: ItemHooks,
}

impl<T> Item<T> {
    pub(crate) fn new(index: usize, data: Rc<T>, mut view: Box<dyn ItemView<T>>) -> Self {
        let mut hooks = ItemHooks::default();
        view.init_components();
        view.init_events(index, &data, &mut hooks);
        view.init_display(index, &data);

        Self {
            index,
            angle: 0.0,
            data,
            range_status: RangeStatus::Unset,
            select_status: SelectStatus::Unset,
            view,
            hooks,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn range_status(&self) -> RangeStatus {
        self.range_status
    }

    pub fn select_status(&self) -> SelectStatus {
        self.select_status
    }

    pub fn is_selected(&self) -> bool {
        self.select_status == SelectStatus::Selected
    }

    /// Moves the item by `delta` radians and pushes the new placement to its view.
    pub(crate) fn rotate(&mut self, delta: f64, geometry: &Geometry) {
        self.angle = normalize_angle(self.angle + delta);
        self.view.set_transform(geometry.position_for(self.angle));

        let distance = geometry.normalized_distance_to_center(self.angle);
        if let Some(f) = &mut self.hooks.distance {
            f(distance);
        }
    }

    pub(crate) fn check_range(&mut self, geometry: &Geometry) {
        match geometry.range_status_for(self.angle) {
            RangeStatus::InRange => self.enter_range(),
            _ => self.leave_range(),
        };
    }

    /// Returns whether a transition happened.
    pub(crate) fn enter_range(&mut self) -> bool {
        if self.range_status == RangeStatus::InRange {
            return false;
        }
        self.range_status = RangeStatus::InRange;
        log::trace!("item {} entered range", self.index);
        ItemHooks::fire(&mut self.hooks.enter_range);
        true
    }

    /// Leaving the range always drops the selection.
    pub(crate) fn leave_range(&mut self) -> bool {
        if self.range_status == RangeStatus::OutRange {
            return false;
        }
        self.range_status = RangeStatus::OutRange;
        self.select_status = SelectStatus::Deselected;
        log::trace!("item {} left range", self.index);
        ItemHooks::fire(&mut self.hooks.leave_range);
        true
    }

    pub(crate) fn select(&mut self) -> bool {
        if self.select_status == SelectStatus::Selected {
            return false;
        }
        self.select_status = SelectStatus::Selected;
        log::debug!("item {} selected", self.index);
        ItemHooks::fire(&mut self.hooks.selected);
        true
    }

    pub(crate) fn reset_status(&mut self) {
        self.range_status = RangeStatus::Unset;
        self.select_status = SelectStatus::Unset;
    }

    pub(crate) fn click(&mut self) -> ClickOutcome {
        if self.is_selected() {
            ItemHooks::fire(&mut self.hooks.activated);
            ClickOutcome::Activated
        } else {
            ClickOutcome::SnapRequested
        }
    }

    pub(crate) fn set_sibling_index(&mut self, order: usize) {
        self.view.set_sibling_index(order);
    }

    pub(crate) fn teardown(&mut self) {
        self.view.teardown();
        self.hooks = ItemHooks::default();
    }
}
