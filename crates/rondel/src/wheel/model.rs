use crate::wheel::angle::normalize_angle;
use crate::wheel::item::{Item, RangeStatus};
use crate::wheel::settings::WheelSettings;
use crate::wheel::REDUCTION_FACTOR;
use rondelctl::geom::Point;
use std::f64::consts::PI;
use std::rc::Rc;

/// Local placement of an item view relative to the wheel center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Point,
    /// May go negative for extreme reduction ratios; views clamp if they care.
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub radius: f64,
    pub center_angle: f64,
    pub sight_angle_x: f64,
    pub sight_angle_y: f64,
    pub reduction_ratio: f64,
    pub center_tolerance: f64,
}

impl From<&WheelSettings> for Geometry {
    fn from(s: &WheelSettings) -> Self {
        Self {
            radius: s.radius,
            center_angle: s.center_angle,
            sight_angle_x: s.sight_angle_x,
            sight_angle_y: s.sight_angle_y,
            reduction_ratio: s.reduction_ratio,
            center_tolerance: s.center_tolerance,
        }
    }
}

impl Geometry {
    /// Signed rotation that brings `angle` onto the center slot.
    pub fn offset_to_center(&self, angle: f64) -> f64 {
        normalize_angle(self.center_angle - angle)
    }

    /// 0 on the center slot, 1 on the opposite side.
    pub fn normalized_distance_to_center(&self, angle: f64) -> f64 {
        self.offset_to_center(angle).abs() / PI
    }

    pub fn position_for(&self, angle: f64) -> Transform {
        let x = angle.cos() * self.radius * self.sight_angle_x;
        let y = angle.sin() * self.radius * self.sight_angle_y;
        let scale = 1.0
            - self.normalized_distance_to_center(angle) / self.radius
                * self.reduction_ratio
                * REDUCTION_FACTOR;

        Transform {
            position: Point::new(x, y),
            scale,
        }
    }

    pub fn range_status_for(&self, angle: f64) -> RangeStatus {
        if self.normalized_distance_to_center(angle) <= self.center_tolerance {
            RangeStatus::InRange
        } else {
            RangeStatus::OutRange
        }
    }
}

/// Item data waiting for the next rebuild, plus the items built from it.
pub struct WheelModel<T> {
    geometry: Geometry,
    pending: Vec<Rc<T>>,
    items: Vec<Item<T>>,
}

impl<T> WheelModel<T> {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            pending: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub(crate) fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    pub fn normalized_distance_to_center(&self, angle: f64) -> f64 {
        self.geometry.normalized_distance_to_center(angle)
    }

    pub fn position_for(&self, angle: f64) -> Transform {
        self.geometry.position_for(angle)
    }

    pub fn pending(&self) -> &[Rc<T>] {
        &self.pending
    }

    pub(crate) fn push_data(&mut self, data: T) {
        self.pending.push(Rc::new(data));
    }

    pub(crate) fn remove_data(&mut self, index: usize) -> Option<Rc<T>> {
        (index < self.pending.len()).then(|| self.pending.remove(index))
    }

    pub(crate) fn clear_data(&mut self) {
        self.pending.clear();
    }

    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item<T>> {
        self.items.get(index)
    }

    pub(crate) fn item_mut(&mut self, index: usize) -> Option<&mut Item<T>> {
        self.items.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Builds an item at `angle` and appends it; the item is placed on its view right away.
    pub(crate) fn push_item(&mut self, mut item: Item<T>, angle: f64) {
        item.reset_status();
        item.rotate(angle, &self.geometry);
        self.items.push(item);
    }

    pub(crate) fn clear_items(&mut self) {
        for item in &mut self.items {
            item.teardown();
        }
        self.items.clear();
    }

    /// Rotates every item and re-checks its range status.
    pub(crate) fn rotate_all(&mut self, delta: f64) {
        let geometry = self.geometry;
        for item in &mut self.items {
            item.rotate(delta, &geometry);
            item.check_range(&geometry);
        }
    }

    pub(crate) fn check_ranges(&mut self) {
        let geometry = self.geometry;
        for item in &mut self.items {
            item.check_range(&geometry);
        }
    }

    /// Restacks views so the item nearest the center ends up in front.
    pub(crate) fn sort_siblings(&mut self) {
        let mut order: Vec<(usize, f64)> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (i, self.geometry.normalized_distance_to_center(item.angle())))
            .collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1));

        let back = order.len().saturating_sub(1);
        for (rank, (i, _)) in order.into_iter().enumerate() {
            self.items[i].set_sibling_index(back - rank);
        }
    }

    pub fn closest_to_center(&self) -> Option<usize> {
        self.items
            .iter()
            .min_by(|a, b| {
                self.geometry
                    .normalized_distance_to_center(a.angle())
                    .total_cmp(&self.geometry.normalized_distance_to_center(b.angle()))
            })
            .map(Item::index)
    }
}
