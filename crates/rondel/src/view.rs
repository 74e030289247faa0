use crate::wheel::{ItemHooks, ItemView, Surface, Transform, ViewFactory};
use palette::Srgba;
use rondelctl::geom::{ItemLabel, Point};
use std::cell::Cell;
use std::rc::Rc;

pub const ACTIVE_TINT: Srgba<f64> = Srgba::new(1.0, 1.0, 1.0, 1.0);
pub const INACTIVE_TINT: Srgba<f64> = Srgba::new(1.0, 1.0, 1.0, 0.5);

/// Headless text item: keeps its placement and tint so the daemon can report
/// them, and logs every transition.
pub struct LabelView {
    label: ItemLabel,
    index: usize,
    /// Screen position of the wheel center.
    anchor: Point,
    transform: Option<Transform>,
    sibling_index: usize,
    tint: Rc<Cell<Srgba<f64>>>,
}

impl Default for LabelView {
    fn default() -> Self {
        Self {
            label: ItemLabel::new(""),
            index: 0,
            anchor: Point::default(),
            transform: None,
            sibling_index: 0,
            tint: Rc::new(Cell::new(INACTIVE_TINT)),
        }
    }
}

impl LabelView {
    pub fn on_surface(surface: &dyn Surface) -> Self {
        Self {
            anchor: surface.to_screen(Point::default()),
            ..Self::default()
        }
    }

    /// Where the label sits on screen, once placed.
    pub fn screen_position(&self) -> Option<Point> {
        self.transform.map(|t| self.anchor + t.position)
    }

    pub fn tint(&self) -> Srgba<f64> {
        self.tint.get()
    }

    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }

    pub fn sibling_index(&self) -> usize {
        self.sibling_index
    }

    pub fn tint_handle(&self) -> Rc<Cell<Srgba<f64>>> {
        self.tint.clone()
    }
}

impl ItemView<ItemLabel> for LabelView {
    fn init_events(&mut self, index: usize, data: &ItemLabel, hooks: &mut ItemHooks) {
        let tint = self.tint.clone();
        let label = data.clone();
        hooks.on_enter_range(move || {
            tint.set(ACTIVE_TINT);
            log::debug!("[{}] '{}' in range", index, label);
        });

        let tint = self.tint.clone();
        let label = data.clone();
        hooks.on_leave_range(move || {
            tint.set(INACTIVE_TINT);
            log::debug!("[{}] '{}' out of range", index, label);
        });

        let label = data.clone();
        hooks.on_selected(move || log::info!("[{}] '{}' selected", index, label));

        let label = data.clone();
        hooks.on_activated(move || log::info!("[{}] '{}' activated", index, label));
    }

    fn init_display(&mut self, index: usize, data: &ItemLabel) {
        self.index = index;
        self.label = data.clone();
    }

    fn set_transform(&mut self, transform: Transform) {
        log::trace!(
            "[{}] at ({:.1}, {:.1}) scale {:.3}",
            self.index,
            transform.position.x,
            transform.position.y,
            transform.scale
        );
        self.transform = Some(transform);
    }

    fn set_sibling_index(&mut self, order: usize) {
        self.sibling_index = order;
    }

    fn teardown(&mut self) {
        log::trace!("[{}] '{}' destroyed", self.index, self.label);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LabelViewFactory;

impl ViewFactory<ItemLabel> for LabelViewFactory {
    fn create(
        &mut self,
        _index: usize,
        surface: &dyn Surface,
    ) -> Option<Box<dyn ItemView<ItemLabel>>> {
        Some(Box::new(LabelView::on_surface(surface)))
    }
}
