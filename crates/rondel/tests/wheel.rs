use rondel::wheel::{
    FindMode, ItemHooks, ItemView, OverlaySurface, RangeStatus, Surface, SurfaceName,
    SurfaceQuery, SurfaceRegistry, TickOutcome, Transform, WheelController, WheelSettings,
};
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Seen {
    Enter(usize),
    Leave(usize),
    Selected(usize),
    Activated(usize),
}

#[derive(Default)]
struct Recorder {
    events: Vec<Seen>,
    stacking: Vec<usize>,
}

type Shared = Rc<RefCell<Recorder>>;

struct RecordingView {
    index: usize,
    shared: Shared,
}

impl ItemView<u32> for RecordingView {
    fn init_events(&mut self, index: usize, _data: &u32, hooks: &mut ItemHooks) {
        let s = self.shared.clone();
        hooks.on_enter_range(move || s.borrow_mut().events.push(Seen::Enter(index)));
        let s = self.shared.clone();
        hooks.on_leave_range(move || s.borrow_mut().events.push(Seen::Leave(index)));
        let s = self.shared.clone();
        hooks.on_selected(move || s.borrow_mut().events.push(Seen::Selected(index)));
        let s = self.shared.clone();
        hooks.on_activated(move || s.borrow_mut().events.push(Seen::Activated(index)));
    }

    fn set_transform(&mut self, _transform: Transform) {}

    fn set_sibling_index(&mut self, order: usize) {
        self.shared.borrow_mut().stacking[self.index] = order;
    }
}

fn wheel_with(n: usize) -> (WheelController<u32>, Shared) {
    let shared = Shared::default();
    shared.borrow_mut().stacking = vec![0; n];

    let mut registry = SurfaceRegistry::new();
    registry.register(
        SurfaceName::new("MainCanvas"),
        Some(SurfaceName::new("WheelCanvas")),
        OverlaySurface::default(),
    );

    let views = shared.clone();
    let mut wheel = WheelController::new(
        WheelSettings::default(),
        SurfaceQuery::new(FindMode::Tag, "WheelCanvas"),
        registry,
        move |index: usize, _surface: &dyn Surface| -> Option<Box<dyn ItemView<u32>>> {
            Some(Box::new(RecordingView {
                index,
                shared: views.clone(),
            }))
        },
    );

    for i in 0..n {
        wheel.add(i as u32, false);
    }
    wheel.refresh();
    (wheel, shared)
}

fn front_item(shared: &Shared) -> usize {
    let stacking = &shared.borrow().stacking;
    (0..stacking.len())
        .max_by_key(|&i| stacking[i])
        .unwrap_or_default()
}

#[test]
fn test_refresh_lays_out_eight_items() {
    let (wheel, shared) = wheel_with(8);
    let geometry = wheel.model().geometry();

    let first = wheel.item(0).unwrap();
    assert_eq!(first.angle(), 0.0);
    assert_eq!(geometry.normalized_distance_to_center(first.angle()), 0.0);
    assert_eq!(first.range_status(), RangeStatus::InRange);

    let opposite = wheel.item(4).unwrap();
    assert!((geometry.normalized_distance_to_center(opposite.angle()) - 1.0).abs() < 1e-12);
    assert_eq!(opposite.range_status(), RangeStatus::OutRange);

    assert_eq!(*wheel.item(3).unwrap().data(), 3);
    assert_eq!(front_item(&shared), 0);
    let entered: Vec<Seen> = shared
        .borrow()
        .events
        .iter()
        .copied()
        .filter(|e| matches!(e, Seen::Enter(_)))
        .collect();
    assert_eq!(entered, vec![Seen::Enter(0)]);
    // the other seven start out of range
    assert_eq!(shared.borrow().events.len(), 8);
}

#[test]
fn test_snap_to_neighbour_takes_three_steps() {
    let (mut wheel, shared) = wheel_with(8);
    shared.borrow_mut().events.clear();
    let t0 = Instant::now();
    let interval = Duration::from_millis(1);

    wheel.snap_to_center_at(1, t0);
    // first step already applied: a third of the way from PI/4
    let angle = wheel.item(1).unwrap().angle();
    assert!((angle - PI / 6.0).abs() < 1e-12);

    assert_eq!(wheel.tick(t0 + interval / 2), TickOutcome::Waiting);
    assert_eq!(wheel.tick(t0 + interval), TickOutcome::Stepped);
    assert_eq!(wheel.tick(t0 + interval * 2), TickOutcome::Stepped);
    assert!(wheel.is_snapping());
    assert_eq!(
        wheel.tick(t0 + interval * 3),
        TickOutcome::Finished { index: 1 }
    );

    let item = wheel.item(1).unwrap();
    assert!(item.angle().abs() < 1e-9);
    assert!(item.is_selected());
    assert_eq!(item.range_status(), RangeStatus::InRange);
    assert_eq!(wheel.current_selected_index(), 1);
    assert_eq!(front_item(&shared), 1);

    let events = shared.borrow().events.clone();
    assert_eq!(
        events,
        vec![Seen::Leave(0), Seen::Enter(1), Seen::Selected(1)]
    );
    assert_eq!(wheel.tick(t0 + interval * 4), TickOutcome::Idle);
}

#[test]
fn test_restarted_snap_abandons_the_old_target() {
    let (mut wheel, shared) = wheel_with(8);
    let t0 = Instant::now();

    wheel.snap_to_center_at(4, t0);
    wheel.tick(t0 + Duration::from_millis(1));
    wheel.snap_to_center_at(2, t0 + Duration::from_millis(2));
    assert_eq!(wheel.snap_target(), Some(2));

    let mut t = t0 + Duration::from_millis(2);
    loop {
        t += Duration::from_millis(1);
        if let TickOutcome::Finished { index } = wheel.tick(t) {
            assert_eq!(index, 2);
            break;
        }
    }

    assert!(wheel.item(2).unwrap().angle().abs() < 1e-9);
    assert!(!wheel.item(4).unwrap().is_selected());
    let selections: Vec<Seen> = shared
        .borrow()
        .events
        .iter()
        .copied()
        .filter(|e| matches!(e, Seen::Selected(_)))
        .collect();
    assert_eq!(selections, vec![Seen::Selected(2)]);
}

#[test]
fn test_click_then_click_again_activates() {
    let (mut wheel, shared) = wheel_with(4);
    let t0 = Instant::now();

    wheel.click(3);
    assert_eq!(wheel.snap_target(), Some(3));
    let mut t = t0;
    while wheel.is_snapping() {
        t += Duration::from_millis(5);
        wheel.tick(t);
    }

    wheel.click(3);
    assert!(!wheel.is_snapping());
    assert_eq!(shared.borrow().events.last(), Some(&Seen::Activated(3)));
}

#[test]
fn test_release_needs_a_new_init() {
    let (mut wheel, _shared) = wheel_with(4);
    wheel.release();
    assert!(!wheel.is_initialized());
    assert!(wheel.model().pending().is_empty());

    // mutators initialize lazily
    wheel.add(7, true);
    assert!(wheel.is_initialized());
    assert_eq!(wheel.items().len(), 1);
    assert_eq!(*wheel.item(0).unwrap().data(), 7);
}
