use std::time::Duration;

pub mod angle;
pub mod controller;
pub mod drag;
pub mod error;
pub mod item;
pub mod model;
pub mod settings;
pub mod snap;
pub mod surface;

pub use controller::{TickOutcome, WheelController};
pub use error::WheelError;
pub use item::{ClickOutcome, Item, ItemHooks, ItemView, RangeStatus, SelectStatus, ViewFactory};
pub use model::{Geometry, Transform, WheelModel};
pub use settings::WheelSettings;
pub use surface::{
    FindMode, OverlaySurface, PointerSource, Surface, SurfaceLocator, SurfaceName, SurfaceQuery,
    SurfaceRegistry,
};

pub const MIN_SNAP_STEPS: usize = 3;
pub const MAX_SNAP_STEPS: usize = 10;
pub const BASE_SNAP_INTERVAL: Duration = Duration::from_millis(1); // at snap_speed 1.0
pub const DRAG_DIVISOR: f64 = 500.0; // pointer units per radian at drag_speed 1.0
pub const REDUCTION_FACTOR: f64 = 20.0;
