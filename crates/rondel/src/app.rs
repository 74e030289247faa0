use crate::config::{self, CanvasConfig, Config};
use crate::events::AppEvent;
use crate::view::LabelViewFactory;
use crate::wheel::{SurfaceQuery, TickOutcome, WheelController};
use async_channel::Receiver;
use rondelctl::geom::ItemLabel;
use rondelctl::protocol::Command;
use std::ops::ControlFlow;
use std::time::Instant;

/// Owns the wheel on the main thread and feeds it events and snap ticks.
pub struct App {
    wheel: WheelController<ItemLabel>,
    surface: SurfaceQuery,
    canvases: Vec<CanvasConfig>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut app = Self {
            wheel: Self::build_wheel(config),
            surface: config.surface.clone(),
            canvases: config.canvases.clone(),
        };
        app.load_items(&config.items);
        app
    }

    fn build_wheel(config: &Config) -> WheelController<ItemLabel> {
        let mut wheel = WheelController::new(
            config.wheel,
            config.surface.clone(),
            config.surfaces(),
            LabelViewFactory,
        );
        if !wheel.init() {
            log::error!("Wheel disabled until the surface configuration is fixed");
        }
        wheel
    }

    fn load_items(&mut self, labels: &[ItemLabel]) {
        if !self.wheel.is_initialized() {
            return;
        }
        self.wheel.clear();
        for label in labels {
            self.wheel.add(label.clone(), false);
        }
        self.wheel.refresh();
        if !labels.is_empty() {
            let index = self.wheel.current_selected_index().min(labels.len() - 1);
            self.wheel.jump_to_center(index);
        }
    }

    pub fn wheel(&self) -> &WheelController<ItemLabel> {
        &self.wheel
    }

    pub fn handle(&mut self, event: AppEvent) -> ControlFlow<()> {
        match event {
            AppEvent::Command(cmd) => self.handle_command(cmd),
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.reload(&new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn handle_command(&mut self, cmd: Command) {
        log::debug!("command: {}", cmd);
        match cmd {
            Command::Snap(i) => self.wheel.snap_to_center(i),
            Command::Jump(i) => self.wheel.jump_to_center(i),
            Command::Click(i) => self.wheel.click(i),
            Command::DragBegin(p) => self.wheel.begin_drag(&p),
            Command::Drag(p) => self.wheel.drag(&p),
            Command::DragEnd => self.wheel.end_drag(),
            Command::Add(label) => self.wheel.add(label, false),
            Command::Remove(i) => self.wheel.remove(i, false),
            Command::Clear => self.wheel.clear(),
            Command::Refresh => self.wheel.refresh(),
            Command::Status => self.log_status(),
        }
    }

    /// Applies a freshly loaded config, then re-centers the current selection.
    pub fn reload(&mut self, config: &Config) {
        if config.surface != self.surface || config.canvases != self.canvases {
            self.wheel.release();
            self.wheel = Self::build_wheel(config);
            self.surface = config.surface.clone();
            self.canvases = config.canvases.clone();
            self.load_items(&config.items);
            return;
        }

        self.wheel.apply_settings(config.wheel);
        if !self.holds(&config.items) {
            self.load_items(&config.items);
        } else if !self.wheel.items().is_empty() {
            let index = self
                .wheel
                .current_selected_index()
                .min(self.wheel.items().len() - 1);
            self.wheel.jump_to_center(index);
        }
    }

    /// Whether the wheel's pending data is exactly `labels`, in order.
    fn holds(&self, labels: &[ItemLabel]) -> bool {
        let pending = self.wheel.model().pending();
        pending.len() == labels.len() && pending.iter().zip(labels).all(|(p, l)| **p == *l)
    }

    fn log_status(&self) {
        let wheel = &self.wheel;
        log::info!(
            "wheel: initialized={} items={} selected={} snapping={}",
            wheel.is_initialized(),
            wheel.items().len(),
            wheel.current_selected_index(),
            wheel.is_snapping()
        );
        let geometry = wheel.model().geometry();
        for item in wheel.items() {
            log::info!(
                "  [{}] {:<16} angle={:+.3} distance={:.3} {} {}",
                item.index(),
                item.data(),
                item.angle(),
                geometry.normalized_distance_to_center(item.angle()),
                item.range_status(),
                item.select_status()
            );
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let TickOutcome::Finished { index } = self.wheel.tick(now)
            && let Some(item) = self.wheel.item(index)
        {
            log::info!("Settled on '{}'", item.data());
        }
    }

    pub async fn run(mut self, rx: Receiver<AppEvent>) {
        loop {
            let wakeup = self.wheel.next_wakeup();
            tokio::select! {
                event = rx.recv() => match event {
                    Ok(event) => {
                        if self.handle(event).is_break() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                _ = sleep_until(wakeup) => self.tick(Instant::now()),
            }
        }
        self.wheel.release();
        log::info!("Shutting down");
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(d) => tokio::time::sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rondelctl::geom::Point;
    use std::rc::Rc;
    use std::time::Duration;

    fn settle(app: &mut App) {
        let mut t = Instant::now();
        while app.wheel().is_snapping() {
            t += Duration::from_millis(50);
            app.tick(t);
        }
    }

    #[test]
    fn test_startup_centers_first_item() {
        let app = App::new(&Config::default());
        assert_eq!(app.wheel().items().len(), 4);
        assert!(app.wheel().item(0).unwrap().is_selected());
    }

    #[test]
    fn test_commands_drive_the_wheel() {
        let mut app = App::new(&Config::default());

        let _ = app.handle(AppEvent::Command(Command::Click(2)));
        settle(&mut app);
        assert_eq!(app.wheel().current_selected_index(), 2);

        let _ = app.handle(AppEvent::Command(Command::DragBegin(Point::new(0.0, 100.0))));
        let _ = app.handle(AppEvent::Command(Command::Drag(Point::new(-200.0, 100.0))));
        let _ = app.handle(AppEvent::Command(Command::DragEnd));
        settle(&mut app);
        // 200 px at drag speed 1 is 0.4 rad, so item 2 is still nearest
        assert_eq!(app.wheel().current_selected_index(), 2);

        let _ = app.handle(AppEvent::Command(Command::Add(ItemLabel::new("Extra"))));
        let _ = app.handle(AppEvent::Command(Command::Refresh));
        assert_eq!(app.wheel().items().len(), 5);
    }

    #[test]
    fn test_reload_rebuilds_on_new_items() {
        let mut app = App::new(&Config::default());
        let config = Config {
            items: vec![ItemLabel::new("One"), ItemLabel::new("Two")],
            ..Config::default()
        };

        app.reload(&config);

        assert_eq!(app.wheel().items().len(), 2);
        assert!(app.wheel().item(0).unwrap().is_selected());
    }

    #[test]
    fn test_item_list_follows_what_the_wheel_accepted() {
        let config = Config::default();
        let mut app = App::new(&config);

        let _ = app.handle(AppEvent::Command(Command::Remove(9)));
        assert!(app.holds(&config.items));

        app.wheel.release();
        let _ = app.handle(AppEvent::Command(Command::Remove(1)));
        assert!(app.holds(&[]));

        let _ = app.handle(AppEvent::Command(Command::Add(ItemLabel::new("Extra"))));
        assert!(app.holds(&[ItemLabel::new("Extra")]));
    }

    #[test]
    fn test_reload_with_unchanged_items_keeps_pending_data() {
        let config = Config::default();
        let mut app = App::new(&config);
        let before: Vec<_> = app.wheel().model().pending().to_vec();

        app.reload(&config);

        let after = app.wheel().model().pending();
        assert_eq!(before.len(), after.len());
        // no rebuild: the same shared data is still in place
        assert!(before.iter().zip(after).all(|(a, b)| Rc::ptr_eq(a, b)));
    }

    #[test]
    fn test_shutdown_breaks_the_loop() {
        let mut app = App::new(&Config::default());
        assert!(app.handle(AppEvent::Shutdown).is_break());
    }
}
