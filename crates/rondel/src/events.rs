use rondelctl::protocol::Command;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(Command),
    ConfigReload,
    Shutdown,
}
