use clap::{Parser, Subcommand};
use rondelctl::geom::{ItemLabel, Point};
use rondelctl::protocol::{Command, SOCKET_PATH};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "rondelctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Animate the item at INDEX into the center slot
    Snap { index: usize },
    /// Move the item at INDEX into the center slot without animation
    Jump { index: usize },
    /// Click the item at INDEX (activates it if selected, snaps it otherwise)
    Click { index: usize },
    /// Start a drag at the given pointer position
    DragBegin {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Move an ongoing drag to the given pointer position
    Drag {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Release the drag and settle on the nearest item
    DragEnd,
    /// Append an item
    Add {
        /// Label shown by the item
        #[arg(num_args = 1.., required = true)]
        label: Vec<String>,
        /// Rebuild the wheel right away
        #[arg(short, long)]
        refresh: bool,
    },
    /// Remove the item at INDEX
    Remove {
        index: usize,
        /// Rebuild the wheel right away
        #[arg(short, long)]
        refresh: bool,
    },
    /// Remove every item
    Clear,
    /// Rebuild the wheel from its pending items
    Refresh,
    /// Ask the daemon to log its current wheel state
    Status,
}

impl Commands {
    fn into_protocol(self) -> Vec<Command> {
        match self {
            Commands::Snap { index } => vec![Command::Snap(index)],
            Commands::Jump { index } => vec![Command::Jump(index)],
            Commands::Click { index } => vec![Command::Click(index)],
            Commands::DragBegin { x, y } => vec![Command::DragBegin(Point::new(x, y))],
            Commands::Drag { x, y } => vec![Command::Drag(Point::new(x, y))],
            Commands::DragEnd => vec![Command::DragEnd],
            Commands::Add { label, refresh } => {
                let mut cmds = vec![Command::Add(ItemLabel::new(label.join(" ")))];
                if refresh {
                    cmds.push(Command::Refresh);
                }
                cmds
            }
            Commands::Remove { index, refresh } => {
                let mut cmds = vec![Command::Remove(index)];
                if refresh {
                    cmds.push(Command::Refresh);
                }
                cmds
            }
            Commands::Clear => vec![Command::Clear],
            Commands::Refresh => vec![Command::Refresh],
            Commands::Status => vec![Command::Status],
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let commands = cli.command.into_protocol();
    send_commands(&commands)
}

fn send_commands(commands: &[Command]) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to rondel daemon at {}: {}. Is rondel running?",
            SOCKET_PATH,
            e
        )
    })?;

    for cmd in commands {
        log::debug!("sending '{}'", cmd);
        writeln!(stream, "{}", cmd)?;
    }
    Ok(())
}
