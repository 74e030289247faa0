//! Line-based control protocol spoken over the daemon's unix socket.
//!
//! One command per line, verb first, arguments separated by whitespace:
//! `snap 3`, `drag-begin 10 -42.5`, `add Some Label`.

use crate::geom::{ItemLabel, Point};
use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/rondel.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
enum Verb {
    Snap,
    Jump,
    Click,
    DragBegin,
    Drag,
    DragEnd,
    Add,
    Remove,
    Clear,
    Refresh,
    Status,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Snap(usize),
    Jump(usize),
    Click(usize),
    DragBegin(Point),
    Drag(Point),
    DragEnd,
    Add(ItemLabel),
    Remove(usize),
    Clear,
    Refresh,
    Status,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownVerb(String),
    #[error("'{verb}' expects {expected}")]
    MissingArgument {
        verb: &'static str,
        expected: &'static str,
    },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map(|(h, r)| (h, r.trim()))
            .unwrap_or((line, ""));

        if head.is_empty() {
            return Err(ParseError::Empty);
        }

        let verb =
            Verb::from_str(head).map_err(|_| ParseError::UnknownVerb(head.to_string()))?;
        let mut args = rest.split_whitespace();

        let command = match verb {
            Verb::Snap => Command::Snap(index_arg(&mut args, "snap")?),
            Verb::Jump => Command::Jump(index_arg(&mut args, "jump")?),
            Verb::Click => Command::Click(index_arg(&mut args, "click")?),
            Verb::Remove => Command::Remove(index_arg(&mut args, "remove")?),
            Verb::DragBegin => Command::DragBegin(point_arg(&mut args, "drag-begin")?),
            Verb::Drag => Command::Drag(point_arg(&mut args, "drag")?),
            Verb::DragEnd => Command::DragEnd,
            Verb::Clear => Command::Clear,
            Verb::Refresh => Command::Refresh,
            Verb::Status => Command::Status,
            // labels may contain spaces, so take the rest of the line verbatim
            Verb::Add => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument {
                        verb: "add",
                        expected: "a label",
                    });
                }
                return Ok(Command::Add(ItemLabel::new(rest)));
            }
        };

        match args.next() {
            Some(extra) => Err(ParseError::Trailing(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn index_arg<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    verb: &'static str,
) -> Result<usize, ParseError> {
    let raw = args.next().ok_or(ParseError::MissingArgument {
        verb,
        expected: "an item index",
    })?;
    raw.parse()
        .map_err(|_| ParseError::InvalidNumber(raw.to_string()))
}

fn point_arg<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    verb: &'static str,
) -> Result<Point, ParseError> {
    let mut coord = || -> Result<f64, ParseError> {
        let raw = args.next().ok_or(ParseError::MissingArgument {
            verb,
            expected: "pointer coordinates X Y",
        })?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber(raw.to_string()))
    };
    let x = coord()?;
    let y = coord()?;
    Ok(Point::new(x, y))
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Snap(i) => write!(f, "{} {}", Verb::Snap, i),
            Command::Jump(i) => write!(f, "{} {}", Verb::Jump, i),
            Command::Click(i) => write!(f, "{} {}", Verb::Click, i),
            Command::Remove(i) => write!(f, "{} {}", Verb::Remove, i),
            Command::DragBegin(p) => write!(f, "{} {} {}", Verb::DragBegin, p.x, p.y),
            Command::Drag(p) => write!(f, "{} {} {}", Verb::Drag, p.x, p.y),
            Command::DragEnd => write!(f, "{}", Verb::DragEnd),
            Command::Add(label) => write!(f, "{} {}", Verb::Add, label),
            Command::Clear => write!(f, "{}", Verb::Clear),
            Command::Refresh => write!(f, "{}", Verb::Refresh),
            Command::Status => write!(f, "{}", Verb::Status),
        }
    }
}
