//! Host-side capabilities the wheel needs: a drawable surface to live on and a
//! pointer to sample during drags.

use derive_more::{AsRef, Deref, Display, From, Into};
use rondelctl::geom::Point;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, DeserializeFromStr, EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FindMode {
    #[default]
    #[strum(serialize = "tag", serialize = "by-tag", serialize = "FindWithTag")]
    Tag,
    #[strum(serialize = "name", serialize = "by-name", serialize = "FindWithName")]
    Name,
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct SurfaceName(String);

rondelctl::impl_string_newtype!(SurfaceName);

/// Which surface the wheel attaches to on `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SurfaceQuery {
    #[serde(default)]
    pub find_mode: FindMode,
    pub name: SurfaceName,
}

impl SurfaceQuery {
    pub fn new(find_mode: FindMode, name: impl Into<String>) -> Self {
        Self {
            find_mode,
            name: SurfaceName::new(name),
        }
    }
}

/// The drawable the wheel's items are laid out on.
pub trait Surface {
    /// Maps a screen-space pointer sample into the wheel container's local space,
    /// whose origin is the wheel center.
    fn to_local(&self, screen: Point) -> Point;

    /// Inverse of `to_local`.
    fn to_screen(&self, local: Point) -> Point;
}

pub trait SurfaceLocator {
    fn locate(&self, query: &SurfaceQuery) -> Option<Box<dyn Surface>>;
}

pub trait PointerSource {
    /// Current pointer position in screen space.
    fn pointer_position(&self) -> Point;
}

impl PointerSource for Point {
    fn pointer_position(&self) -> Point {
        *self
    }
}

/// A screen-space overlay whose wheel container sits at `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlaySurface {
    pub origin: Point,
}

impl OverlaySurface {
    pub fn new(origin: Point) -> Self {
        Self { origin }
    }
}

impl Surface for OverlaySurface {
    fn to_local(&self, screen: Point) -> Point {
        screen - self.origin
    }

    fn to_screen(&self, local: Point) -> Point {
        local + self.origin
    }
}

/// Surfaces known to the host, addressable by name and optionally by tag.
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    by_name: HashMap<SurfaceName, OverlaySurface>,
    by_tag: HashMap<SurfaceName, OverlaySurface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: SurfaceName, tag: Option<SurfaceName>, surface: OverlaySurface) {
        if let Some(tag) = tag {
            // first registration wins, like a tag lookup returning the first match
            self.by_tag.entry(tag).or_insert(surface);
        }
        self.by_name.insert(name, surface);
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl SurfaceLocator for SurfaceRegistry {
    fn locate(&self, query: &SurfaceQuery) -> Option<Box<dyn Surface>> {
        let table = match query.find_mode {
            FindMode::Tag => &self.by_tag,
            FindMode::Name => &self.by_name,
        };
        table
            .get(&query.name)
            .map(|s| Box::new(*s) as Box<dyn Surface>)
    }
}
