//! Pointer input and the plan viewport transform.
//!
//! Sessions see pointer positions in client pixels and convert deltas to
//! world meters through the [`Viewport`].

use serde::{Deserialize, Serialize};

use crate::constants::{GRID_SIZE, PIXELS_PER_METER, SNAP_TOLERANCE};
use crate::room::Point;

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    /// Add to the selection instead of replacing it.
    pub fn additive(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }

    /// Resize symmetrically about the room center.
    pub fn from_center(&self) -> bool {
        self.alt
    }

    /// Resize keeping the room's aspect ratio.
    pub fn keep_ratio(&self) -> bool {
        self.shift
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A pointer event in client (window) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
    #[serde(default)]
    pub button: PointerButton,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn at(client_x: f32, client_y: f32) -> Self {
        Self {
            client_x,
            client_y,
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Screen rectangle of the element hosting the plan, client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Pan/zoom state of the plan view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom_level: f32,
    /// Pan offset in pixels, applied after scaling.
    pub pan_x: f32,
    pub pan_y: f32,
    pub pixels_per_meter: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom_level: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            pixels_per_meter: PIXELS_PER_METER,
        }
    }
}

impl Viewport {
    pub fn scale(&self) -> f32 {
        self.pixels_per_meter * self.zoom_level
    }

    pub fn pixels_to_meters(&self, pixels: f32) -> f32 {
        pixels / self.scale()
    }

    /// Client-pixel position of a world point inside `rect`.
    pub fn world_to_screen(&self, world: Point, rect: &ScreenRect) -> (f32, f32) {
        (
            rect.left + self.pan_x + world.x * self.scale(),
            rect.top + self.pan_y + world.z * self.scale(),
        )
    }

    /// Inverse of [`Viewport::world_to_screen`].
    pub fn screen_to_world(&self, client_x: f32, client_y: f32, rect: &ScreenRect) -> Point {
        Point::new(
            (client_x - rect.left - self.pan_x) / self.scale(),
            (client_y - rect.top - self.pan_y) / self.scale(),
        )
    }
}

/// Settings shared by the transform sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSettings {
    pub grid_snap: bool,
    pub grid_size: f32,
    pub snap_tolerance: f32,
    pub viewport: Viewport,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            grid_snap: false,
            grid_size: GRID_SIZE,
            snap_tolerance: SNAP_TOLERANCE,
            viewport: Viewport::default(),
        }
    }
}
