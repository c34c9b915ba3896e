//! Room data model: rooms, discrete rotations, wall sides, connections.
//!
//! Plain data with serde derives. Geometry derived from a room (bounds,
//! corners, walls) lives in [`crate::geometry`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{clamp_dimension, clamp_height, defaults};

pub type RoomId = u32;
pub type DoorId = u64;

/// A point in world (or local) plan coordinates, meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub z: f32,
}

impl Point {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn offset(self, dx: f32, dz: f32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    pub fn distance(self, other: Point) -> f32 {
        ((other.x - self.x).powi(2) + (other.z - self.z).powi(2)).sqrt()
    }
}

/// One of the four allowed room orientations.
///
/// Stored and serialized as integer degrees. Anything other than
/// 0/90/180/270 is rejected when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rotation must be one of 0, 90, 180, 270 (got {0})")]
pub struct InvalidRotation(pub u16);

/// Direction for discrete 90° rotation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    #[serde(rename = "cw")]
    Clockwise,
    #[serde(rename = "ccw")]
    CounterClockwise,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// True for 90/270, where the room's length runs along world z.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Step 90° in the given direction, wrapping modulo 360.
    pub fn rotated(self, direction: RotationDirection) -> Self {
        let step = match direction {
            RotationDirection::Clockwise => 90,
            RotationDirection::CounterClockwise => 270,
        };
        // (d + step) % 360 is always a multiple of 90
        Rotation::from_degrees((self.degrees() + step) % 360).unwrap_or_default()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Rotation::from_degrees(value).ok_or(InvalidRotation(value))
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> u16 {
        r.degrees()
    }
}

/// Descriptive room category. Has no effect on geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Bedroom,
    Bathroom,
    Kitchen,
    LivingRoom,
    DiningRoom,
    Office,
    Hallway,
    Closet,
    Storage,
    Garage,
    #[default]
    Other,
}

/// Canonical edge label in the room's unrotated corner order.
///
/// Positional only: north is always the edge from the first to the second
/// corner, regardless of the room's current rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    North,
    East,
    South,
    West,
}

impl WallSide {
    /// Fixed clockwise order used for wall enumeration.
    pub const ALL: [WallSide; 4] = [
        WallSide::North,
        WallSide::East,
        WallSide::South,
        WallSide::West,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WallSide::North => "north",
            WallSide::East => "east",
            WallSide::South => "south",
            WallSide::West => "west",
        }
    }
}

impl std::fmt::Display for WallSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rectangular room on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(default)]
    pub room_type: RoomType,
    /// World position of the footprint's minimum corner, after rotation.
    pub position: Point,
    /// Extent along local x.
    pub length: f32,
    /// Extent along local z.
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub rotation: Rotation,
}

impl Room {
    /// A room with default dimensions at `position`.
    pub fn new(id: RoomId, name: impl Into<String>, position: Point) -> Self {
        Self {
            id,
            name: name.into(),
            room_type: RoomType::Other,
            position,
            length: defaults::ROOM_LENGTH,
            width: defaults::ROOM_WIDTH,
            height: defaults::ROOM_HEIGHT,
            rotation: Rotation::Deg0,
        }
    }

    pub fn with_size(mut self, length: f32, width: f32) -> Self {
        self.length = clamp_dimension(length);
        self.width = clamp_dimension(width);
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_type(mut self, room_type: RoomType) -> Self {
        self.room_type = room_type;
        self
    }

    /// Apply a partial update. Dimensions and height are clamped to their
    /// hard limits so the stored room always satisfies the data invariants.
    pub fn apply_patch(&mut self, patch: &RoomPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(room_type) = patch.room_type {
            self.room_type = room_type;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(length) = patch.length {
            self.length = clamp_dimension(length);
        }
        if let Some(width) = patch.width {
            self.width = clamp_dimension(width);
        }
        if let Some(height) = patch.height {
            self.height = clamp_height(height);
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
    }
}

/// Partial room update proposed by a session or a property edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub room_type: Option<RoomType>,
    pub position: Option<Point>,
    pub length: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub rotation: Option<Rotation>,
}

impl RoomPatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn rotation(rotation: Rotation) -> Self {
        Self {
            rotation: Some(rotation),
            ..Self::default()
        }
    }

    /// Length, width and position together (one resize tick).
    pub fn footprint(length: f32, width: f32, position: Point) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            position: Some(position),
            ..Self::default()
        }
    }
}

/// A link between two rooms, automatic (shared wall) or manual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConnection {
    pub id: String,
    pub room1_id: RoomId,
    pub room2_id: RoomId,
    pub room1_wall: Option<WallSide>,
    pub room2_wall: Option<WallSide>,
    pub shared_wall_length: Option<f32>,
    /// Overlap start as a fraction along room1's wall.
    pub overlap_start: Option<f32>,
    /// Overlap end as a fraction along room1's wall.
    pub overlap_end: Option<f32>,
    #[serde(default)]
    pub doors: Vec<DoorId>,
    #[serde(default)]
    pub is_manual: bool,
}

impl RoomConnection {
    /// A user-made link with no geometric guarantee.
    pub fn manual(room1_id: RoomId, room2_id: RoomId) -> Self {
        Self {
            id: format!("manual-{}-{}", room1_id, room2_id),
            room1_id,
            room2_id,
            room1_wall: None,
            room2_wall: None,
            shared_wall_length: None,
            overlap_start: None,
            overlap_end: None,
            doors: Vec::new(),
            is_manual: true,
        }
    }

    pub fn involves(&self, room_id: RoomId) -> bool {
        self.room1_id == room_id || self.room2_id == room_id
    }

    /// Unordered pair key.
    pub fn pair(&self) -> (RoomId, RoomId) {
        if self.room1_id <= self.room2_id {
            (self.room1_id, self.room2_id)
        } else {
            (self.room2_id, self.room1_id)
        }
    }
}
