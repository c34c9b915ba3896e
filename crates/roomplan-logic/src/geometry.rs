//! Geometry primitives over a single room.
//!
//! Pure functions: center, rotation-aware bounds, corners, wall segments and
//! local↔world conversion. The rotated footprint always has its minimum
//! corner at `room.position`; rotation only decides which extent runs along
//! which world axis.

use serde::{Deserialize, Serialize};

use crate::room::{Point, Room, Rotation, WallSide};

/// Axis-aligned bounds of a room in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl BoundingBox {
    pub fn width_x(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth_z(&self) -> f32 {
        self.max_z - self.min_z
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.z >= self.min_z && p.z <= self.max_z
    }
}

/// One edge of a room, labelled with its positional side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub id: String,
    pub from: Point,
    pub to: Point,
    pub wall_side: WallSide,
}

impl WallSegment {
    pub fn new(id: impl Into<String>, from: Point, to: Point, wall_side: WallSide) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            wall_side,
        }
    }

    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// Point at fraction `t` from `from` to `to`.
    pub fn lerp(&self, t: f32) -> Point {
        Point::new(
            self.from.x + t * (self.to.x - self.from.x),
            self.from.z + t * (self.to.z - self.from.z),
        )
    }
}

/// Length/width as they lie along world x/z for the room's rotation.
pub fn effective_extents(room: &Room) -> (f32, f32) {
    if room.rotation.swaps_axes() {
        (room.width, room.length)
    } else {
        (room.length, room.width)
    }
}

pub fn room_center(room: &Room) -> Point {
    let p = room.position;
    match room.rotation {
        Rotation::Deg0 | Rotation::Deg180 => {
            Point::new(p.x + room.length / 2.0, p.z + room.width / 2.0)
        }
        Rotation::Deg90 | Rotation::Deg270 => {
            Point::new(p.x + room.width / 2.0, p.z + room.length / 2.0)
        }
    }
}

pub fn room_bounds(room: &Room) -> BoundingBox {
    let (ex, ez) = effective_extents(room);
    BoundingBox {
        min_x: room.position.x,
        max_x: room.position.x + ex,
        min_z: room.position.z,
        max_z: room.position.z + ez,
    }
}

/// Corners clockwise from `(min_x, min_z)`: TL, TR, BR, BL.
pub fn room_corners(room: &Room) -> [Point; 4] {
    let b = room_bounds(room);
    [
        Point::new(b.min_x, b.min_z),
        Point::new(b.max_x, b.min_z),
        Point::new(b.max_x, b.max_z),
        Point::new(b.min_x, b.max_z),
    ]
}

/// The four walls in north, east, south, west order.
pub fn room_wall_segments(room: &Room) -> [WallSegment; 4] {
    let c = room_corners(room);
    let seg = |i: usize| {
        let side = WallSide::ALL[i];
        WallSegment::new(
            format!("{}-{}", room.id, side),
            c[i],
            c[(i + 1) % 4],
            side,
        )
    };
    [seg(0), seg(1), seg(2), seg(3)]
}

pub fn wall_segment(room: &Room, side: WallSide) -> WallSegment {
    let [n, e, s, w] = room_wall_segments(room);
    match side {
        WallSide::North => n,
        WallSide::East => e,
        WallSide::South => s,
        WallSide::West => w,
    }
}

/// World point at fraction `t` along the given wall.
pub fn point_on_wall(room: &Room, side: WallSide, t: f32) -> Point {
    wall_segment(room, side).lerp(t)
}

/// Convert a point in the room's unrotated local frame to world space.
///
/// Rotation is clockwise on screen (+z down). The result is translated so
/// the rotated footprint starts at `room.position`.
pub fn local_to_world(room: &Room, local: Point) -> Point {
    let (l, w) = (room.length, room.width);
    let (rx, rz) = match room.rotation {
        Rotation::Deg0 => (local.x, local.z),
        Rotation::Deg90 => (w - local.z, local.x),
        Rotation::Deg180 => (l - local.x, w - local.z),
        Rotation::Deg270 => (local.z, l - local.x),
    };
    room.position.offset(rx, rz)
}

/// Inverse of [`local_to_world`].
pub fn world_to_local(room: &Room, world: Point) -> Point {
    let (l, w) = (room.length, room.width);
    let rx = world.x - room.position.x;
    let rz = world.z - room.position.z;
    match room.rotation {
        Rotation::Deg0 => Point::new(rx, rz),
        Rotation::Deg90 => Point::new(rz, w - rx),
        Rotation::Deg180 => Point::new(l - rx, w - rz),
        Rotation::Deg270 => Point::new(l - rz, rx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(x: f32, z: f32, l: f32, w: f32, rot: Rotation) -> Room {
        Room::new(1, "Test", Point::new(x, z))
            .with_size(l, w)
            .with_rotation(rot)
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.z - b.z).abs() < 1e-4
    }

    #[test]
    fn bounds_unrotated() {
        for rot in [Rotation::Deg0, Rotation::Deg180] {
            let b = room_bounds(&room(1.0, 2.0, 5.0, 3.0, rot));
            assert_eq!(b.min_x, 1.0);
            assert_eq!(b.max_x, 6.0);
            assert_eq!(b.min_z, 2.0);
            assert_eq!(b.max_z, 5.0);
        }
    }

    #[test]
    fn bounds_quarter_turn_swaps_extents() {
        for rot in [Rotation::Deg90, Rotation::Deg270] {
            let b = room_bounds(&room(1.0, 2.0, 5.0, 3.0, rot));
            assert_eq!(b.max_x, 4.0);
            assert_eq!(b.max_z, 7.0);
        }
    }

    #[test]
    fn center_matches_bounds_center() {
        for rot in Rotation::ALL {
            let r = room(-2.0, 3.0, 6.0, 2.0, rot);
            assert!(close(room_center(&r), room_bounds(&r).center()), "{rot:?}");
        }
    }

    #[test]
    fn corners_clockwise_from_min() {
        let c = room_corners(&room(0.0, 0.0, 4.0, 3.0, Rotation::Deg0));
        assert_eq!(c[0], Point::new(0.0, 0.0));
        assert_eq!(c[1], Point::new(4.0, 0.0));
        assert_eq!(c[2], Point::new(4.0, 3.0));
        assert_eq!(c[3], Point::new(0.0, 3.0));
    }

    #[test]
    fn wall_labels_are_positional_not_rotated() {
        let r = room(0.0, 0.0, 4.0, 3.0, Rotation::Deg90);
        let walls = room_wall_segments(&r);
        // North is always the min-z edge, even after a quarter turn
        assert_eq!(walls[0].wall_side, WallSide::North);
        assert_eq!(walls[0].from, Point::new(0.0, 0.0));
        assert_eq!(walls[0].to, Point::new(3.0, 0.0));
        assert_eq!(walls[1].wall_side, WallSide::East);
        assert_eq!(walls[3].wall_side, WallSide::West);
        assert_eq!(walls[3].to, Point::new(0.0, 0.0));
        assert_eq!(walls[2].id, "1-south");
    }

    #[test]
    fn local_origin_lands_on_expected_corner() {
        let base = (2.0, 1.0, 4.0, 3.0);
        let cases = [
            (Rotation::Deg0, Point::new(2.0, 1.0)),
            (Rotation::Deg90, Point::new(5.0, 1.0)),
            (Rotation::Deg180, Point::new(6.0, 4.0)),
            (Rotation::Deg270, Point::new(2.0, 5.0)),
        ];
        for (rot, expected) in cases {
            let r = room(base.0, base.1, base.2, base.3, rot);
            let w = local_to_world(&r, Point::new(0.0, 0.0));
            assert!(close(w, expected), "{rot:?}: got {w:?}");
            assert!(room_bounds(&r).contains(w));
        }
    }

    #[test]
    fn local_world_roundtrip() {
        let p = Point::new(1.25, 0.5);
        for rot in Rotation::ALL {
            let r = room(3.0, -1.0, 4.0, 3.0, rot);
            let back = world_to_local(&r, local_to_world(&r, p));
            assert!(close(back, p), "{rot:?}: got {back:?}");
        }
    }

    #[test]
    fn local_footprint_stays_inside_bounds() {
        for rot in Rotation::ALL {
            let r = room(0.0, 0.0, 5.0, 2.0, rot);
            let b = room_bounds(&r);
            for corner in [
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                Point::new(5.0, 2.0),
                Point::new(0.0, 2.0),
            ] {
                assert!(b.contains(local_to_world(&r, corner)), "{rot:?}");
            }
        }
    }

    #[test]
    fn point_on_wall_interpolates() {
        let r = room(0.0, 0.0, 4.0, 3.0, Rotation::Deg0);
        assert_eq!(point_on_wall(&r, WallSide::North, 0.5), Point::new(2.0, 0.0));
        assert_eq!(point_on_wall(&r, WallSide::East, 1.0), Point::new(4.0, 3.0));
        assert_eq!(point_on_wall(&r, WallSide::South, 0.25), Point::new(3.0, 3.0));
    }
}
