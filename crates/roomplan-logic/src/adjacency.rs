//! Shared-wall detection between rooms.
//!
//! Two rooms are adjacent when one wall of each is axis-aligned, colinear
//! within [`ADJACENCY_TOLERANCE`] and the two walls overlap over a positive
//! length. Wall pairs are scanned in fixed north/east/south/west order and
//! the first match wins, even if a later pair shares a longer run.

use serde::{Deserialize, Serialize};

use crate::constants::ADJACENCY_TOLERANCE;
use crate::geometry::{point_on_wall, room_wall_segments, WallSegment};
use crate::room::{Point, Room, RoomConnection, RoomId, WallSide};

/// A shared wall run, measured along room 1's wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharedWall {
    pub room1_wall: WallSide,
    pub room2_wall: WallSide,
    pub length: f32,
    /// Fraction along room 1's wall (`from → to`) where the overlap begins.
    /// Not normalized: exceeds `end_position` when the wall runs toward
    /// decreasing world coordinates.
    pub start_position: f32,
    pub end_position: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Orientation {
    /// Constant x, varies along z.
    Vertical,
    /// Constant z, varies along x.
    Horizontal,
}

fn orientation(seg: &WallSegment) -> Option<Orientation> {
    if seg.from.x == seg.to.x {
        Some(Orientation::Vertical)
    } else if seg.from.z == seg.to.z {
        Some(Orientation::Horizontal)
    } else {
        None
    }
}

/// (fixed coordinate, varying start, varying end)
fn axis_values(seg: &WallSegment, o: Orientation) -> (f32, f32, f32) {
    match o {
        Orientation::Vertical => (seg.from.x, seg.from.z, seg.to.z),
        Orientation::Horizontal => (seg.from.z, seg.from.x, seg.to.x),
    }
}

/// Match a single pair of walls.
pub fn match_walls(wall_a: &WallSegment, wall_b: &WallSegment) -> Option<SharedWall> {
    let oa = orientation(wall_a)?;
    let ob = orientation(wall_b)?;
    if oa != ob {
        return None;
    }

    let (fixed_a, a0, a1) = axis_values(wall_a, oa);
    let (fixed_b, b0, b1) = axis_values(wall_b, ob);
    // One epsilon step at this magnitude keeps the tolerance inclusive far
    // from the origin, where f32 spacing is coarser
    let slack = f32::EPSILON * fixed_a.abs().max(fixed_b.abs()).max(1.0);
    if (fixed_a - fixed_b).abs() > ADJACENCY_TOLERANCE + slack {
        return None;
    }

    let overlap_start = a0.min(a1).max(b0.min(b1));
    let overlap_end = a0.max(a1).min(b0.max(b1));
    let length = overlap_end - overlap_start;
    if length <= 0.0 {
        return None;
    }

    let span = a1 - a0;
    if span == 0.0 {
        return None;
    }

    Some(SharedWall {
        room1_wall: wall_a.wall_side,
        room2_wall: wall_b.wall_side,
        length,
        start_position: (overlap_start - a0) / span,
        end_position: (overlap_end - a0) / span,
    })
}

/// First shared wall between two wall sets, in enumeration order.
///
/// Any diagonal segment disqualifies the pair outright.
pub fn detect_wall_adjacency(
    walls_a: &[WallSegment],
    walls_b: &[WallSegment],
) -> Option<SharedWall> {
    if walls_a.iter().chain(walls_b).any(|w| orientation(w).is_none()) {
        return None;
    }
    walls_a
        .iter()
        .flat_map(|wa| walls_b.iter().map(move |wb| (wa, wb)))
        .find_map(|(wa, wb)| match_walls(wa, wb))
}

pub fn detect_adjacency(room_a: &Room, room_b: &Room) -> Option<SharedWall> {
    detect_wall_adjacency(&room_wall_segments(room_a), &room_wall_segments(room_b))
}

fn auto_connection_id(a: RoomId, b: RoomId) -> String {
    format!("auto-{}-{}", a, b)
}

/// Build an automatic connection record from a detection result.
pub fn connection_from_shared_wall(a: &Room, b: &Room, wall: &SharedWall) -> RoomConnection {
    RoomConnection {
        id: auto_connection_id(a.id, b.id),
        room1_id: a.id,
        room2_id: b.id,
        room1_wall: Some(wall.room1_wall),
        room2_wall: Some(wall.room2_wall),
        shared_wall_length: Some(wall.length),
        overlap_start: Some(wall.start_position),
        overlap_end: Some(wall.end_position),
        doors: Vec::new(),
        is_manual: false,
    }
}

/// Recompute automatic connections for the whole plan.
///
/// Manual connections are kept untouched and suppress an automatic one for
/// the same pair. An automatic connection that still holds keeps its id and
/// doors; one whose rooms no longer share a wall is dropped.
pub fn refresh_connections(rooms: &[Room], existing: &[RoomConnection]) -> Vec<RoomConnection> {
    let mut out: Vec<RoomConnection> = existing.iter().filter(|c| c.is_manual).cloned().collect();

    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            let (a, b) = (&rooms[i], &rooms[j]);
            let pair = if a.id <= b.id { (a.id, b.id) } else { (b.id, a.id) };
            if out.iter().any(|c| c.is_manual && c.pair() == pair) {
                continue;
            }
            let Some(wall) = detect_adjacency(a, b) else {
                continue;
            };
            let mut conn = connection_from_shared_wall(a, b, &wall);
            if let Some(prev) = existing
                .iter()
                .find(|c| !c.is_manual && c.pair() == pair)
            {
                conn.id = prev.id.clone();
                conn.doors = prev.doors.clone();
            }
            out.push(conn);
        }
    }

    let auto = out.iter().filter(|c| !c.is_manual).count();
    log::debug!(
        "Refreshed connections: {} automatic, {} manual",
        auto,
        out.len() - auto
    );
    out
}

/// World point in the middle of a connection's shared run, for door placement.
///
/// `room1` must be the connection's first room; manual connections carry no
/// wall and yield `None`.
pub fn door_position(room1: &Room, connection: &RoomConnection) -> Option<Point> {
    if room1.id != connection.room1_id {
        return None;
    }
    let side = connection.room1_wall?;
    let start = connection.overlap_start?;
    let end = connection.overlap_end?;
    Some(point_on_wall(room1, side, (start + end) / 2.0))
}
