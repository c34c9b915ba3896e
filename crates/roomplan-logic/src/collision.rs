//! Axis-aligned overlap tests between rooms.
//!
//! Strict inequalities: rooms that only touch along an edge do not overlap.

use std::collections::HashSet;

use crate::geometry::room_bounds;
use crate::room::{Room, RoomId};

/// True if the rotation-aware bounds of `a` and `b` intersect.
pub fn rooms_overlap(a: &Room, b: &Room) -> bool {
    let a = room_bounds(a);
    let b = room_bounds(b);
    a.min_x < b.max_x && a.max_x > b.min_x && a.min_z < b.max_z && a.max_z > b.min_z
}

/// Every overlapping pair, as `(earlier, later)` in slice order.
pub fn overlapping_pairs(rooms: &[Room]) -> Vec<(RoomId, RoomId)> {
    let mut pairs = Vec::new();
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            if rooms_overlap(&rooms[i], &rooms[j]) {
                pairs.push((rooms[i].id, rooms[j].id));
            }
        }
    }
    pairs
}

/// Rooms to highlight after moving `moved`: each moved room that overlaps
/// any other room, plus the room it overlaps.
pub fn rooms_overlapping(moved: &[RoomId], rooms: &[Room]) -> HashSet<RoomId> {
    let mut hits = HashSet::new();
    for a in rooms.iter().filter(|r| moved.contains(&r.id)) {
        for b in rooms.iter().filter(|r| r.id != a.id) {
            if rooms_overlap(a, b) {
                hits.insert(a.id);
                hits.insert(b.id);
            }
        }
    }
    hits
}
