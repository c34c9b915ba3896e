//! Alignment snapping for dragged rooms.
//!
//! Each axis is solved on its own. Candidates come from every static room
//! in the order given: its min edge, max edge and center. The moving room
//! offers the same three values. Iteration is static room → moving value →
//! candidate, and the first pair within tolerance wins for that axis.

use serde::{Deserialize, Serialize};

use crate::geometry::{room_bounds, BoundingBox};
use crate::room::{Point, Room};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    /// Line of constant x.
    Vertical,
    /// Line of constant z.
    Horizontal,
}

/// An alignment line to draw while dragging. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    pub orientation: GuideOrientation,
    /// The constant coordinate of the line.
    pub offset: f32,
    pub start: f32,
    pub end: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapResult {
    pub position: Point,
    pub guides: Vec<SnapGuide>,
}

/// Round to the nearest multiple of `grid_size`.
pub fn snap_to_grid(value: f32, grid_size: f32) -> f32 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

fn x_values(b: &BoundingBox) -> [f32; 3] {
    [b.min_x, b.max_x, (b.min_x + b.max_x) / 2.0]
}

fn z_values(b: &BoundingBox) -> [f32; 3] {
    [b.min_z, b.max_z, (b.min_z + b.max_z) / 2.0]
}

/// Returns (shift, candidate) for the first value pair within tolerance.
fn first_match(moving: [f32; 3], candidates: [f32; 3], tolerance: f32) -> Option<(f32, f32)> {
    for m in moving {
        for c in candidates {
            if (m - c).abs() <= tolerance {
                return Some((c - m, c));
            }
        }
    }
    None
}

/// Snap `moving`, placed at `proposed`, against `statics`.
pub fn snap_guides<'a, I>(moving: &Room, statics: I, proposed: Point, tolerance: f32) -> SnapResult
where
    I: IntoIterator<Item = &'a Room>,
{
    let mut placed = moving.clone();
    placed.position = proposed;
    let mb = room_bounds(&placed);

    let mut x_hit: Option<(f32, f32, BoundingBox)> = None;
    let mut z_hit: Option<(f32, f32, BoundingBox)> = None;

    for other in statics {
        if x_hit.is_some() && z_hit.is_some() {
            break;
        }
        let sb = room_bounds(other);
        if x_hit.is_none() {
            x_hit = first_match(x_values(&mb), x_values(&sb), tolerance).map(|(s, c)| (s, c, sb));
        }
        if z_hit.is_none() {
            z_hit = first_match(z_values(&mb), z_values(&sb), tolerance).map(|(s, c)| (s, c, sb));
        }
    }

    let mut position = proposed;
    if let Some((shift, _, _)) = x_hit {
        position.x += shift;
    }
    if let Some((shift, _, _)) = z_hit {
        position.z += shift;
    }

    // Guides span both rooms at their final placement
    placed.position = position;
    let fb = room_bounds(&placed);
    let mut guides = Vec::new();
    if let Some((_, offset, sb)) = x_hit {
        guides.push(SnapGuide {
            orientation: GuideOrientation::Vertical,
            offset,
            start: fb.min_z.min(sb.min_z),
            end: fb.max_z.max(sb.max_z),
        });
    }
    if let Some((_, offset, sb)) = z_hit {
        guides.push(SnapGuide {
            orientation: GuideOrientation::Horizontal,
            offset,
            start: fb.min_x.min(sb.min_x),
            end: fb.max_x.max(sb.max_x),
        });
    }

    SnapResult { position, guides }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: u32, x: f32, z: f32, l: f32, w: f32) -> Room {
        Room::new(id, format!("R{id}"), Point::new(x, z)).with_size(l, w)
    }

    #[test]
    fn grid_rounding() {
        assert_eq!(snap_to_grid(1.2, 0.5), 1.0);
        assert_eq!(snap_to_grid(1.3, 0.5), 1.5);
        assert_eq!(snap_to_grid(-0.3, 0.5), -0.5);
        assert_eq!(snap_to_grid(1.37, 0.0), 1.37);
    }

    #[test]
    fn no_candidate_passes_through() {
        let moving = room(1, 0.0, 0.0, 4.0, 4.0);
        let statics = [room(2, 50.0, 50.0, 4.0, 4.0)];
        let res = snap_guides(&moving, &statics, Point::new(10.0, 10.0), 0.25);
        assert_eq!(res.position, Point::new(10.0, 10.0));
        assert!(res.guides.is_empty());
    }

    #[test]
    fn left_edge_snaps_to_right_edge_with_zero_residual() {
        let moving = room(1, 0.0, 0.0, 4.0, 4.0);
        let statics = [room(2, 0.0, 20.0, 5.0, 3.0)];
        // moving min_x 5.1 is 0.1 from static max_x 5.0
        let res = snap_guides(&moving, &statics, Point::new(5.1, 0.0), 0.25);
        assert_eq!(res.position.x, 5.0);
        assert_eq!(res.position.z, 0.0);
        assert_eq!(res.guides.len(), 1);
        let g = res.guides[0];
        assert_eq!(g.orientation, GuideOrientation::Vertical);
        assert_eq!(g.offset, 5.0);
        assert_eq!(g.start, 0.0);
        assert_eq!(g.end, 23.0);
    }

    #[test]
    fn axes_snap_independently() {
        let moving = room(1, 0.0, 0.0, 2.0, 2.0);
        let statics = [room(2, 10.0, 0.0, 4.0, 4.0), room(3, 0.0, 10.0, 4.0, 4.0)];
        // x near room 3 center (2.0), z near room 2 max_z (4.0)
        let res = snap_guides(&moving, &statics, Point::new(0.9, 4.2), 0.25);
        // moving center x = 1.9 → 2.0 ; moving min_z = 4.2 → 4.0
        assert!((res.position.x - 1.0).abs() < 1e-5);
        assert!((res.position.z - 4.0).abs() < 1e-5);
        assert_eq!(res.guides.len(), 2);
        assert_eq!(res.guides[1].orientation, GuideOrientation::Horizontal);
    }

    #[test]
    fn first_static_room_wins_per_axis() {
        let moving = room(1, 0.0, 0.0, 2.0, 2.0);
        let statics = [room(2, 5.2, 30.0, 2.0, 2.0), room(3, 5.0, 40.0, 2.0, 2.0)];
        let res = snap_guides(&moving, &statics, Point::new(5.1, 0.0), 0.25);
        assert!((res.position.x - 5.2).abs() < 1e-5);
    }

    #[test]
    fn tolerance_is_inclusive() {
        let moving = room(1, 0.0, 0.0, 2.0, 2.0);
        let statics = [room(2, 10.0, 20.0, 2.0, 2.0)];
        let res = snap_guides(&moving, &statics, Point::new(9.75, 0.0), 0.25);
        assert_eq!(res.position.x, 10.0);
    }
}
