//! Resize session: drag one of eight handles on a single room.
//!
//! Math runs on the room's screen-aligned extents (its bounds), so the east
//! handle always moves the max-x edge. For rooms turned 90°/270° that edge
//! belongs to the room's width; the result is mapped back to length/width
//! at the end.
//!
//! Modifiers: center mode doubles the delta and keeps the original center
//! fixed; ratio mode keeps the original aspect. Grid snap runs on the
//! dragged edge before center mode doubles the delta, so the dragged edge
//! lands on the grid and the opposite edge mirrors it. Dimensions are
//! clamped on every tick, so only soft warnings remain for the final
//! validation.

use serde::{Deserialize, Serialize};

use crate::constants::clamp_dimension;
use crate::geometry::room_bounds;
use crate::room::{Point, Room, RoomId, RoomPatch};
use crate::session::{pointer_delta_meters, SessionError};
use crate::snap::snap_to_grid;
use crate::store::FloorplanStore;
use crate::validation::validate_room_dimension;
use crate::viewport::{Modifiers, PointerEvent, TransformSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::S,
        ResizeHandle::E,
        ResizeHandle::W,
        ResizeHandle::NE,
        ResizeHandle::NW,
        ResizeHandle::SE,
        ResizeHandle::SW,
    ];

    /// Edge signs along (x, z): +1 moves the max edge, -1 the min edge.
    pub fn signs(self) -> (i8, i8) {
        match self {
            ResizeHandle::N => (0, -1),
            ResizeHandle::S => (0, 1),
            ResizeHandle::E => (1, 0),
            ResizeHandle::W => (-1, 0),
            ResizeHandle::NE => (1, -1),
            ResizeHandle::NW => (-1, -1),
            ResizeHandle::SE => (1, 1),
            ResizeHandle::SW => (-1, 1),
        }
    }

    pub fn is_corner(self) -> bool {
        let (sx, sz) = self.signs();
        sx != 0 && sz != 0
    }
}

/// New footprint proposed by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeUpdate {
    pub length: f32,
    pub width: f32,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeOutcome {
    pub room_id: RoomId,
    pub length: f32,
    pub width: f32,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
struct ResizeState {
    original: Room,
    handle: ResizeHandle,
    start_pointer: PointerEvent,
}

#[derive(Debug, Clone, Default)]
pub struct ResizeSession {
    pub settings: TransformSettings,
    state: Option<ResizeState>,
}

impl ResizeSession {
    pub fn new(settings: TransformSettings) -> Self {
        Self {
            settings,
            state: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Handle being dragged, for highlighting.
    pub fn active_handle(&self) -> Option<ResizeHandle> {
        self.state.as_ref().map(|s| s.handle)
    }

    pub fn begin<S: FloorplanStore + ?Sized>(
        &mut self,
        store: &S,
        room_id: RoomId,
        handle: ResizeHandle,
        event: &PointerEvent,
    ) -> Result<(), SessionError> {
        if self.is_active() {
            return Err(SessionError::AlreadyActive("resize"));
        }
        let original = store
            .room(room_id)
            .cloned()
            .ok_or(SessionError::UnknownRoom(room_id))?;
        log::debug!("Resize start on room #{} via {:?}", room_id, handle);
        self.state = Some(ResizeState {
            original,
            handle,
            start_pointer: *event,
        });
        Ok(())
    }

    pub fn on_move<S: FloorplanStore + ?Sized>(
        &mut self,
        store: &mut S,
        event: &PointerEvent,
    ) -> Result<ResizeUpdate, SessionError> {
        let state = self.state.as_ref().ok_or(SessionError::NotActive("resize"))?;
        let (dx, dz) = pointer_delta_meters(&state.start_pointer, event, &self.settings.viewport);
        let update = compute_resize(
            &state.original,
            state.handle,
            dx,
            dz,
            event.modifiers,
            &self.settings,
        );
        store.update_room(
            state.original.id,
            RoomPatch::footprint(update.length, update.width, update.position),
        )?;
        Ok(update)
    }

    /// Finish the gesture and check the committed dimensions.
    pub fn end<S: FloorplanStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<ResizeOutcome, SessionError> {
        let state = self.state.take().ok_or(SessionError::NotActive("resize"))?;
        let id = state.original.id;
        let room = store.room(id).ok_or(SessionError::UnknownRoom(id))?;

        let mut warnings = Vec::new();
        for (label, value) in [("length", room.length), ("width", room.width)] {
            let check = validate_room_dimension(value);
            if let Some(msg) = check.warning.or(check.error) {
                warnings.push(format!("{label}: {msg}"));
            }
        }
        for w in &warnings {
            log::warn!("Room #{} resized: {}", id, w);
        }

        Ok(ResizeOutcome {
            room_id: id,
            length: room.length,
            width: room.width,
            warnings,
        })
    }
}

/// Clamp a ratio-locked pair, where `derive` maps primary to secondary and
/// `invert` maps back.
///
/// The primary is clamped first; if the derived secondary is then out of
/// range it is clamped instead and the primary derived back from it. Only
/// when both cannot fit does the ratio give way.
fn clamp_locked(
    primary: f32,
    derive: impl Fn(f32) -> f32,
    invert: impl Fn(f32) -> f32,
) -> (f32, f32) {
    let p = clamp_dimension(primary);
    let s = derive(p);
    let cs = clamp_dimension(s);
    if cs == s {
        (p, s)
    } else {
        (clamp_dimension(invert(cs)), cs)
    }
}

/// Pure resize math for one tick. `dx`/`dz` are meters since the start.
pub fn compute_resize(
    original: &Room,
    handle: ResizeHandle,
    mut dx: f32,
    mut dz: f32,
    modifiers: Modifiers,
    settings: &TransformSettings,
) -> ResizeUpdate {
    let b = room_bounds(original);
    let (sx, sz) = handle.signs();
    let from_center = modifiers.from_center();
    let keep_ratio = modifiers.keep_ratio();

    if settings.grid_snap {
        let g = settings.grid_size;
        match sx {
            1 => dx += snap_to_grid(b.max_x + dx, g) - (b.max_x + dx),
            -1 => dx += snap_to_grid(b.min_x + dx, g) - (b.min_x + dx),
            _ => {}
        }
        match sz {
            1 => dz += snap_to_grid(b.max_z + dz, g) - (b.max_z + dz),
            -1 => dz += snap_to_grid(b.min_z + dz, g) - (b.min_z + dz),
            _ => {}
        }
    }

    let ex0 = b.width_x();
    let ez0 = b.depth_z();
    let mut d_ex = f32::from(sx) * dx;
    let mut d_ez = f32::from(sz) * dz;
    if from_center {
        d_ex *= 2.0;
        d_ez *= 2.0;
    }

    let ratio = ez0 / ex0;
    // true when x is the driving axis under ratio lock
    let x_primary = if handle.is_corner() {
        d_ex.abs() >= d_ez.abs()
    } else {
        sx != 0
    };

    let (mut ex, mut ez) = (ex0 + d_ex, ez0 + d_ez);
    if keep_ratio {
        if x_primary {
            ez = ex * ratio;
        } else {
            ex = ez / ratio;
        }
    }

    if keep_ratio {
        (ex, ez) = if x_primary {
            clamp_locked(ex, |x| x * ratio, |z| z / ratio)
        } else {
            let (z, x) = clamp_locked(ez, |z| z / ratio, |x| x * ratio);
            (x, z)
        };
    } else {
        ex = clamp_dimension(ex);
        ez = clamp_dimension(ez);
    }

    let center = b.center();
    let min_x = if from_center {
        center.x - ex / 2.0
    } else {
        match sx {
            -1 => b.max_x - ex,
            1 => b.min_x,
            _ if keep_ratio => center.x - ex / 2.0,
            _ => b.min_x,
        }
    };
    let min_z = if from_center {
        center.z - ez / 2.0
    } else {
        match sz {
            -1 => b.max_z - ez,
            1 => b.min_z,
            _ if keep_ratio => center.z - ez / 2.0,
            _ => b.min_z,
        }
    };

    let (length, width) = if original.rotation.swaps_axes() {
        (ez, ex)
    } else {
        (ex, ez)
    };
    ResizeUpdate {
        length,
        width,
        position: Point::new(min_x, min_z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Rotation;

    fn room(l: f32, w: f32) -> Room {
        Room::new(1, "R", Point::new(0.0, 0.0)).with_size(l, w)
    }

    fn run(r: &Room, h: ResizeHandle, dx: f32, dz: f32, m: Modifiers) -> ResizeUpdate {
        compute_resize(r, h, dx, dz, m, &TransformSettings::default())
    }

    fn shift() -> Modifiers {
        Modifiers {
            shift: true,
            ..Modifiers::NONE
        }
    }

    fn alt() -> Modifiers {
        Modifiers {
            alt: true,
            ..Modifiers::NONE
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn se_grows_keeping_origin() {
        let u = run(&room(5.0, 4.0), ResizeHandle::SE, 1.0, 1.0, Modifiers::NONE);
        assert_eq!((u.length, u.width), (6.0, 5.0));
        assert_eq!(u.position, Point::new(0.0, 0.0));
    }

    #[test]
    fn nw_grows_moving_origin() {
        let u = run(&room(5.0, 4.0), ResizeHandle::NW, -1.0, -1.0, Modifiers::NONE);
        assert_eq!((u.length, u.width), (6.0, 5.0));
        assert_eq!(u.position, Point::new(-1.0, -1.0));
    }

    #[test]
    fn edge_handles_touch_one_axis() {
        let r = room(4.0, 3.0);
        let e = run(&r, ResizeHandle::E, 1.0, 7.0, Modifiers::NONE);
        assert_eq!((e.length, e.width), (5.0, 3.0));
        let n = run(&r, ResizeHandle::N, 7.0, -1.0, Modifiers::NONE);
        assert_eq!((n.length, n.width), (4.0, 4.0));
        assert_eq!(n.position, Point::new(0.0, -1.0));
        let w = run(&r, ResizeHandle::W, 1.0, 0.0, Modifiers::NONE);
        assert_eq!((w.length, w.position.x), (3.0, 1.0));
    }

    #[test]
    fn corner_ratio_lock_tracks_primary() {
        let u = run(&room(4.0, 3.0), ResizeHandle::SE, 1.0, 0.0, shift());
        assert!(approx(u.length, 5.0));
        assert!(approx(u.width, 3.75));
        assert_eq!(u.position, Point::new(0.0, 0.0));
    }

    #[test]
    fn corner_ratio_lock_picks_larger_axis() {
        let u = run(&room(4.0, 2.0), ResizeHandle::SE, 0.2, 1.0, shift());
        assert!(approx(u.width, 3.0));
        assert!(approx(u.length, 6.0));
    }

    #[test]
    fn edge_ratio_lock_recenters_other_axis() {
        let u = run(&room(4.0, 2.0), ResizeHandle::E, 2.0, 0.0, shift());
        assert!(approx(u.length, 6.0));
        assert!(approx(u.width, 3.0));
        // width grew by 1 around the original z center (1.0)
        assert!(approx(u.position.z, -0.5));
        assert!(approx(u.position.x, 0.0));
    }

    #[test]
    fn center_mode_doubles_and_keeps_center() {
        let u = run(&room(4.0, 3.0), ResizeHandle::E, 1.0, 0.0, alt());
        assert!(approx(u.length, 6.0));
        assert!(approx(u.position.x, -1.0));
        assert!(approx(u.width, 3.0));
        assert!(approx(u.position.z, 0.0));
    }

    #[test]
    fn clamps_to_minimum() {
        let u = run(&room(4.0, 3.0), ResizeHandle::E, -10.0, 0.0, Modifiers::NONE);
        assert_eq!(u.length, 0.1);
        assert!(approx(u.position.x, 0.0));
        let w = run(&room(4.0, 3.0), ResizeHandle::W, 10.0, 0.0, Modifiers::NONE);
        assert_eq!(w.length, 0.1);
        assert!(approx(w.position.x, 3.9));
    }

    #[test]
    fn clamps_to_maximum_and_rederives_ratio() {
        let u = run(&room(50.0, 25.0), ResizeHandle::SE, 80.0, 0.0, shift());
        assert_eq!(u.length, 100.0);
        assert!(approx(u.width, 50.0));
    }

    #[test]
    fn ratio_holds_when_secondary_hits_maximum() {
        // 4 × 40 keeps its 1:10 aspect; width caps at 100 so length stops at 10
        let u = run(&room(4.0, 40.0), ResizeHandle::SE, 8.0, 0.0, shift());
        assert!(approx(u.length, 10.0), "length {}", u.length);
        assert!(approx(u.width, 100.0), "width {}", u.width);
        assert!(approx(u.width / u.length, 10.0));
    }

    #[test]
    fn ratio_holds_when_secondary_hits_minimum() {
        // 40 × 4 pulled in from the east edge: width floors at 0.1 first
        let u = run(&room(40.0, 4.0), ResizeHandle::E, -39.5, 0.0, shift());
        assert!(approx(u.width, 0.1), "width {}", u.width);
        assert!(approx(u.length, 1.0), "length {}", u.length);
    }

    #[test]
    fn center_mode_grid_snap_keeps_dragged_edge_on_grid() {
        let r = room(4.0, 3.0);
        let settings = TransformSettings {
            grid_snap: true,
            ..TransformSettings::default()
        };
        let u = compute_resize(&r, ResizeHandle::E, 1.1, 0.0, alt(), &settings);
        // east edge 5.1 snaps to 5.0, west edge mirrors to -1.0
        assert!(approx(u.position.x + u.length, 5.0));
        assert!(approx(u.position.x, -1.0));
        assert!(approx(u.length, 6.0));
    }

    #[test]
    fn grid_snap_moves_edge_onto_grid() {
        let r = room(4.0, 3.0);
        let settings = TransformSettings {
            grid_snap: true,
            ..TransformSettings::default()
        };
        let u = compute_resize(&r, ResizeHandle::SE, 1.1, 0.3, Modifiers::NONE, &settings);
        assert!(approx(u.length, 5.0));
        assert!(approx(u.width, 3.5));
    }

    #[test]
    fn quarter_turned_room_maps_x_handle_to_width() {
        let r = room(4.0, 3.0).with_rotation(Rotation::Deg90);
        // bounds: 3 along x, 4 along z
        let u = run(&r, ResizeHandle::E, 1.0, 0.0, Modifiers::NONE);
        assert_eq!((u.length, u.width), (4.0, 4.0));
    }

    #[test]
    fn handle_table_is_consistent() {
        for h in ResizeHandle::ALL {
            let (sx, sz) = h.signs();
            assert_eq!(h.is_corner(), sx != 0 && sz != 0, "{h:?}");
        }
    }
}
