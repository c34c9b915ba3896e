//! Rotation: a drag on the rotation handle, or a discrete 90° step.
//!
//! Rooms only ever take one of four orientations. A handle drag measures
//! the pointer angle around the room's on-screen center and snaps it to the
//! nearest quarter turn on every move.

use crate::geometry::room_center;
use crate::room::{RoomId, RoomPatch, Rotation, RotationDirection};
use crate::session::SessionError;
use crate::store::FloorplanStore;
use crate::viewport::{PointerEvent, ScreenRect, Viewport};

/// Handle rest position is straight up, so 0° on the handle is -90° on atan2.
const HANDLE_OFFSET_DEG: f32 = 90.0;

/// Snap an angle in degrees (any range) to the nearest allowed rotation.
pub fn snap_angle(degrees: f32) -> Rotation {
    let a = degrees.rem_euclid(360.0);
    if !(45.0..315.0).contains(&a) {
        Rotation::Deg0
    } else if a < 135.0 {
        Rotation::Deg90
    } else if a < 225.0 {
        Rotation::Deg180
    } else {
        Rotation::Deg270
    }
}

/// Handle angle for a pointer at `(dx, dy)` pixels from the room center.
pub fn pointer_angle(dx: f32, dy: f32) -> f32 {
    dy.atan2(dx).to_degrees() + HANDLE_OFFSET_DEG
}

#[derive(Debug, Clone, Copy)]
struct RotateState {
    room_id: RoomId,
    center_x: f32,
    center_y: f32,
    start_rotation: Rotation,
}

#[derive(Debug, Clone, Default)]
pub struct RotateSession {
    state: Option<RotateState>,
}

impl RotateSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Screen-space pivot of the active gesture.
    pub fn pivot(&self) -> Option<(f32, f32)> {
        self.state.map(|s| (s.center_x, s.center_y))
    }

    /// Start a handle drag on `room_id`, drawn in `rect` under `viewport`.
    pub fn begin<S: FloorplanStore + ?Sized>(
        &mut self,
        store: &S,
        room_id: RoomId,
        viewport: &Viewport,
        rect: &ScreenRect,
    ) -> Result<(), SessionError> {
        if self.is_active() {
            return Err(SessionError::AlreadyActive("rotate"));
        }
        let room = store.room(room_id).ok_or(SessionError::UnknownRoom(room_id))?;
        let (center_x, center_y) = viewport.world_to_screen(room_center(room), rect);
        log::debug!(
            "Rotate start on room #{} around ({:.1}, {:.1})px",
            room_id,
            center_x,
            center_y
        );
        self.state = Some(RotateState {
            room_id,
            center_x,
            center_y,
            start_rotation: room.rotation,
        });
        Ok(())
    }

    /// Write the snapped rotation for the current pointer position.
    pub fn on_move<S: FloorplanStore + ?Sized>(
        &mut self,
        store: &mut S,
        event: &PointerEvent,
    ) -> Result<Rotation, SessionError> {
        let state = self.state.ok_or(SessionError::NotActive("rotate"))?;
        let angle = pointer_angle(event.client_x - state.center_x, event.client_y - state.center_y);
        let rotation = snap_angle(angle);
        store.update_room(state.room_id, RoomPatch::rotation(rotation))?;
        Ok(rotation)
    }

    /// Finish the gesture; returns `(before, after)`.
    pub fn end<S: FloorplanStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<(Rotation, Rotation), SessionError> {
        let state = self.state.take().ok_or(SessionError::NotActive("rotate"))?;
        let now = store
            .room(state.room_id)
            .map(|r| r.rotation)
            .ok_or(SessionError::UnknownRoom(state.room_id))?;
        log::debug!(
            "Rotate end on room #{}: {}° → {}°",
            state.room_id,
            state.start_rotation.degrees(),
            now.degrees()
        );
        Ok((state.start_rotation, now))
    }
}

/// Step the first selected room by 90° in `direction`.
pub fn rotate_selected_room<S: FloorplanStore + ?Sized>(
    store: &mut S,
    direction: RotationDirection,
) -> Result<Rotation, SessionError> {
    let id = *store.selection().first().ok_or(SessionError::NothingSelected)?;
    let current = store.room(id).ok_or(SessionError::UnknownRoom(id))?.rotation;
    let next = current.rotated(direction);
    store.update_room(id, RoomPatch::rotation(next))?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{Point, Room};
    use crate::store::Floorplan;

    fn plan_with(rotation: Rotation) -> Floorplan {
        let room = Room::new(1, "R", Point::new(0.0, 0.0))
            .with_size(4.0, 2.0)
            .with_rotation(rotation);
        let mut plan = Floorplan::from_rooms("Test", vec![room]).unwrap();
        plan.set_selection(vec![1]);
        plan
    }

    #[test]
    fn snap_boundaries() {
        assert_eq!(snap_angle(0.0), Rotation::Deg0);
        assert_eq!(snap_angle(44.9), Rotation::Deg0);
        assert_eq!(snap_angle(45.0), Rotation::Deg90);
        assert_eq!(snap_angle(134.9), Rotation::Deg90);
        assert_eq!(snap_angle(135.0), Rotation::Deg180);
        assert_eq!(snap_angle(225.0), Rotation::Deg270);
        assert_eq!(snap_angle(315.0), Rotation::Deg0);
        assert_eq!(snap_angle(-80.0), Rotation::Deg270);
        assert_eq!(snap_angle(400.0), Rotation::Deg0);
    }

    #[test]
    fn pointer_directions_map_to_quarters() {
        // screen y grows downward
        assert_eq!(snap_angle(pointer_angle(0.0, -10.0)), Rotation::Deg0);
        assert_eq!(snap_angle(pointer_angle(10.0, 0.0)), Rotation::Deg90);
        assert_eq!(snap_angle(pointer_angle(0.0, 10.0)), Rotation::Deg180);
        assert_eq!(snap_angle(pointer_angle(-10.0, 0.0)), Rotation::Deg270);
    }

    #[test]
    fn discrete_rotation_wraps() {
        let mut plan = plan_with(Rotation::Deg270);
        let r = rotate_selected_room(&mut plan, RotationDirection::Clockwise).unwrap();
        assert_eq!(r, Rotation::Deg0);

        let mut plan = plan_with(Rotation::Deg0);
        let r = rotate_selected_room(&mut plan, RotationDirection::CounterClockwise).unwrap();
        assert_eq!(r, Rotation::Deg270);
        assert_eq!(plan.room(1).unwrap().rotation, Rotation::Deg270);
    }

    #[test]
    fn discrete_rotation_needs_selection() {
        let mut plan = plan_with(Rotation::Deg0);
        plan.set_selection(vec![]);
        assert_eq!(
            rotate_selected_room(&mut plan, RotationDirection::Clockwise),
            Err(SessionError::NothingSelected)
        );
    }

    #[test]
    fn drag_writes_rotation_each_move() {
        let mut plan = plan_with(Rotation::Deg0);
        let vp = Viewport::default();
        let rect = ScreenRect {
            left: 10.0,
            top: 20.0,
            width: 500.0,
            height: 500.0,
        };
        let mut rot = RotateSession::new();
        rot.begin(&plan, 1, &vp, &rect).unwrap();
        // center (2, 1) m → (10 + 100, 20 + 50) px
        assert_eq!(rot.pivot(), Some((110.0, 70.0)));

        let r = rot.on_move(&mut plan, &PointerEvent::at(200.0, 72.0)).unwrap();
        assert_eq!(r, Rotation::Deg90);
        assert_eq!(plan.room(1).unwrap().rotation, Rotation::Deg90);

        rot.on_move(&mut plan, &PointerEvent::at(110.0, 200.0)).unwrap();
        assert_eq!(plan.room(1).unwrap().rotation, Rotation::Deg180);

        let (before, after) = rot.end(&plan).unwrap();
        assert_eq!((before, after), (Rotation::Deg0, Rotation::Deg180));
        assert!(!rot.is_active());
    }
}
