//! Drag session: translate every selected room by one shared delta.
//!
//! The grabbed ("primary") room drives the math: its proposed position is
//! grid-snapped, then alignment-snapped against the rooms that are not
//! moving, and the resulting net delta is applied to all selected rooms'
//! start positions. Overlaps are reported, never rejected.

use std::collections::HashSet;

use crate::collision::{rooms_overlap, rooms_overlapping};
use crate::room::{Point, Room, RoomId, RoomPatch};
use crate::session::{pointer_delta_meters, SessionError};
use crate::snap::{snap_guides, snap_to_grid, SnapGuide};
use crate::store::FloorplanStore;
use crate::viewport::{PointerEvent, TransformSettings};

#[derive(Debug, Clone)]
struct DragState {
    primary: RoomId,
    start_pointer: PointerEvent,
    start_positions: Vec<(RoomId, Point)>,
}

/// Result of one move tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragUpdate {
    /// Net world delta applied to every selected room.
    pub delta: Point,
    pub guides: Vec<SnapGuide>,
    pub overlapping: HashSet<RoomId>,
}

/// Result of dropping the rooms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragOutcome {
    pub moved: Vec<RoomId>,
    /// Overlapping pairs involving a moved room, `(lower id, higher id)`.
    pub overlaps: Vec<(RoomId, RoomId)>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DragSession {
    pub settings: TransformSettings,
    state: Option<DragState>,
    guides: Vec<SnapGuide>,
    highlighted: HashSet<RoomId>,
}

impl DragSession {
    pub fn new(settings: TransformSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Alignment guides from the latest move.
    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    /// Rooms currently overlapping a dragged room. Empty once the drag ends;
    /// the drop's overlaps are reported in [`DragOutcome`].
    pub fn highlighted(&self) -> &HashSet<RoomId> {
        &self.highlighted
    }

    /// Grab `room_id`. Unless it is already selected, the selection
    /// collapses to it; with the additive modifier it is appended instead.
    pub fn begin<S: FloorplanStore + ?Sized>(
        &mut self,
        store: &mut S,
        room_id: RoomId,
        event: &PointerEvent,
    ) -> Result<(), SessionError> {
        if self.is_active() {
            return Err(SessionError::AlreadyActive("drag"));
        }
        if store.room(room_id).is_none() {
            return Err(SessionError::UnknownRoom(room_id));
        }

        if !store.is_selected(room_id) {
            if event.modifiers.additive() {
                let mut ids = store.selection().to_vec();
                ids.push(room_id);
                store.set_selection(ids);
            } else {
                store.select_room(room_id)?;
            }
        }

        let start_positions = store
            .selection()
            .iter()
            .filter_map(|&id| store.room(id).map(|r| (id, r.position)))
            .collect::<Vec<_>>();

        log::debug!(
            "Drag start on room #{} with {} selected",
            room_id,
            start_positions.len()
        );
        self.state = Some(DragState {
            primary: room_id,
            start_pointer: *event,
            start_positions,
        });
        self.guides.clear();
        self.highlighted.clear();
        Ok(())
    }

    pub fn on_move<S: FloorplanStore + ?Sized>(
        &mut self,
        store: &mut S,
        event: &PointerEvent,
    ) -> Result<DragUpdate, SessionError> {
        let state = self.state.as_ref().ok_or(SessionError::NotActive("drag"))?;
        let (dx, dz) = pointer_delta_meters(&state.start_pointer, event, &self.settings.viewport);
        self.drag_by(store, dx, dz)
    }

    /// Apply a raw world-space delta (meters) measured from the drag start.
    pub fn drag_by<S: FloorplanStore + ?Sized>(
        &mut self,
        store: &mut S,
        dx: f32,
        dz: f32,
    ) -> Result<DragUpdate, SessionError> {
        let state = self.state.as_ref().ok_or(SessionError::NotActive("drag"))?;
        let primary_start = state
            .start_positions
            .iter()
            .find(|(id, _)| *id == state.primary)
            .map(|&(_, p)| p)
            .ok_or(SessionError::UnknownRoom(state.primary))?;
        let primary_room: Room = store
            .room(state.primary)
            .cloned()
            .ok_or(SessionError::UnknownRoom(state.primary))?;

        let mut proposed = primary_start.offset(dx, dz);
        if self.settings.grid_snap {
            proposed = Point::new(
                snap_to_grid(proposed.x, self.settings.grid_size),
                snap_to_grid(proposed.z, self.settings.grid_size),
            );
        }

        let moving_ids: Vec<RoomId> = state.start_positions.iter().map(|&(id, _)| id).collect();
        let snapped = snap_guides(
            &primary_room,
            store.rooms().iter().filter(|r| !moving_ids.contains(&r.id)),
            proposed,
            self.settings.snap_tolerance,
        );

        let delta = Point::new(
            snapped.position.x - primary_start.x,
            snapped.position.z - primary_start.z,
        );
        for &(id, start) in &state.start_positions {
            store.update_room(id, RoomPatch::position(start.offset(delta.x, delta.z)))?;
        }

        self.guides = snapped.guides;
        self.highlighted = rooms_overlapping(&moving_ids, store.rooms());
        Ok(DragUpdate {
            delta,
            guides: self.guides.clone(),
            overlapping: self.highlighted.clone(),
        })
    }

    /// Drop the rooms where they are and report overlaps.
    pub fn end<S: FloorplanStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<DragOutcome, SessionError> {
        let state = self.state.take().ok_or(SessionError::NotActive("drag"))?;
        let moved: Vec<RoomId> = state.start_positions.iter().map(|&(id, _)| id).collect();

        let rooms = store.rooms();
        let mut overlaps = Vec::new();
        for a in rooms.iter().filter(|r| moved.contains(&r.id)) {
            for b in rooms.iter().filter(|r| r.id != a.id) {
                if rooms_overlap(a, b) {
                    let pair = (a.id.min(b.id), a.id.max(b.id));
                    if !overlaps.contains(&pair) {
                        overlaps.push(pair);
                    }
                }
            }
        }

        let warning = if overlaps.is_empty() {
            None
        } else {
            let msg = format!(
                "{} overlapping room pair(s) after move: {}",
                overlaps.len(),
                overlaps
                    .iter()
                    .map(|(a, b)| format!("#{a}/#{b}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            log::warn!("{}", msg);
            Some(msg)
        };

        self.guides.clear();
        self.highlighted.clear();
        log::debug!("Drag end, {} room(s) moved", moved.len());
        Ok(DragOutcome {
            moved,
            overlaps,
            warning,
        })
    }
}
