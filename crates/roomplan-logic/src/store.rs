//! Floorplan state: the read/write capability sessions depend on, and an
//! owned aggregate that implements it.
//!
//! Sessions only see [`FloorplanStore`], so a host can back it with any
//! container. [`Floorplan`] is the plain in-memory version, mutated only
//! through [`Command`]s.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adjacency::refresh_connections;
use crate::room::{Point, Room, RoomConnection, RoomId, RoomPatch, RoomType};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FloorplanError {
    #[error("room #{0} does not exist")]
    UnknownRoom(RoomId),
    #[error("room #{0} already exists")]
    DuplicateRoom(RoomId),
    #[error("connection {0} does not exist")]
    UnknownConnection(String),
    #[error("cannot connect room #{0} to itself")]
    SelfConnection(RoomId),
    #[error("no room ids left to allocate")]
    IdSpaceExhausted,
}

/// Read/write access to the current rooms and selection.
pub trait FloorplanStore {
    fn rooms(&self) -> &[Room];

    fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms().iter().find(|r| r.id == id)
    }

    fn selection(&self) -> &[RoomId];

    fn update_room(&mut self, id: RoomId, patch: RoomPatch) -> Result<(), FloorplanError>;

    fn select_room(&mut self, id: RoomId) -> Result<(), FloorplanError>;

    fn set_selection(&mut self, ids: Vec<RoomId>);

    fn is_selected(&self, id: RoomId) -> bool {
        self.selection().contains(&id)
    }
}

/// A named mutation of the floorplan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    AddRoom {
        name: String,
        room_type: RoomType,
        position: Point,
    },
    /// Insert a fully specified room (e.g. from a loaded plan).
    InsertRoom(Room),
    UpdateRoom {
        id: RoomId,
        patch: RoomPatch,
    },
    DeleteRoom(RoomId),
    SetSelection(Vec<RoomId>),
    SelectRoom(RoomId),
    ClearSelection,
    AddManualConnection {
        room1_id: RoomId,
        room2_id: RoomId,
    },
    RemoveConnection(String),
    RefreshConnections,
}

/// Owned floorplan aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Floorplan {
    pub name: String,
    rooms: Vec<Room>,
    #[serde(default)]
    connections: Vec<RoomConnection>,
    #[serde(default, skip_serializing)]
    selection: Vec<RoomId>,
    #[serde(default)]
    next_room_id: RoomId,
}

impl Floorplan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            next_room_id: 1,
            ..Self::default()
        }
    }

    /// Build a plan from existing rooms. Fails on duplicate ids.
    pub fn from_rooms(name: impl Into<String>, rooms: Vec<Room>) -> Result<Self, FloorplanError> {
        let mut plan = Self::new(name);
        for room in rooms {
            plan.insert_room(room)?;
        }
        Ok(plan)
    }

    pub fn connections(&self) -> &[RoomConnection] {
        &self.connections
    }

    pub fn apply(&mut self, command: Command) -> Result<(), FloorplanError> {
        match command {
            Command::AddRoom {
                name,
                room_type,
                position,
            } => {
                self.add_room(name, room_type, position)?;
                Ok(())
            }
            Command::InsertRoom(room) => self.insert_room(room),
            Command::UpdateRoom { id, patch } => self.update_room(id, patch),
            Command::DeleteRoom(id) => self.delete_room(id),
            Command::SetSelection(ids) => {
                self.set_selection(ids);
                Ok(())
            }
            Command::SelectRoom(id) => self.select_room(id),
            Command::ClearSelection => {
                self.selection.clear();
                Ok(())
            }
            Command::AddManualConnection { room1_id, room2_id } => {
                self.add_manual_connection(room1_id, room2_id)
            }
            Command::RemoveConnection(id) => {
                let before = self.connections.len();
                self.connections.retain(|c| c.id != id);
                if self.connections.len() == before {
                    return Err(FloorplanError::UnknownConnection(id));
                }
                Ok(())
            }
            Command::RefreshConnections => {
                self.connections = refresh_connections(&self.rooms, &self.connections);
                Ok(())
            }
        }
    }

    /// Add a room with default dimensions and return its id.
    pub fn add_room(
        &mut self,
        name: String,
        room_type: RoomType,
        position: Point,
    ) -> Result<RoomId, FloorplanError> {
        let id = self.allocate_id()?;
        self.rooms
            .push(Room::new(id, name, position).with_type(room_type));
        log::debug!("Added room #{}", id);
        Ok(id)
    }

    fn insert_room(&mut self, room: Room) -> Result<(), FloorplanError> {
        if self.room(room.id).is_some() {
            return Err(FloorplanError::DuplicateRoom(room.id));
        }
        self.next_room_id = self.next_room_id.max(room.id.saturating_add(1));
        self.rooms.push(room);
        Ok(())
    }

    /// Next free id above every existing one. `u32::MAX` is handed out
    /// once; after that the id space is exhausted.
    fn allocate_id(&mut self) -> Result<RoomId, FloorplanError> {
        let after_existing = match self.rooms.iter().map(|r| r.id).max() {
            Some(highest) => highest
                .checked_add(1)
                .ok_or(FloorplanError::IdSpaceExhausted)?,
            None => 1,
        };
        let id = self.next_room_id.max(after_existing);
        self.next_room_id = id.saturating_add(1);
        Ok(id)
    }

    fn delete_room(&mut self, id: RoomId) -> Result<(), FloorplanError> {
        let before = self.rooms.len();
        self.rooms.retain(|r| r.id != id);
        if self.rooms.len() == before {
            return Err(FloorplanError::UnknownRoom(id));
        }
        self.selection.retain(|&s| s != id);
        self.connections.retain(|c| !c.involves(id));
        log::debug!("Deleted room #{}", id);
        Ok(())
    }

    fn add_manual_connection(&mut self, a: RoomId, b: RoomId) -> Result<(), FloorplanError> {
        if a == b {
            return Err(FloorplanError::SelfConnection(a));
        }
        for id in [a, b] {
            if self.room(id).is_none() {
                return Err(FloorplanError::UnknownRoom(id));
            }
        }
        let conn = RoomConnection::manual(a, b);
        if !self.connections.iter().any(|c| c.id == conn.id) {
            self.connections.push(conn);
        }
        Ok(())
    }
}

impl FloorplanStore for Floorplan {
    fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    fn selection(&self) -> &[RoomId] {
        &self.selection
    }

    fn update_room(&mut self, id: RoomId, patch: RoomPatch) -> Result<(), FloorplanError> {
        let room = self
            .rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(FloorplanError::UnknownRoom(id))?;
        room.apply_patch(&patch);
        Ok(())
    }

    fn select_room(&mut self, id: RoomId) -> Result<(), FloorplanError> {
        if self.room(id).is_none() {
            return Err(FloorplanError::UnknownRoom(id));
        }
        self.selection = vec![id];
        Ok(())
    }

    fn set_selection(&mut self, ids: Vec<RoomId>) {
        let mut kept: Vec<RoomId> = Vec::with_capacity(ids.len());
        for id in ids {
            if self.room(id).is_some() && !kept.contains(&id) {
                kept.push(id);
            }
        }
        self.selection = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with_two() -> Floorplan {
        let mut plan = Floorplan::new("Test");
        plan.add_room("A".into(), RoomType::Kitchen, Point::new(0.0, 0.0))
            .unwrap();
        plan.add_room("B".into(), RoomType::Office, Point::new(4.0, 0.0))
            .unwrap();
        plan
    }

    #[test]
    fn add_room_assigns_sequential_ids_and_defaults() {
        let plan = plan_with_two();
        let ids: Vec<RoomId> = plan.rooms().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(plan.room(1).unwrap().length, 4.0);
        assert_eq!(plan.room(2).unwrap().room_type, RoomType::Office);
    }

    #[test]
    fn update_unknown_room_errors() {
        let mut plan = plan_with_two();
        let err = plan
            .apply(Command::UpdateRoom {
                id: 99,
                patch: RoomPatch::default(),
            })
            .unwrap_err();
        assert_eq!(err, FloorplanError::UnknownRoom(99));
        assert_eq!(err.to_string(), "room #99 does not exist");
    }

    #[test]
    fn delete_cleans_selection_and_connections() {
        let mut plan = plan_with_two();
        plan.apply(Command::SetSelection(vec![1, 2])).unwrap();
        plan.apply(Command::AddManualConnection {
            room1_id: 1,
            room2_id: 2,
        })
        .unwrap();
        plan.apply(Command::DeleteRoom(2)).unwrap();
        assert_eq!(plan.selection(), &[1]);
        assert!(plan.connections().is_empty());
    }

    #[test]
    fn selection_drops_unknown_and_duplicate_ids() {
        let mut plan = plan_with_two();
        plan.set_selection(vec![2, 7, 2, 1]);
        assert_eq!(plan.selection(), &[2, 1]);
    }

    #[test]
    fn refresh_detects_shared_wall() {
        // Default rooms are 4×3; A at x=0 and B at x=4 share A's east wall
        let mut plan = plan_with_two();
        plan.apply(Command::RefreshConnections).unwrap();
        assert_eq!(plan.connections().len(), 1);
        let conn = &plan.connections()[0];
        assert_eq!((conn.room1_id, conn.room2_id), (1, 2));
        assert!(!conn.is_manual);
    }

    #[test]
    fn insert_rejects_duplicate_and_advances_ids() {
        let mut plan = Floorplan::new("Test");
        plan.apply(Command::InsertRoom(Room::new(10, "X", Point::default())))
            .unwrap();
        let err = plan
            .apply(Command::InsertRoom(Room::new(10, "Y", Point::default())))
            .unwrap_err();
        assert_eq!(err, FloorplanError::DuplicateRoom(10));
        let next = plan.add_room("Z".into(), RoomType::Other, Point::default());
        assert_eq!(next, Ok(11));
    }

    #[test]
    fn highest_id_insert_does_not_overflow() {
        let mut plan = Floorplan::new("Test");
        plan.apply(Command::InsertRoom(Room::new(u32::MAX, "Last", Point::default())))
            .unwrap();
        assert!(plan.room(u32::MAX).is_some());
        assert_eq!(
            plan.add_room("Next".into(), RoomType::Other, Point::default()),
            Err(FloorplanError::IdSpaceExhausted)
        );
        assert_eq!(
            plan.apply(Command::AddRoom {
                name: "Next".into(),
                room_type: RoomType::Other,
                position: Point::default(),
            }),
            Err(FloorplanError::IdSpaceExhausted)
        );
        assert_eq!(plan.rooms().len(), 1);
    }

    #[test]
    fn loaded_plan_near_id_limit_allocates_last_id_once() {
        let json = format!(
            r#"{{"name": "Edge", "rooms": [{{"id": {}, "name": "R",
                "position": {{"x": 0.0, "z": 0.0}}, "length": 4.0, "width": 3.0,
                "height": 2.7}}]}}"#,
            u32::MAX - 1
        );
        let mut plan: Floorplan = serde_json::from_str(&json).unwrap();
        let id = plan.add_room("Last".into(), RoomType::Other, Point::default());
        assert_eq!(id, Ok(u32::MAX));
        assert_eq!(
            plan.add_room("Over".into(), RoomType::Other, Point::default()),
            Err(FloorplanError::IdSpaceExhausted)
        );
    }

    #[test]
    fn self_connection_rejected() {
        let mut plan = plan_with_two();
        assert_eq!(
            plan.apply(Command::AddManualConnection {
                room1_id: 1,
                room2_id: 1
            }),
            Err(FloorplanError::SelfConnection(1))
        );
    }

    #[test]
    fn remove_unknown_connection_errors() {
        let mut plan = plan_with_two();
        assert!(matches!(
            plan.apply(Command::RemoveConnection("nope".into())),
            Err(FloorplanError::UnknownConnection(_))
        ));
    }

    #[test]
    fn plan_json_roundtrip_skips_selection() {
        let mut plan = plan_with_two();
        plan.set_selection(vec![1]);
        let json = serde_json::to_string(&plan).unwrap();
        let back: Floorplan = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rooms(), plan.rooms());
        assert!(back.selection().is_empty());
    }
}
