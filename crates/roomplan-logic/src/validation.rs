//! Field validators and whole-plan validation.
//!
//! Field checks return a [`FieldValidation`]: hard limits give an error,
//! values outside the typical range give a warning. Plan validation returns
//! a flat list of [`ValidationError`]s, one per problem found.

use std::collections::HashSet;

use crate::collision::overlapping_pairs;
use crate::constants::limits;
use crate::room::{Room, RoomConnection};
use crate::store::{Floorplan, FloorplanStore};

/// Outcome of a single field check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldValidation {
    pub valid: bool,
    pub error: Option<String>,
    pub warning: Option<String>,
}

impl FieldValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    fn error(msg: String) -> Self {
        Self {
            valid: false,
            error: Some(msg),
            warning: None,
        }
    }

    fn warning(msg: String) -> Self {
        Self {
            valid: true,
            error: None,
            warning: Some(msg),
        }
    }
}

pub fn validate_room_dimension(value: f32) -> FieldValidation {
    if !value.is_finite() || !(limits::MIN_DIMENSION..=limits::MAX_DIMENSION).contains(&value) {
        return FieldValidation::error(format!(
            "must be between {} and {} m (got {})",
            limits::MIN_DIMENSION,
            limits::MAX_DIMENSION,
            value
        ));
    }
    if value < limits::TYPICAL_MIN_DIMENSION {
        return FieldValidation::warning(format!("{value} m is unusually small"));
    }
    if value > limits::TYPICAL_MAX_DIMENSION {
        return FieldValidation::warning(format!("{value} m is unusually large"));
    }
    FieldValidation::ok()
}

pub fn validate_room_height(value: f32) -> FieldValidation {
    if !value.is_finite() || !(limits::MIN_HEIGHT..=limits::MAX_HEIGHT).contains(&value) {
        return FieldValidation::error(format!(
            "height must be between {} and {} m (got {})",
            limits::MIN_HEIGHT,
            limits::MAX_HEIGHT,
            value
        ));
    }
    if value < limits::TYPICAL_MIN_HEIGHT {
        return FieldValidation::warning(format!("{value} m ceiling is unusually low"));
    }
    if value > limits::TYPICAL_MAX_HEIGHT {
        return FieldValidation::warning(format!("{value} m ceiling is unusually high"));
    }
    FieldValidation::ok()
}

pub fn validate_room_name(name: &str) -> FieldValidation {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return FieldValidation::error("name is required".to_string());
    }
    let len = trimmed.chars().count();
    if len > limits::MAX_NAME_LEN {
        return FieldValidation::error(format!(
            "name must be at most {} characters (got {})",
            limits::MAX_NAME_LEN,
            len
        ));
    }
    if len > limits::TYPICAL_MAX_NAME_LEN {
        return FieldValidation::warning(format!("name is long ({len} characters)"));
    }
    FieldValidation::ok()
}

/// A plan-level validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

fn push_field(
    out: &mut Vec<ValidationError>,
    category: &'static str,
    room: &Room,
    field: &str,
    check: FieldValidation,
) {
    if let Some(msg) = check.error {
        out.push(ValidationError {
            category,
            severity: Severity::Error,
            message: format!("Room #{} ({}) {}: {}", room.id, room.name, field, msg),
        });
    } else if let Some(msg) = check.warning {
        out.push(ValidationError {
            category,
            severity: Severity::Warning,
            message: format!("Room #{} ({}) {}: {}", room.id, room.name, field, msg),
        });
    }
}

// ── A. Per-room fields ──────────────────────────────────────────────────

pub fn check_room_fields(rooms: &[Room]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for r in rooms {
        push_field(&mut errors, "room_geometry", r, "length", validate_room_dimension(r.length));
        push_field(&mut errors, "room_geometry", r, "width", validate_room_dimension(r.width));
        push_field(&mut errors, "room_geometry", r, "height", validate_room_height(r.height));
        push_field(&mut errors, "room_name", r, "name", validate_room_name(&r.name));
    }
    errors
}

pub fn check_duplicate_ids(rooms: &[Room]) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    rooms
        .iter()
        .filter(|r| !seen.insert(r.id))
        .map(|r| ValidationError {
            category: "room_identity",
            severity: Severity::Error,
            message: format!("Room id #{} is used more than once", r.id),
        })
        .collect()
}

// ── B. Room-to-room (pairwise) ──────────────────────────────────────────

/// One error per overlapping pair.
pub fn check_room_overlaps(rooms: &[Room]) -> Vec<ValidationError> {
    overlapping_pairs(rooms)
        .into_iter()
        .map(|(a, b)| ValidationError {
            category: "room_overlap",
            severity: Severity::Error,
            message: format!("Rooms #{} and #{} overlap", a, b),
        })
        .collect()
}

// ── C. Connections ──────────────────────────────────────────────────────

pub fn check_connection_rooms_exist(
    connections: &[RoomConnection],
    rooms: &[Room],
) -> Vec<ValidationError> {
    let ids: HashSet<_> = rooms.iter().map(|r| r.id).collect();
    let mut errors = Vec::new();
    for c in connections {
        for (label, id) in [("room1", c.room1_id), ("room2", c.room2_id)] {
            if !ids.contains(&id) {
                errors.push(ValidationError {
                    category: "connection_validity",
                    severity: Severity::Error,
                    message: format!("Connection {} references non-existent {}={}", c.id, label, id),
                });
            }
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

pub fn validate_all(rooms: &[Room], connections: &[RoomConnection]) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_duplicate_ids(rooms));
    all.extend(check_room_fields(rooms));
    all.extend(check_room_overlaps(rooms));
    all.extend(check_connection_rooms_exist(connections, rooms));
    all
}

pub fn validate_floorplan(plan: &Floorplan) -> Vec<ValidationError> {
    validate_all(plan.rooms(), plan.connections())
}
