//! Shared pieces of the gesture sessions (drag, resize, rotate, measure).
//!
//! A session is a plain value with `begin`/`on_move`/`end`. The host owns
//! event subscription and calls these from its pointer handlers.

use thiserror::Error;

use crate::room::RoomId;
use crate::store::FloorplanError;
use crate::viewport::{PointerEvent, Viewport};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("a {0} session is already active")]
    AlreadyActive(&'static str),
    #[error("no {0} session is active")]
    NotActive(&'static str),
    #[error("no room is selected")]
    NothingSelected,
    #[error("room #{0} does not exist")]
    UnknownRoom(RoomId),
    #[error(transparent)]
    Store(#[from] FloorplanError),
}

/// Pointer travel since `start`, in world meters.
pub fn pointer_delta_meters(start: &PointerEvent, now: &PointerEvent, viewport: &Viewport) -> (f32, f32) {
    (
        viewport.pixels_to_meters(now.client_x - start.client_x),
        viewport.pixels_to_meters(now.client_y - start.client_y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_converts_pixels_at_zoom() {
        let vp = Viewport {
            zoom_level: 2.0,
            ..Viewport::default()
        };
        let (dx, dz) = pointer_delta_meters(
            &PointerEvent::at(100.0, 100.0),
            &PointerEvent::at(200.0, 50.0),
            &vp,
        );
        assert_eq!((dx, dz), (1.0, -0.5));
    }

    #[test]
    fn store_errors_convert() {
        let err: SessionError = FloorplanError::UnknownRoom(3).into();
        assert_eq!(err.to_string(), "room #3 does not exist");
    }
}
