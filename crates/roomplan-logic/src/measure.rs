//! Measurement tool: click, move, click to measure a straight distance.
//!
//! Escape cancels at any point. Positions are converted from client pixels
//! to world meters through the viewport.

use serde::{Deserialize, Serialize};

use crate::room::Point;
use crate::viewport::{PointerEvent, ScreenRect, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub start: Point,
    pub end: Point,
    pub distance: f32,
}

impl Measurement {
    fn between(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            distance: start.distance(end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum MeasureState {
    #[default]
    Idle,
    Measuring {
        start: Point,
        end: Point,
    },
}

#[derive(Debug, Clone, Default)]
pub struct MeasureSession {
    pub viewport: Viewport,
    pub rect: ScreenRect,
    state: MeasureState,
    last: Option<Measurement>,
}

impl MeasureSession {
    pub fn new(viewport: Viewport, rect: ScreenRect) -> Self {
        Self {
            viewport,
            rect,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, MeasureState::Measuring { .. })
    }

    /// Most recently completed measurement.
    pub fn last(&self) -> Option<Measurement> {
        self.last
    }

    /// In-progress measurement, if any.
    pub fn current(&self) -> Option<Measurement> {
        match self.state {
            MeasureState::Idle => None,
            MeasureState::Measuring { start, end } => Some(Measurement::between(start, end)),
        }
    }

    fn world(&self, event: &PointerEvent) -> Point {
        self.viewport
            .screen_to_world(event.client_x, event.client_y, &self.rect)
    }

    /// First click anchors the start; second click completes and returns
    /// the measurement.
    pub fn click(&mut self, event: &PointerEvent) -> Option<Measurement> {
        let p = self.world(event);
        match self.state {
            MeasureState::Idle => {
                self.state = MeasureState::Measuring { start: p, end: p };
                None
            }
            MeasureState::Measuring { start, .. } => {
                let m = Measurement::between(start, p);
                self.state = MeasureState::Idle;
                self.last = Some(m);
                log::debug!("Measured {:.2} m", m.distance);
                Some(m)
            }
        }
    }

    pub fn on_move(&mut self, event: &PointerEvent) -> Option<Measurement> {
        let p = self.world(event);
        if let MeasureState::Measuring { end, .. } = &mut self.state {
            *end = p;
        }
        self.current()
    }

    /// Escape: drop the in-progress measurement.
    pub fn cancel(&mut self) {
        self.state = MeasureState::Idle;
    }
}
