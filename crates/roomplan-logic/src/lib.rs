//! Pure floorplan logic for RoomPlan.
//!
//! This crate contains the geometry and interaction engine behind the plan
//! editor, independent of any UI toolkit or storage. Functions take plain
//! data and return results; gesture sessions read and write rooms through
//! the [`store::FloorplanStore`] trait, so everything is unit-testable
//! without an event loop.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`adjacency`] | Shared-wall detection, connection refresh, door placement |
//! | [`collision`] | Axis-aligned room overlap tests |
//! | [`constants`] | Clamps, tolerances, grid size, pixels per meter |
//! | [`drag`] | Multi-room translate session with grid and alignment snap |
//! | [`geometry`] | Room center, bounds, corners, walls, local↔world |
//! | [`measure`] | Click-to-click distance measurement tool |
//! | [`resize`] | Eight-handle single-room resize session |
//! | [`room`] | Room data model, discrete rotations, connections |
//! | [`rotate`] | Handle-drag and 90° step rotation |
//! | [`session`] | Session errors and pointer delta conversion |
//! | [`snap`] | Alignment guides and grid rounding |
//! | [`store`] | Store capability trait and the owned floorplan aggregate |
//! | [`validation`] | Field validators and whole-plan validation |
//! | [`viewport`] | Pointer events, modifiers, zoom/pan transform |

pub mod adjacency;
pub mod collision;
pub mod constants;
pub mod drag;
pub mod geometry;
pub mod measure;
pub mod resize;
pub mod room;
pub mod rotate;
pub mod session;
pub mod snap;
pub mod store;
pub mod validation;
pub mod viewport;
