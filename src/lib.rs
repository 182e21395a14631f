//! Tactical play diagrams: players, a ball, arrows, picks and zones on a 2-D
//! board, with drag editing, undo/redo and JSON persistence.
//!
//! The editing core is UI-independent:
//!
//! | module      | role                                              |
//! |-------------|---------------------------------------------------|
//! | [`model`]   | entity records and the serializable document     |
//! | [`geometry`]| distances, angles, quadratic curves, arrowheads   |
//! | [`factory`] | default instances, fixed or scattered placement   |
//! | [`scene`]   | the store that owns every entity                  |
//! | [`hit`]     | which entity and handle lies under a point        |
//! | [`edit`]    | the drag state machine                            |
//! | [`history`] | snapshot undo/redo                                |
//! | [`codec`]   | JSON save/load, including the legacy layout       |
//! | [`editor`]  | commands and pointer events over one scene        |
//! | [`render`]  | drawing onto a `Surface`; SVG and PNG export      |
//! | [`storage`] | named save slots                                  |
//! | [`settings`]| metrics, paths and placement from TOML/JSON       |
//!
//! [`app`] is the eframe desktop shell.

pub mod app;
pub mod codec;
pub mod edit;
pub mod editor;
pub mod factory;
pub mod geometry;
pub mod history;
pub mod hit;
pub mod model;
pub mod render;
pub mod scene;
pub mod settings;
pub mod storage;
