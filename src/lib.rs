//! # Kanban Board Core
//!
//! Board content logic for a kanban client: columns holding cards, ordered
//! by explicit order arrays kept next to the entity collections.
//!
//! This crate provides the ordering and drag-and-drop reconciliation
//! primitives, a coordinating board view that mirrors every change to a
//! source of record, and REST and file-backed implementations of that source,
//! without any dependency on a specific UI toolkit.

pub mod config;
pub mod domain;
pub mod error;
pub mod source;
pub mod view;

// Re-export commonly used types
pub use config::BoardConfig;
pub use domain::{
    apply_drag, map_order, Board, BoardId, Card, CardId, Column, ColumnId, ColumnUpdate,
    DropResult,
};
pub use error::{BoardError, Result};
pub use source::BoardSource;
pub use view::{BoardView, ViewState};
