pub mod board;
pub mod card;
pub mod column;
pub mod drag;
pub mod id;
pub mod sorting;

pub use board::{Board, BoardUpdate};
pub use card::{Card, NewCard};
pub use column::{Column, ColumnUpdate, NewColumn};
pub use drag::{apply_drag, DropResult};
pub use id::{BoardId, CardId, ColumnId};
pub use sorting::{derive_order, map_order, map_order_by, Identified};
