//! Data structures shared by the rigid-body and joint sets.

pub use self::handle_table::{HandleTable, Index};

pub mod handle_table;
