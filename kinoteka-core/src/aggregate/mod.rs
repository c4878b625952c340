//! Reconstruction of movie aggregates from flat join rows.

pub mod reducer;
pub mod row;

pub use reducer::{MovieReducer, reduce_rows, reduce_stream};
pub use row::MovieRow;
