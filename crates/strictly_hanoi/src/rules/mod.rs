//! Game rules for the Tower of Hanoi.
//!
//! Pure functions over the registry. Rules are kept apart from storage so
//! the engine, the contracts and the tests can compose them.

pub mod scoring;
pub mod validate;
pub mod win;

pub use scoring::{efficiency, min_moves};
pub use validate::{
    DistinctTowers, SmallerOnLarger, TopDisk, ValidationEnabled, valid_destinations,
    validate_disk_move, validate_move,
};
pub use win::{is_descending, is_solved};
