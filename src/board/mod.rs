//! Board representation.
//!
//! Contains the triangular hole layout, the hex adjacency relation, the
//! per-position fill state, and the jump move type.

pub mod adjacency;
pub mod jump;
pub mod layout;
pub mod state;

pub use adjacency::HEX_STEPS;
pub use jump::Move;
pub use layout::{is_valid_size, position_count, Position, MAX_SIZE};
pub use state::{Board, BoardError, Configuration};
