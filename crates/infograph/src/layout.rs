//! Layout algorithms shared by structures.
//!
//! - [`tidy_tree`] - compact layered tree positions
//! - [`LinearScale`], [`ticks`], [`stepped_ticks`] - numeric axes

mod scale;
mod tidy_tree;

pub use scale::{LinearScale, stepped_ticks, ticks};
pub use tidy_tree::tidy_tree;
