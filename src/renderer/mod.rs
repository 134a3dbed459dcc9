//! Rendering data module
//!
//! Builds a paint-ordered draw list from the simulation state. Painting
//! itself happens on the host canvas.

pub mod draw_list;

pub use draw_list::{DrawItem, build_draw_list};
