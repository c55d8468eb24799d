//! digitsense-region - Region analysis for binary digit grids
//!
//! This crate provides region processing on [`BinaryGrid`]s:
//!
//! - **Connected component analysis** - Finding and measuring ink strokes
//! - **Seed fill operations** - Border fill and enclosed-hole detection
//! - **Thinning** - Reducing strokes to one-cell-wide skeletons
//!
//! All fills use explicit stacks, so arbitrarily large regions never
//! recurse. Every operation is infallible on a valid grid.
//!
//! # Examples
//!
//! ```
//! use digitsense_core::BinaryGrid;
//! use digitsense_region::{ConnectivityType, count_holes, find_connected_components};
//!
//! let ring = BinaryGrid::from_rows(&["###", "#.#", "###"]).unwrap();
//! assert_eq!(count_holes(&ring), 1);
//!
//! let dots = BinaryGrid::from_rows(&["#.#"]).unwrap();
//! let components = find_connected_components(&dots, ConnectivityType::FourWay);
//! assert_eq!(components.len(), 2);
//! ```
//!
//! [`BinaryGrid`]: digitsense_core::BinaryGrid

pub mod conncomp;
pub mod seedfill;
pub mod thin;

pub use conncomp::{ConnectedComponent, ConnectivityType, count_components, find_connected_components};
pub use seedfill::{Hole, count_holes, fill_from_border, find_holes};
pub use thin::{thin, thin_to_skeleton};
