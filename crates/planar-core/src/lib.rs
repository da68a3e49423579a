//! # planar-core
//!
//! Planar multi-component image model.
//!
//! This crate provides the data structure every `planar-io` conversion reads
//! from or writes into:
//!
//! - [`Component`] - One channel plane with its own precision, signedness and
//!   sub-sampling factors, stored as dense row-major `i32` samples
//! - [`PlanarImage`] - An ordered set of components plus a reference grid
//! - [`GridOptions`] - Caller parameters used to place a new image on the
//!   reference grid
//! - [`Error`] - Validation errors for all of the above
//!
//! ## Usage
//!
//! ```rust
//! use planar_core::{ColorSpace, ComponentParams, PlanarImage};
//!
//! let params = ComponentParams::unsigned8(640, 480);
//! let image = PlanarImage::from_params(&[params; 3], ColorSpace::Srgb)?;
//! assert_eq!(image.num_components(), 3);
//! assert_eq!(image.component(0).unwrap().precision(), 8);
//! # Ok::<(), planar_core::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! planar-core (this crate)
//!    ^
//!    |
//!    +-- planar-io (plane extraction, TGA, raw bitmaps)
//!    +-- planar-bench
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod component;
pub mod error;
pub mod grid;
pub mod image;

pub use component::{check_homogeneous, Component, ComponentParams, MAX_PRECISION};
pub use error::{Error, Result};
pub use grid::GridOptions;
pub use image::{ColorSpace, PlanarImage};

/// Prelude module for convenient imports.
///
/// ```
/// use planar_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::component::{check_homogeneous, Component, ComponentParams};
    pub use crate::error::{Error, Result};
    pub use crate::grid::GridOptions;
    pub use crate::image::{ColorSpace, PlanarImage};
}
