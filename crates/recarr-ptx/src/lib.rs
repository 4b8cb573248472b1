//! PTX point-cloud loading for recarr.
//!
//! PTX is a plain-text scan format: a ten-line header per scan, then one
//! `x y z intensity [r g b]` row per point. Points at the scanner origin
//! mark missing returns.
//!
//! ```text
//! columns
//! rows
//! scanner position          (3 values)
//! scanner axis x            (3 values)
//! scanner axis y            (3 values)
//! scanner axis z            (3 values, unused)
//! transform row 0..3        (4 values each)
//! x y z intensity ...
//! ```
//!
//! [`load_ptx`] reads one scan into a record array with fields
//! `coords: f8 (3,)` and `intensity: f8`, transformed into project
//! coordinates (see [`transform_points`]) and with missing points dropped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod header;
pub mod reader;
pub mod transform;

pub use config::PtxConfig;
pub use error::PtxError;
pub use header::{PtxHeader, HEADER_LINES};
pub use reader::{load_ptx, PtxCloud, PtxReader};
pub use transform::transform_points;
