//! Single-variable binning schemes.
//!
//! A `BinScheme` is an ordered list of `Bin`s for one analysis variable. Each
//! bin wraps a `Cut` (a range, a threshold, an exact value, or a bare label)
//! and carries the variable's name and title so it can describe itself.
pub mod axis;
pub mod cut;
pub mod error;
pub mod scheme;

pub use axis::Axis;
pub use cut::{Bin, Cut};
pub use error::BinningError;
pub use scheme::BinScheme;
