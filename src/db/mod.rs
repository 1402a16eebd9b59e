//! Database access for stored orders

mod queries;

pub use queries::*;
