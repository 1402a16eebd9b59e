//! Data models

pub mod invoice;

pub use invoice::{InvoiceLine, Order, OrderLine};
