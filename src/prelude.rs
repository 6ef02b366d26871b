//! Derive macros shared by the `date_prefix` modules.

pub use derive_more::Display;
