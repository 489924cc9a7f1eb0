//! Security module - folder read permissions

pub mod permission;

pub use permission::*;
