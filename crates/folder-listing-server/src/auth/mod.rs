//! Authentication module for the listing server

pub mod middleware;
