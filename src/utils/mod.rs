//! Utility modules

pub mod http;
