//! Command implementations for gaenv CLI

pub mod link;
