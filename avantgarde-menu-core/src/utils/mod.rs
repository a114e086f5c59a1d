//! Utility functions

pub mod markup;
