//!
//! Utility functions shared by the element index and the rules.
//!

pub mod range_utils;
pub mod title;
