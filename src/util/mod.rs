//! Utility modules for bayesfilter.

pub mod varint;
