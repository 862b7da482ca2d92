//! Catalog rules that hold regardless of transport or storage.

pub mod rules;
pub mod tree;
