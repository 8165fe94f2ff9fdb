//! Graph input

pub mod edgelist;
