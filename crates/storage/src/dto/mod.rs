pub mod common;
pub mod park;
pub mod vote;
