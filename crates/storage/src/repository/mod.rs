pub mod park;
pub mod ranking;
pub mod vote;
