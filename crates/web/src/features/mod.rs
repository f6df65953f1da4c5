pub mod parks;
pub mod ranking;
pub mod votes;
