mod park;
mod park_name;
mod vote;

pub use park::{INITIAL_RATING, Park};
pub use park_name::ParkName;
pub use vote::Vote;
