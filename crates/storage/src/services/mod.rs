pub mod elo;
pub mod pairing;
pub mod voting;
