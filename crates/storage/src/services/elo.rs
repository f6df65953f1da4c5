//! ELO rating update used for every recorded vote.

/// Fixed K-factor scaling every adjustment.
pub const K_FACTOR: f64 = 32.0;

/// New ratings for the two parks of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EloUpdate {
    pub new_winner_rating: i64,
    pub new_loser_rating: i64,
}

impl EloUpdate {
    pub fn winner_gain(&self, winner_rating: i64) -> i64 {
        self.new_winner_rating - winner_rating
    }

    pub fn loser_loss(&self, loser_rating: i64) -> i64 {
        loser_rating - self.new_loser_rating
    }
}

/// Probability that a park rated `rating` beats one rated `opponent`.
pub fn expected_score(rating: i64, opponent: i64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) as f64 / 400.0))
}

/// Both sides are rounded to the nearest integer with ties away from zero
/// (`f64::round`).
pub fn compute_elo(winner_rating: i64, loser_rating: i64) -> EloUpdate {
    let expected_winner = expected_score(winner_rating, loser_rating);
    let expected_loser = expected_score(loser_rating, winner_rating);

    let new_winner_rating = (winner_rating as f64 + K_FACTOR * (1.0 - expected_winner)).round();
    let new_loser_rating = (loser_rating as f64 + K_FACTOR * (0.0 - expected_loser)).round();

    EloUpdate {
        new_winner_rating: new_winner_rating as i64,
        new_loser_rating: new_loser_rating as i64,
    }
}
