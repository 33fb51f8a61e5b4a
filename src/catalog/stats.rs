//! Rating aggregation
//!
//! Statistics are always recomputed from the reviews passed in; nothing
//! here is cached on a book.

use serde::{Deserialize, Serialize};

use super::model::{Review, MAX_RATING, MIN_RATING};

/// Average and count over a set of reviews
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    /// Arithmetic mean of ratings, exactly 0.0 when there are none
    pub average_rating: f64,
    pub count: usize,
}

/// Compute rating statistics for a set of reviews.
///
/// Integer sum, single division: the result doesn't depend on order.
pub fn compute_stats(reviews: &[Review]) -> RatingStats {
    let count = reviews.len();
    if count == 0 {
        return RatingStats {
            average_rating: 0.0,
            count: 0,
        };
    }

    let total: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    RatingStats {
        average_rating: total as f64 / count as f64,
        count,
    }
}

/// Number of reviews at each star level, index 0 = one star.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingDistribution([usize; MAX_RATING as usize]);

impl RatingDistribution {
    /// Tally reviews by star. Ratings outside 1..=5 are skipped.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut counts = [0usize; MAX_RATING as usize];
        for review in reviews {
            if (MIN_RATING..=MAX_RATING).contains(&review.rating) {
                counts[usize::from(review.rating - MIN_RATING)] += 1;
            }
        }
        RatingDistribution(counts)
    }

    /// Reviews with exactly `stars` stars
    pub fn count(&self, stars: u8) -> usize {
        if (MIN_RATING..=MAX_RATING).contains(&stars) {
            self.0[usize::from(stars - MIN_RATING)]
        } else {
            0
        }
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn as_array(&self) -> &[usize; MAX_RATING as usize] {
        &self.0
    }
}
