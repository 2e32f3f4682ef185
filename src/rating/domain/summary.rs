//! Aggregate rating statistics.

use super::StarRating;
use serde::Serialize;

/// Mean rating and review count for one mechanic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    average: f64,
    review_count: u32,
}

impl RatingSummary {
    /// Summary of a mechanic with no ratings: average `0.0`, count `0`.
    pub const EMPTY: Self = Self {
        average: 0.0,
        review_count: 0,
    };

    /// Computes the arithmetic mean of `ratings`.
    #[expect(
        clippy::float_arithmetic,
        reason = "the mean of star values is a fractional number"
    )]
    #[must_use]
    pub fn from_ratings(ratings: impl IntoIterator<Item = StarRating>) -> Self {
        let (sum, count) = ratings.into_iter().fold((0_u32, 0_u32), |(sum, count), r| {
            (
                sum.saturating_add(u32::from(r.value())),
                count.saturating_add(1),
            )
        });
        if count == 0 {
            return Self::EMPTY;
        }
        Self {
            average: f64::from(sum) / f64::from(count),
            review_count: count,
        }
    }

    /// Returns the mean rating, `0.0` when there are no ratings.
    #[must_use]
    pub const fn average(&self) -> f64 {
        self.average
    }

    /// Returns the mean rounded to one decimal place for profile display.
    #[expect(
        clippy::float_arithmetic,
        reason = "display rounding of a floating-point mean"
    )]
    #[must_use]
    pub fn display_average(&self) -> f64 {
        (self.average * 10.0).round() / 10.0
    }

    /// Returns the number of ratings.
    #[must_use]
    pub const fn review_count(&self) -> u32 {
        self.review_count
    }
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Count of ratings per star value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingBreakdown {
    /// Counts indexed by `stars - 1`.
    counts: [u32; 5],
}

impl RatingBreakdown {
    /// Tallies `ratings` by star value.
    #[must_use]
    pub fn from_ratings(ratings: impl IntoIterator<Item = StarRating>) -> Self {
        let mut breakdown = Self::default();
        for rating in ratings {
            let slot = usize::from(rating.value().saturating_sub(StarRating::MIN));
            if let Some(count) = breakdown.counts.get_mut(slot) {
                *count = count.saturating_add(1);
            }
        }
        breakdown
    }

    /// Returns the number of ratings with exactly `stars` stars.
    #[must_use]
    pub fn count(&self, stars: StarRating) -> u32 {
        let slot = usize::from(stars.value().saturating_sub(StarRating::MIN));
        self.counts.get(slot).copied().unwrap_or_default()
    }

    /// Returns `(stars, count)` pairs from five stars down to one.
    pub fn descending(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        (StarRating::MIN..=StarRating::MAX)
            .rev()
            .zip(self.counts.iter().rev().copied())
    }

    /// Returns the total number of ratings.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts
            .iter()
            .fold(0_u32, |total, count| total.saturating_add(*count))
    }
}
