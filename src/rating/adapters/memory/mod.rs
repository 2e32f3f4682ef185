//! In-memory adapters for ratings.

mod repository;

pub use repository::InMemoryRatingRepository;
