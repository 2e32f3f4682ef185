//! Identity references consumed from the authentication collaborator.
//!
//! The engine never stores users. Callers arrive as an [`Actor`] resolved by
//! the surrounding web layer, and every other context refers to people by
//! [`UserId`].

mod actor;
mod ids;

pub use actor::{Actor, ParseRoleError, Role};
pub use ids::UserId;
