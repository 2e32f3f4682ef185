//! Unit tests for the service request context.

mod chat_tests;
mod reaper_tests;
