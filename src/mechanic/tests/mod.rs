//! Unit tests for the mechanic context.

mod domain_tests;
