//! Unit tests for individual components

mod error_test;
mod audit_test;
mod config_test;
mod builders_test;
mod render_test;
