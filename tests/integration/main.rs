//! Integration tests

mod card_test;
mod config_test;
