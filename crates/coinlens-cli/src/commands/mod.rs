//! Subcommand implementations.

pub mod admin;
pub mod auth;
pub mod coins;
pub mod news;
pub mod watchlist;
