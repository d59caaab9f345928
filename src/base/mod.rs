//! Core components, types, and utilities for the relay.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The static rule table.
//! - Common types and result handling.

pub mod config;
pub mod rules;
pub mod types;
