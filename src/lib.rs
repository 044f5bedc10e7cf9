//! Teamdesk API Library
//!
//! This library provides the core functionality for the Teamdesk API,
//! a small administrative backend for managing competitive teams:
//! domain logic, persistence adapters, and the HTTP surface.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
