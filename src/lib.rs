//! bookwise - Book catalogue and review backend
//!
//! In-memory users, books and reviews behind an async operation set,
//! with signed bearer tokens and derived rating statistics.

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
