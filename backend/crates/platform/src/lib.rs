//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Cookie management
//! - Client identification (IP / User-Agent extraction)
//! - Login attempt tracking (lockout)

pub mod client;
pub mod cookie;
pub mod password;
pub mod rate_limit;
