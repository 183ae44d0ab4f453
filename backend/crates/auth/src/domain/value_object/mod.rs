//! Value Objects

pub mod email;
pub mod theme;
pub mod username;
