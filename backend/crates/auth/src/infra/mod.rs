//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::MemorySessionStore;
pub use postgres::PgAuthRepository;
