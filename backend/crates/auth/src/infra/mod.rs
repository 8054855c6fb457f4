//! Infrastructure Layer
//!
//! Store implementations of the domain repository traits.

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;
