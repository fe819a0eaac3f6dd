pub mod memory;
pub mod postgres;

pub use memory::InMemoryAccountRepository;
pub use memory::InMemorySessionStore;
pub use postgres::PostgresAccountRepository;
