mod memory;
mod store_type;

pub use memory::InMemoryIdentityStore;
pub use store_type::IdentityStore;
