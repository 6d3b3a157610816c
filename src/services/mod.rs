pub mod flavor_service;
pub mod flavor_service_impl;
pub mod flavor_service_memory;

pub use flavor_service::{FlavorError, FlavorService};
pub use flavor_service_impl::SeaOrmFlavorService;
pub use flavor_service_memory::MemoryFlavorService;
