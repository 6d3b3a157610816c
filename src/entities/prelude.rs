pub use super::flavors::Entity as Flavors;
