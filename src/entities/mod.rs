pub mod prelude;

pub mod flavors;
