pub mod flavor;

pub use flavor::{Flavor, FlavorChanges, NewFlavor};
