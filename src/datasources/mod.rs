pub mod location;
pub mod openmeteo;

pub use location::{LocationStrategy, Locator};
pub use openmeteo::OpenMeteoClient;
