pub mod reading;
pub mod weather;

pub use reading::*;
pub use weather::*;
