pub mod gauge;
pub mod input;

pub use gauge::{absolute_humidity_gauge, relative_humidity_gauge};
pub use input::InputWidget;
