pub mod humidity;
pub mod weather_lookup;

pub use humidity::compute;
pub use weather_lookup::WeatherLookupService;
