pub mod geo_client;

pub use geo_client::{GeoCity, GeoClient, GeoState};
