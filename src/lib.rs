//! Geocoding adapter for the Ordnance Survey Places API.
//!
//! Looks up UK addresses by postcode or free text and returns them with
//! their UPRN and OS National Grid reference.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod postcode;
pub mod provider;
pub mod transport;
mod utils;

mod tests;
#[cfg(test)]
mod test_support;

pub use error::GeocodeError;
pub use model::{AddressCollection, GeocodeQuery, OsGridRef, OsPlacesAddress, ReverseQuery};
pub use provider::os_places::OsPlacesGeocoder;
pub use provider::Provider;
