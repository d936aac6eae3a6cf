pub mod address;
pub mod collection;
pub mod query;

pub use address::{Coordinates, OsGridRef, OsPlacesAddress};
pub use collection::AddressCollection;
pub use query::{GeocodeQuery, ReverseQuery};
