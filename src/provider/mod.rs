use crate::error::GeocodeError;
use crate::model::{AddressCollection, GeocodeQuery, ReverseQuery};

pub mod os_places;

pub trait Provider {
    fn geocode_query(&self, query: &GeocodeQuery) -> Result<AddressCollection, GeocodeError>;

    fn reverse_query(&self, query: &ReverseQuery) -> Result<AddressCollection, GeocodeError>;

    fn name(&self) -> &'static str;
}
