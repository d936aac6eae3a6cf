use serde::Serialize;

use crate::error::GeocodeError;
use crate::model::address::OsPlacesAddress;

/// Ordered results of one geocoding call, in the order the API sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AddressCollection {
    addresses: Vec<OsPlacesAddress>
}

impl AddressCollection {
    pub fn new(addresses: Vec<OsPlacesAddress>) -> Self {
        AddressCollection { addresses }
    }

    pub fn first(&self) -> Result<&OsPlacesAddress, GeocodeError> {
        self.addresses.first().ok_or(GeocodeError::CollectionIsEmpty)
    }

    pub fn get(&self, index: usize) -> Result<&OsPlacesAddress, GeocodeError> {
        self.addresses.get(index).ok_or(GeocodeError::OutOfBounds(index))
    }

    pub fn has(&self, index: usize) -> bool {
        index < self.addresses.len()
    }

    /// `length` of `None` runs to the end. Out of range bounds are clamped.
    pub fn slice(&self, offset: usize, length: Option<usize>) -> &[OsPlacesAddress] {
        let start = offset.min(self.addresses.len());
        let end = match length {
            Some(length) => start.saturating_add(length).min(self.addresses.len()),
            None => self.addresses.len(),
        };
        &self.addresses[start..end]
    }

    pub fn all(&self) -> &[OsPlacesAddress] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OsPlacesAddress> {
        self.addresses.iter()
    }
}

impl IntoIterator for AddressCollection {
    type Item = OsPlacesAddress;
    type IntoIter = std::vec::IntoIter<OsPlacesAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.into_iter()
    }
}

impl<'a> IntoIterator for &'a AddressCollection {
    type Item = &'a OsPlacesAddress;
    type IntoIter = std::slice::Iter<'a, OsPlacesAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.iter()
    }
}
