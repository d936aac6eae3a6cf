use std::collections::HashMap;

use serde_json::Value;

use crate::error::GeocodeError;
use crate::model::address::Coordinates;

/// A forward lookup: free text plus provider specific data.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeQuery {
    text: String,
    data: HashMap<String, Value>
}

impl GeocodeQuery {
    pub fn create<S: Into<String>>(text: S) -> Result<Self, GeocodeError> {
        let text = text.into();
        if text.is_empty() {
            return Err(GeocodeError::InvalidArgument("Geocode query cannot be empty".into()));
        }

        Ok(GeocodeQuery { text, data: HashMap::new() })
    }

    pub fn with_data<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReverseQuery {
    coordinates: Coordinates,
    data: HashMap<String, Value>
}

impl ReverseQuery {
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        ReverseQuery {
            coordinates: Coordinates { latitude, longitude },
            data: HashMap::new()
        }
    }

    pub fn with_data<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}
