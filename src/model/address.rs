use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::utils::LenientValueExtension;

const DEFAULT_PROVIDER: &str = "n/a";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64
}

/// All-numeric Ordnance Survey National Grid reference.
///
/// See https://en.wikipedia.org/wiki/Ordnance_Survey_National_Grid#All-numeric_grid_references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OsGridRef {
    easting: u32,
    northing: u32
}

impl OsGridRef {
    pub fn new(easting: u32, northing: u32) -> Self {
        OsGridRef { easting, northing }
    }

    pub fn easting(&self) -> u32 {
        self.easting
    }

    pub fn northing(&self) -> u32 {
        self.northing
    }
}

/// One address returned by the OS Places API, keyed by its UPRN.
///
/// Records are only built through [`OsPlacesAddress::create_from_array`] and
/// are read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OsPlacesAddress {
    provided_by: String,
    coordinates: Option<Coordinates>,
    street_number: Option<String>,
    street_name: Option<String>,
    postal_code: Option<String>,
    locality: Option<String>,
    sub_locality: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
    timezone: Option<String>,
    formatted_address: Option<String>,
    uprn: String,
    display: String,
    flat: String,
    house_name: String,
    org: String,
    os_grid_ref: Option<OsGridRef>
}

impl OsPlacesAddress {
    /// Builds a record from its `to_array` shape.
    ///
    /// Missing text fields fall back to their defaults. The grid reference
    /// is kept only when both `easting` and `northing` read as non-negative
    /// numbers. A present but non-numeric value such as `""` drops the whole
    /// grid reference rather than turning into `0`.
    pub fn create_from_array(data: &Map<String, Value>) -> Self {
        let latitude = data.get("latitude").as_float();
        let longitude = data.get("longitude").as_float();
        let coordinates = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        };

        // Never one coordinate without the other
        let easting = data.get("easting").as_grid_unit();
        let northing = data.get("northing").as_grid_unit();
        let os_grid_ref = match (easting, northing) {
            (Some(easting), Some(northing)) => Some(OsGridRef::new(easting, northing)),
            _ => None,
        };

        OsPlacesAddress {
            provided_by: data
                .get("providedBy")
                .as_text()
                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            coordinates,
            street_number: data.get("streetNumber").as_text(),
            street_name: data.get("streetName").as_text(),
            postal_code: data.get("postalCode").as_text(),
            locality: data.get("locality").as_text(),
            sub_locality: data.get("subLocality").as_text(),
            country: data.get("country").as_text(),
            country_code: data.get("countryCode").as_text(),
            timezone: data.get("timezone").as_text(),
            formatted_address: data.get("formattedAddress").as_text(),
            uprn: data.get("uprn").as_text().unwrap_or_default(),
            display: data.get("display").as_text().unwrap_or_default(),
            flat: data.get("flat").as_text().unwrap_or_default(),
            house_name: data.get("houseName").as_text().unwrap_or_default(),
            org: data.get("org").as_text().unwrap_or_default(),
            os_grid_ref
        }
    }

    pub fn to_array(&self) -> Map<String, Value> {
        let mut array = Map::new();
        array.insert("providedBy".into(), self.provided_by.clone().into());
        array.insert("latitude".into(), self.latitude().into());
        array.insert("longitude".into(), self.longitude().into());
        array.insert("streetNumber".into(), self.street_number.clone().into());
        array.insert("streetName".into(), self.street_name.clone().into());
        array.insert("postalCode".into(), self.postal_code.clone().into());
        array.insert("locality".into(), self.locality.clone().into());
        array.insert("subLocality".into(), self.sub_locality.clone().into());
        array.insert("country".into(), self.country.clone().into());
        array.insert("countryCode".into(), self.country_code.clone().into());
        array.insert("timezone".into(), self.timezone.clone().into());
        array.insert("formattedAddress".into(), self.formatted_address.clone().into());
        array.insert("uprn".into(), self.uprn.clone().into());
        array.insert("display".into(), self.display.clone().into());
        array.insert("flat".into(), self.flat.clone().into());
        array.insert("houseName".into(), self.house_name.clone().into());
        array.insert("org".into(), self.org.clone().into());

        if let Some(grid_ref) = self.os_grid_ref {
            array.insert("easting".into(), grid_ref.easting().into());
            array.insert("northing".into(), grid_ref.northing().into());
        }

        array
    }

    pub fn provided_by(&self) -> &str {
        &self.provided_by
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.longitude)
    }

    pub fn street_number(&self) -> Option<&str> {
        self.street_number.as_deref()
    }

    pub fn street_name(&self) -> Option<&str> {
        self.street_name.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    pub fn sub_locality(&self) -> Option<&str> {
        self.sub_locality.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    pub fn formatted_address(&self) -> Option<&str> {
        self.formatted_address.as_deref()
    }

    /// Unique Property Reference Number, empty when the API did not send one.
    pub fn uprn(&self) -> &str {
        &self.uprn
    }

    /// The full address in one line.
    pub fn display_name(&self) -> &str {
        &self.display
    }

    pub fn flat(&self) -> &str {
        &self.flat
    }

    pub fn house_name(&self) -> &str {
        &self.house_name
    }

    pub fn organisation_name(&self) -> &str {
        &self.org
    }

    pub fn os_grid_ref(&self) -> Option<OsGridRef> {
        self.os_grid_ref
    }
}

impl Serialize for OsPlacesAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}
