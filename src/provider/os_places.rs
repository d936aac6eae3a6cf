use log::{debug, info};
use reqwest::header::HeaderValue;
use reqwest::Url;
use serde_json::{Map, Value};

use crate::error::GeocodeError;
use crate::model::{AddressCollection, GeocodeQuery, OsPlacesAddress, ReverseQuery};
use crate::postcode;
use crate::provider::Provider;
use crate::transport::{Request, Transport};
use crate::utils::LenientValueExtension;

pub const PROVIDER_NAME: &str = "localgov-ordnance-survey-places";
pub const DEFAULT_USER_AGENT: &str = "LocalGov Drupal";

/// Spatial reference carrying latitude and longitude. The API also knows
/// `BNG`, `EPSG:27700`, `WGS84`, `EPSG:3857` and `EPSG:4258`.
const OS_OUTPUT_FORMAT_WITH_LAT_LON: &str = "EPSG:4326";

// Record key <- Delivery Point Address key
const DPA_FIELDS: [(&str, &str); 14] = [
    ("streetNumber", "BUILDING_NUMBER"),
    ("streetName", "THOROUGHFARE_NAME"),
    ("flat", "SUB_BUILDING_NAME"),
    ("houseName", "BUILDING_NAME"),
    ("org", "ORGANISATION_NAME"),
    ("locality", "POST_TOWN"),
    ("postalCode", "POSTCODE"),
    ("display", "ADDRESS"),
    ("formattedAddress", "ADDRESS"),
    ("latitude", "LAT"),
    ("longitude", "LNG"),
    ("easting", "X_COORDINATE"),
    ("northing", "Y_COORDINATE"),
    ("uprn", "UPRN"),
];

/// Geocoder for the Ordnance Survey Places API.
///
/// Lists addresses matching a postcode or a piece of a street address. Results
/// can be restricted to a single local authority through the
/// `local_custodian_code` query data.
///
/// See https://osdatahub.os.uk/docs/places/overview
pub struct OsPlacesGeocoder {
    transport: Box<dyn Transport>,
    generic_address_query_url: Url,
    postcode_query_url: Url,
    api_key: String,
    user_agent: String
}

impl OsPlacesGeocoder {
    pub fn new<T: Transport + 'static>(
        transport: T,
        generic_address_query_url: &str,
        postcode_query_url: &str,
        api_key: &str
    ) -> Result<Self, GeocodeError> {
        Ok(OsPlacesGeocoder {
            transport: Box::new(transport),
            generic_address_query_url: parse_endpoint(generic_address_query_url)?,
            postcode_query_url: parse_endpoint(postcode_query_url)?,
            api_key: header_value("key", api_key)?,
            user_agent: DEFAULT_USER_AGENT.to_owned()
        })
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, GeocodeError> {
        self.user_agent = header_value("User-Agent", user_agent)?;
        Ok(self)
    }

    pub fn is_postcode(text: &str) -> bool {
        postcode::is_postcode(text)
    }

    fn api_url(&self, query: &GeocodeQuery) -> Url {
        let query_text = query.text().trim();

        let (mut api_url, search_key) = if Self::is_postcode(query_text) {
            (self.postcode_query_url.clone(), "postcode")
        } else {
            (self.generic_address_query_url.clone(), "query")
        };

        {
            let mut params = api_url.query_pairs_mut();
            params
                .append_pair(search_key, query_text)
                .append_pair("output_srs", OS_OUTPUT_FORMAT_WITH_LAT_LON);

            let local_custodian_code = query.data("local_custodian_code");
            if local_custodian_code.is_truthy() {
                params.append_pair(
                    "fq",
                    &format!("LOCAL_CUSTODIAN_CODE:{}", local_custodian_code.coerce_integer())
                );
            }
        }

        api_url
    }

    fn parsed_response(&self, request: Request) -> Result<String, GeocodeError> {
        let url = request.url.to_string();
        let response = self.transport.send(request)?;

        match response.status {
            401 | 403 => return Err(GeocodeError::InvalidCredentials(
                format!("The API key was rejected for \"{}\"", url)
            )),
            429 => return Err(GeocodeError::QuotaExceeded(
                format!("Too many requests for \"{}\"", url)
            )),
            status if status >= 300 => return Err(GeocodeError::invalid_status(&url, status)),
            _ => {},
        }

        if response.body.is_empty() {
            return Err(GeocodeError::invalid_response(&url));
        }

        Ok(response.body)
    }

    fn address_from_place(&self, place: &Value) -> OsPlacesAddress {
        let dpa = place.get("DPA").and_then(Value::as_object);

        let mut data = Map::with_capacity(DPA_FIELDS.len() + 3);
        data.insert("providedBy".into(), PROVIDER_NAME.into());
        data.insert("country".into(), "United Kingdom".into());
        data.insert("countryCode".into(), "GB".into());
        for (key, dpa_key) in DPA_FIELDS.iter() {
            let value = dpa
                .and_then(|d| d.get(*dpa_key))
                .cloned()
                .unwrap_or(Value::Null);
            data.insert((*key).to_string(), value);
        }

        OsPlacesAddress::create_from_array(&data)
    }
}

impl Provider for OsPlacesGeocoder {
    fn geocode_query(&self, query: &GeocodeQuery) -> Result<AddressCollection, GeocodeError> {
        let api_url = self.api_url(query);
        debug!("Querying OS Places: {}", api_url);

        let request = Request::get(api_url.clone())
            .with_header("User-Agent", self.user_agent.as_str())
            .with_header("key", self.api_key.as_str());
        let body = self.parsed_response(request)?;

        let json: Value = serde_json::from_str(&body)
            .map_err(|_| GeocodeError::invalid_response(api_url.as_str()))?;

        let results = match &json {
            Value::Object(map) => map.get("results"),
            // A list never carries a "results" entry
            Value::Array(_) => None,
            _ => return Err(GeocodeError::invalid_response(api_url.as_str())),
        };

        let places: Vec<&Value> = match results {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Object(items)) => items.values().collect(),
            _ => Vec::new(),
        };

        if places.is_empty() {
            info!("No addresses found");
            debug!("No addresses found for \"{}\"", query.text().trim());
            return Ok(AddressCollection::default());
        }

        let addresses = places
            .into_iter()
            .map(|place| self.address_from_place(place))
            .collect::<Vec<_>>();
        info!("Found {} addresses", addresses.len());
        debug!("Found {} addresses for \"{}\"", addresses.len(), query.text().trim());

        Ok(AddressCollection::new(addresses))
    }

    fn reverse_query(&self, _query: &ReverseQuery) -> Result<AddressCollection, GeocodeError> {
        Err(GeocodeError::UnsupportedOperation(
            "The OsPlacesGeocoder provider does not support reverse geocoding yet.".into()
        ))
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

// Header values are sent on every request, reject them once up front
fn header_value(name: &str, value: &str) -> Result<String, GeocodeError> {
    HeaderValue::from_str(value)
        .map(|_| value.to_owned())
        .map_err(|err| GeocodeError::InvalidHeader(format!("{}: {}", name, err)))
}

fn parse_endpoint(url: &str) -> Result<Url, GeocodeError> {
    Url::parse(url).map_err(|err| GeocodeError::InvalidEndpoint(format!("{}: {}", url, err)))
}
