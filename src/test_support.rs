use std::sync::{Arc, Mutex};

use crate::error::GeocodeError;
use crate::provider::os_places::OsPlacesGeocoder;
use crate::transport::{Request, Response, Transport};

pub const FIND_URL: &str = "https://api.os.uk/search/places/v1/find";
pub const POSTCODE_URL: &str = "https://api.os.uk/search/places/v1/postcode";
pub const API_KEY: &str = "test-api-key";

pub const POSTCODE_BN1_1JE: &str = include_str!("../fixtures/postcode_bn1_1je.json");
pub const FIND_DYKE_ROAD: &str = include_str!("../fixtures/find_dyke_road_brighton.json");

/// Answers every request with the same canned response and keeps the
/// requests it was sent.
#[derive(Clone)]
pub struct StubTransport {
    response: Result<Response, String>,
    requests: Arc<Mutex<Vec<Request>>>
}

impl StubTransport {
    pub fn ok(body: &str) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: &str) -> Self {
        StubTransport {
            response: Ok(Response { status, body: body.to_string() }),
            requests: Arc::new(Mutex::new(Vec::new()))
        }
    }

    pub fn failing(message: &str) -> Self {
        StubTransport {
            response: Err(message.to_string()),
            requests: Arc::new(Mutex::new(Vec::new()))
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Request {
        self.requests()
            .pop()
            .expect("No request was sent")
    }
}

impl Transport for StubTransport {
    fn send(&self, request: Request) -> Result<Response, GeocodeError> {
        self.requests.lock().unwrap().push(request);
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(GeocodeError::Transport(message.clone().into())),
        }
    }
}

pub fn geocoder(transport: &StubTransport) -> OsPlacesGeocoder {
    OsPlacesGeocoder::new(transport.clone(), FIND_URL, POSTCODE_URL, API_KEY)
        .expect("Test endpoints should be valid")
}
