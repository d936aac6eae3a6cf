use actix_web::{HttpResponse, web};
use log::{error, warn};
use serde::Deserialize;

use crate::error::GeocodeError;
use crate::model::GeocodeQuery;
use crate::provider::os_places::OsPlacesGeocoder;
use crate::provider::Provider;

#[derive(Deserialize)]
pub struct AddressRequest {
    query: String,
    local_custodian_code: Option<String>
}

pub async fn addresses(
    request: web::Query<AddressRequest>,
    geocoder: web::Data<OsPlacesGeocoder>
) -> HttpResponse {
    let request = request.into_inner();

    let mut query = match GeocodeQuery::create(request.query) {
        Ok(query) => query,
        Err(err) => {
            warn!("Rejected address lookup: {}", err);
            return HttpResponse::BadRequest().body(err.to_string());
        },
    };
    if let Some(code) = request.local_custodian_code {
        query = query.with_data("local_custodian_code", code);
    }

    let result = web::block(move || geocoder.geocode_query(&query)).await;

    match result {
        Ok(Ok(addresses)) => HttpResponse::Ok().json(addresses),
        Ok(Err(err)) => {
            error!("Error while retrieving addresses: {}", err);
            error_response(&err)
        },
        Err(err) => {
            error!("Error while retrieving addresses: {}", err);
            HttpResponse::InternalServerError().finish()
        },
    }
}

fn error_response(err: &GeocodeError) -> HttpResponse {
    match err {
        GeocodeError::UnsupportedOperation(_) => HttpResponse::NotImplemented().finish(),
        GeocodeError::InvalidArgument(msg) => HttpResponse::BadRequest().body(msg.clone()),
        // Misconfigured server, not the caller's fault
        GeocodeError::InvalidHeader(_) => HttpResponse::InternalServerError().finish(),
        err if err.is_upstream() => HttpResponse::BadGateway().finish(),
        _ => HttpResponse::InternalServerError().finish(),
    }
}
