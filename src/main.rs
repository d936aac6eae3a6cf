use std::io;

use actix_web::{App, HttpServer, web};
use actix_web::middleware::Logger;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use os_places_geocoder::api::routes;
use os_places_geocoder::config::Config;
use os_places_geocoder::transport::ReqwestTransport;
use os_places_geocoder::OsPlacesGeocoder;

fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    // The blocking HTTP client has to be built outside the async runtime
    let transport = ReqwestTransport::new(config.timeout)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    let geocoder = OsPlacesGeocoder::new(
        transport,
        &config.find_url,
        &config.postcode_url,
        &config.api_key
    )
    .and_then(|geocoder| geocoder.with_user_agent(&config.user_agent))
    .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    let geocoder = web::Data::new(geocoder);
    let server_geocoder = geocoder.clone();

    info!("Listening on {}", config.bind_address);
    let result = actix_rt::System::new().block_on(async move {
        HttpServer::new(move || {
            App::new()
                .app_data(server_geocoder.clone())
                .wrap(Logger::default())
                .configure(routes)
        })
        .bind(config.bind_address.as_str())?
        .run()
        .await
    });

    // Last handle on the HTTP client goes away outside the runtime
    drop(geocoder);
    result
}
