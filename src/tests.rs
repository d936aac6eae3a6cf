#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use crate::error::GeocodeError;
    use crate::model::{GeocodeQuery, OsGridRef, ReverseQuery};
    use crate::provider::os_places::OsPlacesGeocoder;
    use crate::provider::Provider;
    use crate::test_support::{
        API_KEY, FIND_DYKE_ROAD, POSTCODE_BN1_1JE, StubTransport, geocoder,
    };
    use crate::transport::Request;

    fn query_params(request: &Request) -> HashMap<String, String> {
        request.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn geocode(transport: &StubTransport, text: &str) -> Result<crate::AddressCollection, GeocodeError> {
        geocoder(transport).geocode_query(&GeocodeQuery::create(text).unwrap())
    }

    #[test]
    fn test_is_postcode() {
        assert!(OsPlacesGeocoder::is_postcode("BN1 1JE"));
        assert!(OsPlacesGeocoder::is_postcode("SW1A 1AA"));
        assert!(!OsPlacesGeocoder::is_postcode("Dyke road, Brighton"));
    }

    #[test]
    fn test_geocode_query_for_postcode() {
        let transport = StubTransport::ok(POSTCODE_BN1_1JE);

        let result = geocode(&transport, "BN1 1JE").unwrap();
        assert_eq!(result.len(), 3);

        let address = result.first().unwrap().to_array();
        assert_eq!(address["uprn"], json!("22062038"));
        assert_eq!(address["easting"], json!(531044));

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/search/places/v1/postcode");
        let params = query_params(&request);
        assert_eq!(params.get("postcode").map(String::as_str), Some("BN1 1JE"));
        assert_eq!(params.get("output_srs").map(String::as_str), Some("EPSG:4326"));
        assert!(!params.contains_key("query"));
        assert!(!params.contains_key("fq"));
    }

    #[test]
    fn test_geocode_query_for_street_address() {
        let transport = StubTransport::ok(FIND_DYKE_ROAD);

        let result = geocode(&transport, "Dyke road, Brighton").unwrap();

        let address = result.first().unwrap().to_array();
        assert_eq!(address["uprn"], json!("22047674"));
        assert_eq!(address["easting"], json!(530742));
        assert_eq!(address["latitude"], json!(50.824172));
        assert_eq!(address["display"], json!("11, DYKE ROAD, BRIGHTON, BN1 3FE"));

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/search/places/v1/find");
        assert_eq!(
            request.url.query(),
            Some("query=Dyke+road%2C+Brighton&output_srs=EPSG%3A4326")
        );
    }

    #[test]
    fn test_dpa_fields_are_mapped() {
        let transport = StubTransport::ok(POSTCODE_BN1_1JE);
        let result = geocode(&transport, "BN1 1JE").unwrap();

        let town_hall = result.first().unwrap();
        assert_eq!(town_hall.provided_by(), "localgov-ordnance-survey-places");
        assert_eq!(town_hall.organisation_name(), "BRIGHTON & HOVE CITY COUNCIL");
        assert_eq!(town_hall.house_name(), "BRIGHTON TOWN HALL");
        assert_eq!(town_hall.street_name(), Some("BARTHOLOMEW SQUARE"));
        assert_eq!(town_hall.street_number(), None);
        assert_eq!(town_hall.flat(), "");
        assert_eq!(town_hall.locality(), Some("BRIGHTON"));
        assert_eq!(town_hall.postal_code(), Some("BN1 1JE"));
        assert_eq!(town_hall.country(), Some("United Kingdom"));
        assert_eq!(town_hall.country_code(), Some("GB"));
        assert_eq!(town_hall.formatted_address(), Some(town_hall.display_name()));
        assert_eq!(town_hall.os_grid_ref(), Some(OsGridRef::new(531044, 104045)));

        let flat = result.get(2).unwrap();
        assert_eq!(flat.uprn(), "22166454");
        assert_eq!(flat.flat(), "FLAT 1");
        assert_eq!(flat.street_number(), Some("2"));
        assert_eq!(flat.latitude(), Some(50.8213331));
        assert_eq!(flat.longitude(), Some(-0.1398374));
    }

    #[test]
    fn test_results_keep_api_order() {
        let transport = StubTransport::ok(POSTCODE_BN1_1JE);
        let result = geocode(&transport, "BN1 1JE").unwrap();

        let uprns = result.iter().map(|a| a.uprn()).collect::<Vec<_>>();
        assert_eq!(uprns, vec!["22062038", "22166453", "22166454"]);
    }

    #[test]
    fn test_authentication_headers() {
        let transport = StubTransport::ok(POSTCODE_BN1_1JE);
        geocode(&transport, "BN1 1JE").unwrap();

        let request = transport.last_request();
        assert_eq!(request.header("User-Agent"), Some("LocalGov Drupal"));
        assert_eq!(request.header("key"), Some(API_KEY));
    }

    #[test]
    fn test_custom_user_agent() {
        let transport = StubTransport::ok(POSTCODE_BN1_1JE);
        geocoder(&transport)
            .with_user_agent("Brighton & Hove")
            .unwrap()
            .geocode_query(&GeocodeQuery::create("BN1 1JE").unwrap())
            .unwrap();

        assert_eq!(transport.last_request().header("user-agent"), Some("Brighton & Hove"));
    }

    #[test]
    fn test_unsendable_header_values_are_rejected_up_front() {
        let transport = StubTransport::ok(POSTCODE_BN1_1JE);
        let result = geocoder(&transport).with_user_agent("LocalGov\nDrupal");
        assert!(matches!(result, Err(GeocodeError::InvalidHeader(_))));

        let result = OsPlacesGeocoder::new(
            transport.clone(),
            "https://api.os.uk/search/places/v1/find",
            "https://api.os.uk/search/places/v1/postcode",
            "test-api-key\r"
        );
        assert!(matches!(result, Err(GeocodeError::InvalidHeader(_))));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_query_text_is_trimmed() {
        let transport = StubTransport::ok(POSTCODE_BN1_1JE);
        geocode(&transport, "  bn1 1je \n").unwrap();

        let request = transport.last_request();
        assert_eq!(request.url.path(), "/search/places/v1/postcode");
        assert_eq!(query_params(&request).get("postcode").map(String::as_str), Some("bn1 1je"));
    }

    #[test]
    fn test_local_custodian_code_filter() {
        let cases = vec![
            (json!("1445"), "LOCAL_CUSTODIAN_CODE:1445"),
            (json!(1445), "LOCAL_CUSTODIAN_CODE:1445"),
            (json!(1445.6), "LOCAL_CUSTODIAN_CODE:1445"),
            (json!("1445 Brighton"), "LOCAL_CUSTODIAN_CODE:1445"),
        ];

        for (code, expected) in cases {
            let transport = StubTransport::ok(FIND_DYKE_ROAD);
            let query = GeocodeQuery::create("Dyke road, Brighton")
                .unwrap()
                .with_data("local_custodian_code", code);
            geocoder(&transport).geocode_query(&query).unwrap();

            let params = query_params(&transport.last_request());
            assert_eq!(params.get("fq").map(String::as_str), Some(expected));
        }
    }

    #[test]
    fn test_falsy_local_custodian_code_is_ignored() {
        for code in vec![json!("0"), json!(0), json!(""), json!(false), json!(null)] {
            let transport = StubTransport::ok(FIND_DYKE_ROAD);
            let query = GeocodeQuery::create("Dyke road, Brighton")
                .unwrap()
                .with_data("local_custodian_code", code);
            geocoder(&transport).geocode_query(&query).unwrap();

            assert!(!query_params(&transport.last_request()).contains_key("fq"));
        }
    }

    #[test]
    fn test_invalid_json_is_an_invalid_server_response() {
        let transport = StubTransport::ok("<html>Service Unavailable</html>");

        match geocode(&transport, "Dyke road, Brighton") {
            Err(GeocodeError::InvalidServerResponse { url, status }) => {
                assert_eq!(url, transport.last_request().url.to_string());
                assert!(url.starts_with("https://api.os.uk/search/places/v1/find?query="));
                assert_eq!(status, None);
            },
            other => panic!("Expected an invalid server response, got {:?}", other),
        }
    }

    #[test]
    fn test_non_mapping_json_is_an_invalid_server_response() {
        for body in &["42", "\"results\"", "null", "true"] {
            let transport = StubTransport::ok(body);
            assert!(matches!(
                geocode(&transport, "BN1 1JE"),
                Err(GeocodeError::InvalidServerResponse { .. })
            ));
        }
    }

    #[test]
    fn test_empty_body_is_an_invalid_server_response() {
        let transport = StubTransport::ok("");
        assert!(matches!(
            geocode(&transport, "BN1 1JE"),
            Err(GeocodeError::InvalidServerResponse { status: None, .. })
        ));
    }

    #[test]
    fn test_no_results() {
        let bodies = [
            r#"{"header": {"totalresults": 0}, "results": []}"#,
            r#"{"header": {"totalresults": 0}}"#,
            r#"{"results": null}"#,
            "{}",
            "[]",
        ];

        for body in &bodies {
            let transport = StubTransport::ok(body);
            let result = geocode(&transport, "ZZ1 1ZZ").unwrap();
            assert_eq!(result.len(), 0, "body: {}", body);
        }
    }

    #[test]
    fn test_entry_without_dpa_uses_defaults() {
        let transport = StubTransport::ok(r#"{"results": [{"LPI": {"UPRN": "1"}}, {"DPA": {"UPRN": "22047674"}}]}"#);
        let result = geocode(&transport, "Dyke road").unwrap();

        assert_eq!(result.len(), 2);
        let empty = result.first().unwrap();
        assert_eq!(empty.uprn(), "");
        assert_eq!(empty.os_grid_ref(), None);
        assert_eq!(empty.country_code(), Some("GB"));
        assert_eq!(result.get(1).unwrap().uprn(), "22047674");
    }

    #[test]
    fn test_error_statuses() {
        let transport = StubTransport::with_status(401, r#"{"fault": {"faultstring": "Invalid ApiKey"}}"#);
        assert!(matches!(geocode(&transport, "BN1 1JE"), Err(GeocodeError::InvalidCredentials(_))));

        let transport = StubTransport::with_status(403, "");
        assert!(matches!(geocode(&transport, "BN1 1JE"), Err(GeocodeError::InvalidCredentials(_))));

        let transport = StubTransport::with_status(429, "");
        assert!(matches!(geocode(&transport, "BN1 1JE"), Err(GeocodeError::QuotaExceeded(_))));

        let transport = StubTransport::with_status(500, r#"{"error": {"statuscode": 500}}"#);
        assert!(matches!(
            geocode(&transport, "BN1 1JE"),
            Err(GeocodeError::InvalidServerResponse { status: Some(500), .. })
        ));
    }

    #[test]
    fn test_transport_failure_is_passed_through() {
        let transport = StubTransport::failing("connection refused");
        match geocode(&transport, "BN1 1JE") {
            Err(GeocodeError::Transport(inner)) => assert_eq!(inner.to_string(), "connection refused"),
            other => panic!("Expected a transport error, got {:?}", other),
        }
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_reverse_query_is_unsupported() {
        let transport = StubTransport::ok(POSTCODE_BN1_1JE);
        let query = ReverseQuery::from_coordinates(50.8214626, -0.1400561);

        assert!(matches!(
            geocoder(&transport).reverse_query(&query),
            Err(GeocodeError::UnsupportedOperation(_))
        ));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_name() {
        let transport = StubTransport::ok("{}");
        assert_eq!(geocoder(&transport).name(), "localgov-ordnance-survey-places");
    }

    #[test]
    fn test_invalid_endpoint() {
        let result = OsPlacesGeocoder::new(
            StubTransport::ok("{}"),
            "not a url",
            "https://api.os.uk/search/places/v1/postcode",
            API_KEY
        );
        assert!(matches!(result, Err(GeocodeError::InvalidEndpoint(_))));
    }
}
