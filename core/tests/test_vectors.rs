//! Verify build/parse and aggregation against JSON vectors in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use covid_core::{
    aggregate, AggregateError, ApiError, CountrySummary, CovidClient, HttpMethod, HttpResponse,
    MalformedPolicy, RawRecord,
};

const BASE_URL: &str = "http://localhost:5268";

fn client() -> CovidClient {
    CovidClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        "PATCH" => HttpMethod::Patch,
        other => panic!("unknown method: {other}"),
    }
}

fn string_pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dailies
// ---------------------------------------------------------------------------

#[test]
fn dailies_test_vectors() {
    let raw = include_str!("../../test-vectors/dailies.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    let expected_req = &vectors["expected_request"];

    // Verify build
    let req = c.build_list_dailies();
    assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()));
    assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()));
    assert_eq!(req.query, string_pairs(&expected_req["query"]));
    assert_eq!(req.url(), format!("{BASE_URL}{}", expected_req["url"].as_str().unwrap()));
    assert!(req.body.is_none());

    // Verify parse
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse_list_dailies(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
                "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError"),
                "DeserializationError" => assert!(
                    matches!(err, ApiError::DeserializationError(_)),
                    "{name}: expected DeserializationError"
                ),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let records = result.unwrap();
            let expected: Vec<RawRecord> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(records, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[test]
fn aggregate_test_vectors() {
    let raw = include_str!("../../test-vectors/aggregate.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let records: Vec<RawRecord> = serde_json::from_value(case["records"].clone()).unwrap();

        if let Some(expected_error) = case.get("expected_error") {
            let err = aggregate(&records, MalformedPolicy::Abort).unwrap_err();
            assert_eq!(
                err,
                AggregateError::MissingCountry {
                    index: expected_error["index"].as_u64().unwrap() as usize,
                    id: expected_error["id"].as_i64().unwrap(),
                },
                "{name}: abort error"
            );

            let skipped = aggregate(&records, MalformedPolicy::Skip).unwrap();
            let expected: Vec<CountrySummary> =
                serde_json::from_value(case["expected_skip"].clone()).unwrap();
            assert_eq!(skipped, expected, "{name}: skip result");
        } else {
            let rows = aggregate(&records, MalformedPolicy::Abort).unwrap();
            let expected: Vec<CountrySummary> =
                serde_json::from_value(case["expected"].clone()).unwrap();
            assert_eq!(rows, expected, "{name}: aggregated rows");
        }
    }
}
