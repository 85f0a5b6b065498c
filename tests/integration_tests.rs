use anyhow::Result;
use httpmock::prelude::*;
use loan_scout::{GraphQlLoanClient, LoanScanner, LoanSource, ScanConfig, YouthLoan};
use serde_json::json;

fn config_for(server: &MockServer) -> ScanConfig {
    let mut config = ScanConfig::default();
    config.source.endpoint = server.url("/graphql");
    config.scan.page_delay_ms = 0;
    config
}

fn page_body(values: serde_json::Value) -> serde_json::Value {
    json!({"data": {"fundraisingLoans": {"values": values}}})
}

#[tokio::test]
async fn test_end_to_end_youth_scan() -> Result<()> {
    let server = MockServer::start();

    let page_1 = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("pageNumber:1,");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(page_body(json!([
                {"__typename": "LoanDirect", "id": "L1", "name": "A", "ageAtTimeOfLoan": 22},
                {"__typename": "LoanBasketItem", "id": "L2", "name": "B"}
            ])));
    });
    let page_2 = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("pageNumber:2,");
        then.status(200).json_body(page_body(json!([
            {"__typename": "LoanDirect", "id": 3001, "name": "C", "ageAtTimeOfLoan": 18},
            {"__typename": "LoanDirect", "id": 3002, "name": "D", "ageAtTimeOfLoan": 17},
            {"__typename": "LoanDirect", "id": 3003, "name": "E", "ageAtTimeOfLoan": null}
        ])));
    });
    let page_3 = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("pageNumber:3,");
        then.status(200).json_body(page_body(json!([
            {"__typename": "LoanDirect", "id": "L4", "name": "F", "ageAtTimeOfLoan": 27},
            {"__typename": "LoanPartner", "id": "L5", "name": "G", "ageAtTimeOfLoan": 20}
        ])));
    });

    let config = config_for(&server);
    let scanner = LoanScanner::new(GraphQlLoanClient::new(&config)?, &config);

    let youth = scanner.collect_youth_loans(3).await;

    page_1.assert_hits(1);
    page_2.assert_hits(1);
    page_3.assert_hits(1);
    assert_eq!(
        youth,
        vec![
            YouthLoan {
                id: "L1".to_string(),
                name: "A".to_string(),
                age: 22
            },
            YouthLoan {
                id: "3001".to_string(),
                name: "C".to_string(),
                age: 18
            },
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_failed_pages_are_skipped_not_fatal() -> Result<()> {
    let server = MockServer::start();

    let blocked = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("pageNumber:1,");
        then.status(403).body("Forbidden");
    });
    let graphql_error = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("pageNumber:2,");
        then.status(200)
            .json_body(json!({"errors": [{"message": "Too many requests"}]}));
    });
    let server_error = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("pageNumber:3,");
        then.status(500).body("internal error");
    });
    let healthy = server.mock(|when, then| {
        when.method(POST).path("/graphql").body_contains("pageNumber:4,");
        then.status(200).json_body(page_body(json!([
            {"__typename": "LoanDirect", "id": "L9", "name": "Z", "ageAtTimeOfLoan": 25}
        ])));
    });

    let config = config_for(&server);
    let scanner = LoanScanner::new(GraphQlLoanClient::new(&config)?, &config);

    let youth = scanner.collect_youth_loans(4).await;

    blocked.assert();
    graphql_error.assert();
    server_error.assert();
    healthy.assert();
    assert_eq!(youth.len(), 1);
    assert_eq!(youth[0].id, "L9");

    Ok(())
}

#[tokio::test]
async fn test_debug_scan_prints_direct_records() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(page_body(json!([
            {"__typename": "LoanDirect", "id": "L1", "name": "A"},
            {"__typename": "LoanBasketItem", "id": "L2", "name": "B"},
            {"__typename": "LoanDirect", "id": "L3", "name": "C", "ageAtTimeOfLoan": 61}
        ])));
    });

    let config = config_for(&server);
    let scanner = LoanScanner::new(GraphQlLoanClient::new(&config)?, &config);

    let direct = scanner.debug_age_field(3).await;

    api_mock.assert_hits(3);
    assert_eq!(direct.len(), 6);
    assert_eq!(
        direct[0].describe_direct().as_deref(),
        Some("LoanDirect | ID: L1 | Name: A | Age: None")
    );
    assert_eq!(
        direct[1].describe_direct().as_deref(),
        Some("LoanDirect | ID: L3 | Name: C | Age: 61")
    );

    Ok(())
}

#[tokio::test]
async fn test_request_shape_sent_to_gateway() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .header("content-type", "application/json")
            .header("accept", "*/*")
            .header("accept-language", "en-US,en;q=0.9")
            .header_exists("user-agent")
            .body_contains("\"query\"")
            .body_contains("fundraisingLoans(limit:20, pageNumber:1, sortBy:mostRecent)")
            .body_contains("ageAtTimeOfLoan");
        then.status(200).json_body(page_body(json!([])));
    });

    let client = GraphQlLoanClient::new(&config_for(&server))?;
    let loans = client.fetch(1, 20).await;

    api_mock.assert();
    assert!(loans.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_timeout_yields_empty_page() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200)
            .delay(std::time::Duration::from_secs(3))
            .json_body(page_body(json!([
                {"__typename": "LoanDirect", "id": "L1", "name": "A", "ageAtTimeOfLoan": 22}
            ])));
    });

    let mut config = config_for(&server);
    config.source.timeout_seconds = 1;
    let client = GraphQlLoanClient::new(&config)?;

    let err = client.try_fetch(1, 20).await.unwrap_err();
    assert_eq!(
        err.fetch_failure(),
        Some(loan_scout::FetchFailure::NetworkFailure)
    );

    Ok(())
}

#[tokio::test]
async fn test_errors_key_with_null_value_empties_the_page() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(json!({
            "errors": null,
            "data": {"fundraisingLoans": {"values": [
                {"__typename": "LoanDirect", "id": "L1", "name": "A", "ageAtTimeOfLoan": 22}
            ]}}
        }));
    });

    let config = config_for(&server);
    let scanner = LoanScanner::new(GraphQlLoanClient::new(&config)?, &config);

    let youth = scanner.collect_youth_loans(1).await;

    api_mock.assert();
    assert!(youth.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_malformed_sibling_does_not_drop_page_matches() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(200).json_body(page_body(json!([
            {"__typename": "LoanDirect", "id": "L1", "name": "A", "ageAtTimeOfLoan": 22},
            {"__typename": "LoanBasketItem", "id": "L2", "name": null},
            {"__typename": "LoanDirect", "id": "L3", "name": null, "ageAtTimeOfLoan": 19},
            {"__typename": "LoanPartner", "id": {"nested": true}, "ageAtTimeOfLoan": "twenty"}
        ])));
    });

    let config = config_for(&server);
    let scanner = LoanScanner::new(GraphQlLoanClient::new(&config)?, &config);

    let youth = scanner.collect_youth_loans(1).await;

    assert_eq!(
        youth,
        vec![YouthLoan {
            id: "L1".to_string(),
            name: "A".to_string(),
            age: 22
        }]
    );

    Ok(())
}
