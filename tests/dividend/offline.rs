use std::time::Duration;

use dividend_screener::{
    Backoff, DividendBuilder, FetchOutcome, MetricField, RetryConfig, ScreenerError, ZeroPolicy,
    fetch_dividend,
};
use httpmock::Method::GET;

use crate::common;

#[tokio::test]
async fn snapshot_reads_all_three_metrics() {
    let server = common::setup_server();
    let (cookie, crumb) = common::mock_cookie_crumb(&server);
    let ko = common::mock_summary(
        &server,
        "KO",
        common::summary_body(Some(0.0289), Some(1.94), Some(11.2)),
    );

    let client = common::client_for(&server);
    let snap = DividendBuilder::new(&client, "KO").snapshot().await.unwrap();

    cookie.assert();
    crumb.assert();
    ko.assert();
    assert_eq!(snap.dividend_yield, Some(0.0289));
    assert_eq!(snap.trailing_annual_dividend_rate, Some(1.94));
    assert_eq!(snap.price_to_book, Some(11.2));
}

#[tokio::test]
async fn complete_snapshot_becomes_a_record() {
    let server = common::setup_server();
    common::mock_cookie_crumb(&server);
    common::mock_summary(
        &server,
        "KO",
        common::summary_body(Some(0.0289), Some(1.94), Some(11.2)),
    );

    let client = common::client_for(&server);
    let outcome = fetch_dividend(&client, "KO", ZeroPolicy::default(), Duration::from_secs(5)).await;

    let FetchOutcome::Record(rec) = outcome else {
        panic!("expected a record, got {outcome:?}");
    };
    assert_eq!(rec.symbol, "KO");
    assert_eq!(rec.dividend, 1.94);
    assert_eq!(rec.dividend_yield_percent, 0.0289 * 100.0);
    assert_eq!(rec.price_to_book, 11.2);
    assert_eq!(rec.profile_url, "https://finance.yahoo.com/quote/KO");
}

#[tokio::test]
async fn missing_metric_is_empty_not_failed() {
    let server = common::setup_server();
    common::mock_cookie_crumb(&server);
    common::mock_summary(
        &server,
        "GOOGL",
        common::summary_body(None, Some(0.8), Some(7.0)),
    );

    let client = common::client_for(&server);
    let outcome =
        fetch_dividend(&client, "GOOGL", ZeroPolicy::default(), Duration::from_secs(5)).await;

    match outcome {
        FetchOutcome::Empty { symbol, missing } => {
            assert_eq!(symbol, "GOOGL");
            assert_eq!(missing, vec![MetricField::DividendYield]);
        }
        other => panic!("expected Empty, got {other:?}"),
    }
}

#[tokio::test]
async fn absent_modules_leave_every_metric_missing() {
    let server = common::setup_server();
    common::mock_cookie_crumb(&server);
    common::mock_summary(
        &server,
        "BTC-USD",
        r#"{"quoteSummary":{"result":[{}],"error":null}}"#.to_string(),
    );

    let client = common::client_for(&server);
    let snap = DividendBuilder::new(&client, "BTC-USD")
        .snapshot()
        .await
        .unwrap();
    assert_eq!(snap.missing(ZeroPolicy::default()).len(), 3);

    let rec = DividendBuilder::new(&client, "BTC-USD")
        .record(ZeroPolicy::Accept)
        .await
        .unwrap();
    assert!(rec.is_none());
}

#[tokio::test]
async fn unknown_symbol_is_a_failure() {
    let server = common::setup_server();
    common::mock_cookie_crumb(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/ZZZZ");
        then.status(404)
            .header("content-type", "application/json")
            .body(common::not_found_body("ZZZZ"));
    });

    let client = common::client_for(&server);
    let outcome =
        fetch_dividend(&client, "ZZZZ", ZeroPolicy::default(), Duration::from_secs(5)).await;

    match outcome {
        FetchOutcome::Failed { symbol, error } => {
            assert_eq!(symbol, "ZZZZ");
            assert!(
                error.to_string().contains("Quote not found"),
                "unexpected error: {error}"
            );
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_without_json_maps_to_status() {
    let server = common::setup_server();
    common::mock_cookie_crumb(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/MSFT");
        then.status(503).body("upstream unavailable");
    });

    let client = common::client_for(&server);
    let err = DividendBuilder::new(&client, "MSFT")
        .snapshot()
        .await
        .unwrap_err();
    assert!(matches!(err, ScreenerError::Status { status: 503, .. }), "got {err:?}");
}

#[tokio::test]
async fn slow_lookup_times_out() {
    let server = common::setup_server();
    common::mock_cookie_crumb(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/SLOW");
        then.status(200)
            .delay(Duration::from_millis(1500))
            .header("content-type", "application/json")
            .body(common::summary_body(Some(0.01), Some(1.0), Some(1.0)));
    });

    let client = common::client_for(&server);
    let outcome =
        fetch_dividend(&client, "SLOW", ZeroPolicy::default(), Duration::from_millis(200)).await;

    match outcome {
        FetchOutcome::Failed {
            error: ScreenerError::Timeout { symbol, after },
            ..
        } => {
            assert_eq!(symbol, "SLOW");
            assert_eq!(after, Duration::from_millis(200));
        }
        other => panic!("expected a timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn per_call_retry_policy_overrides_the_client() {
    let server = common::setup_server();
    common::mock_cookie_crumb(&server);
    let flaky = server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/PEP");
        then.status(503).body("try again");
    });

    let client = common::client_for(&server);
    let retry = RetryConfig {
        max_retries: 2,
        backoff: Backoff::Fixed(Duration::from_millis(1)),
        retry_on_status: vec![503],
        ..RetryConfig::default()
    };
    let err = DividendBuilder::new(&client, "PEP")
        .retry_policy(Some(retry))
        .snapshot()
        .await
        .unwrap_err();

    assert!(matches!(err, ScreenerError::Status { status: 503, .. }), "got {err:?}");
    flaky.assert_calls(3);
}
