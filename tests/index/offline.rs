use httpmock::{Method::GET, MockServer};
use url::Url;

use dividend_screener::{IndexConfig, IndexResolver, ScreenerError};

use crate::common;

const CONSTITUENTS: &str = r#"<!DOCTYPE html>
<html><body>
<table class="wikitable sortable" id="constituents">
<tbody>
<tr><th>Company</th><th>Exchange</th><th>Symbol</th><th>Industry</th></tr>
<tr><td><a href="/wiki/3M">3M</a></td><td>NYSE</td><td><a href="https://www.nyse.com/quote/XNYS:MMM">MMM</a></td><td>Conglomerate</td></tr>
<tr><td>Amgen</td><td>NASDAQ</td><td><a href="https://www.nasdaq.com/market-activity/stocks/amgn">AMGN</a></td><td>Biopharmaceutical</td></tr>
<tr><td>Coca-Cola</td><td>NYSE</td><td>KO</td><td>Drinks</td></tr>
</tbody></table>
</body></html>"#;

fn resolver(server: &MockServer, config: IndexConfig) -> IndexResolver {
    IndexResolver::builder(config)
        .api_base(Url::parse(&format!("{}/w/api.php", server.base_url())).unwrap())
        .build()
        .unwrap()
}

fn mock_page_query<'a>(server: &'a MockServer, title: &str, body: String) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/w/api.php")
            .query_param("action", "query")
            .query_param("prop", "info")
            .query_param("inprop", "url")
            .query_param("titles", title);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

#[tokio::test]
async fn resolves_ticker_to_constituent_symbols() {
    let server = common::setup_server();
    let page_url = format!("{}/wiki/Dow_Jones_Industrial_Average", server.base_url());

    let query = mock_page_query(
        &server,
        "Dow Jones Industrial Average",
        format!(
            r#"{{"batchcomplete":true,"query":{{"pages":[{{"pageid":92,"ns":0,"title":"Dow Jones Industrial Average","fullurl":"{page_url}"}}]}}}}"#
        ),
    );
    let page = server.mock(|when, then| {
        when.method(GET).path("/wiki/Dow_Jones_Industrial_Average");
        then.status(200)
            .header("content-type", "text/html")
            .body(CONSTITUENTS);
    });

    let symbols = resolver(&server, IndexConfig::default())
        .resolve("^DJI")
        .await
        .unwrap();

    query.assert();
    page.assert();
    assert_eq!(symbols, vec!["MMM", "AMGN", "KO"]);
}

#[tokio::test]
async fn unmapped_ticker_is_index_not_found_without_network() {
    let server = common::setup_server();
    let any = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let err = resolver(&server, IndexConfig::default())
        .resolve("^NOPE")
        .await
        .unwrap_err();

    assert!(matches!(err, ScreenerError::IndexNotFound(ref t) if t == "^NOPE"));
    assert!(err.is_resolution());
    assert_eq!(err.to_string(), "Index Not Found");
    any.assert_calls(0);
}

#[tokio::test]
async fn missing_page_is_index_not_found() {
    let server = common::setup_server();
    let config = IndexConfig::from_yaml_str("index_mapping:\n  \"^XYZ\": \"No Such Index\"\n").unwrap();
    mock_page_query(
        &server,
        "No Such Index",
        r#"{"batchcomplete":true,"query":{"pages":[{"ns":0,"title":"No Such Index","missing":true}]}}"#
            .to_string(),
    );

    let resolver = resolver(&server, config);
    assert_eq!(resolver.config().page_title("^XYZ"), Some("No Such Index"));

    let err = resolver.resolve("^XYZ").await.unwrap_err();
    assert!(matches!(err, ScreenerError::IndexNotFound(ref t) if t == "No Such Index"));
}

#[tokio::test]
async fn page_without_symbol_table_is_a_resolution_error() {
    let server = common::setup_server();
    let page_url = format!("{}/wiki/Plain", server.base_url());
    let config = IndexConfig::from_yaml_str("index_mapping:\n  \"^P\": \"Plain\"\n").unwrap();
    mock_page_query(
        &server,
        "Plain",
        format!(r#"{{"query":{{"pages":[{{"pageid":1,"title":"Plain","fullurl":"{page_url}"}}]}}}}"#),
    );
    server.mock(|when, then| {
        when.method(GET).path("/wiki/Plain");
        then.status(200)
            .body("<table><tr><th>Name</th></tr><tr><td>x</td></tr></table>");
    });

    let err = resolver(&server, config).resolve("^P").await.unwrap_err();
    assert!(matches!(err, ScreenerError::SymbolColumnNotFound));
    assert!(err.is_resolution());
}

#[tokio::test]
async fn page_fetch_error_is_not_a_resolution_error() {
    let server = common::setup_server();
    let page_url = format!("{}/wiki/Broken", server.base_url());
    let config = IndexConfig::from_yaml_str("index_mapping:\n  \"^B\": \"Broken\"\n").unwrap();
    mock_page_query(
        &server,
        "Broken",
        format!(r#"{{"query":{{"pages":[{{"pageid":1,"title":"Broken","fullurl":"{page_url}"}}]}}}}"#),
    );
    server.mock(|when, then| {
        when.method(GET).path("/wiki/Broken");
        then.status(502);
    });

    let err = resolver(&server, config).resolve("^B").await.unwrap_err();
    assert!(matches!(err, ScreenerError::Status { status: 502, .. }));
    assert!(!err.is_resolution());
}
