use std::sync::Arc;

use dividend_screener::{BatchBuilder, present};
use httpmock::Method::GET;

use crate::common;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn batch_against_yahoo_endpoints() {
    let server = common::setup_server();
    let (cookie, crumb) = common::mock_cookie_crumb(&server);

    let aaa = common::mock_summary(
        &server,
        "AAA",
        common::summary_body(Some(0.031), Some(2.5), Some(4.2)),
    );
    let bbb = common::mock_summary(
        &server,
        "BBB",
        common::summary_body(Some(0.02), Some(1.1), None),
    );
    let ccc = server.mock(|when, then| {
        when.method(GET).path("/v10/finance/quoteSummary/CCC");
        then.status(500).body("internal error");
    });
    let ddd = common::mock_summary(
        &server,
        "DDD",
        common::summary_body(Some(0.055), Some(3.0), Some(1.7)),
    );

    let client = Arc::new(common::client_for(&server));
    let report = BatchBuilder::new(client)
        .symbols(["AAA", "BBB", "CCC", "DDD"])
        .threads(2)
        .run()
        .await;

    aaa.assert();
    bbb.assert();
    ccc.assert();
    ddd.assert();
    cookie.assert_calls(1);
    crumb.assert_calls(1);

    let counts = report.counts();
    assert_eq!((counts.records, counts.empty, counts.failed), (2, 1, 1));

    let mut records = report.into_records();
    present::rank(&mut records);
    let order: Vec<_> = records.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(order, vec!["DDD", "AAA"]);

    let table = present::render_table(&records);
    assert!(table.contains("5.50%"));
    assert!(table.contains("3.10%"));
    assert!(!table.contains("BBB"));
}
