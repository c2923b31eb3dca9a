use crate::common::{TestApp, routes};

#[tokio::test]
async fn health_reports_latency_and_pool_occupancy() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::HEALTH).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["status"], "ok");
    assert!(res.body["db"]["latency_ms"].as_f64().unwrap() >= 0.0);

    let pool = &res.body["db"]["pool"];
    let total = pool["total"].as_u64().unwrap();
    let idle = pool["idle"].as_u64().unwrap();
    let in_use = pool["in_use"].as_u64().unwrap();
    assert!(total >= 1);
    assert_eq!(total, idle + in_use);
}
