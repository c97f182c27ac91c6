use apicheck::http::Client;
use apicheck::runner::{TestExecutor, TestRunner, TestStatus};
use apicheck::TestCase;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_item(server: &MockServer, id: usize, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/items/{}", id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": id}))
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

/// 并发模式下结果顺序与输入一致，摘要与顺序模式相同
#[tokio::test]
async fn test_concurrent_run_preserves_order() {
    let mock_server = MockServer::start().await;

    // 越靠前的请求越慢，乱序完成
    let count = 8;
    for id in 0..count {
        mount_item(&mock_server, id, ((count - id) * 40) as u64).await;
    }

    let mut cases: Vec<TestCase> = (0..count)
        .map(|id| {
            TestCase::new(format!("item {}", id), format!("/items/{}", id), "GET")
                .expect_value("id", id)
        })
        .collect();
    // 一个失败用例混在中间
    cases[3] = TestCase::new("item 3", "/items/3", "GET").expect_value("id", 999);

    let concurrent = TestRunner::new(TestExecutor::new(Client::new().unwrap()))
        .with_concurrency(4)
        .run(&mock_server.uri(), &cases)
        .await;

    let names: Vec<_> = concurrent.results.iter().map(|r| r.name.clone()).collect();
    let expected: Vec<_> = (0..count).map(|id| format!("item {}", id)).collect();
    assert_eq!(names, expected);
    assert_eq!(concurrent.results[3].status, TestStatus::Failed);

    let sequential = TestRunner::new(TestExecutor::new(Client::new().unwrap()))
        .run(&mock_server.uri(), &cases)
        .await;

    assert_eq!(concurrent.summary.passed, sequential.summary.passed);
    assert_eq!(concurrent.summary.failed, sequential.summary.failed);
    assert_eq!(concurrent.summary.passed, count - 1);

    let statuses = |report: &apicheck::RunReport| {
        report
            .results
            .iter()
            .map(|r| (r.status, r.error_message()))
            .collect::<Vec<_>>()
    };
    assert_eq!(statuses(&concurrent), statuses(&sequential));
}

/// 记录同时处理中的请求数及其峰值
#[derive(Default)]
struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

/// 每个请求都延迟 `delay` 再返回 `{"ok": true}` 的 HTTP 服务
async fn start_counting_server(delay: Duration) -> (String, Arc<InFlight>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let in_flight = Arc::new(InFlight::default());

    let state = Arc::clone(&in_flight);
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }

                let now = state.current.fetch_add(1, Ordering::SeqCst) + 1;
                state.peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                state.current.fetch_sub(1, Ordering::SeqCst);

                let body = r#"{"ok": true}"#;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}", addr), in_flight)
}

fn ok_cases(count: usize) -> Vec<TestCase> {
    (0..count)
        .map(|id| {
            TestCase::new(format!("item {}", id), format!("/items/{}", id), "GET")
                .expect_value("ok", true)
        })
        .collect()
}

/// 并发度为 2 时同时处理中的请求最多 2 个
#[tokio::test]
async fn test_concurrency_is_bounded() {
    let (base_url, in_flight) = start_counting_server(Duration::from_millis(150)).await;

    let report = TestRunner::new(TestExecutor::new(Client::new().unwrap()))
        .with_concurrency(2)
        .run(&base_url, &ok_cases(6))
        .await;

    assert_eq!(report.summary.passed, 6);
    assert_eq!(in_flight.peak.load(Ordering::SeqCst), 2);
    assert_eq!(in_flight.current.load(Ordering::SeqCst), 0);
}

/// 默认顺序执行，任何时刻只有一个请求
#[tokio::test]
async fn test_sequential_run_has_one_request_in_flight() {
    let (base_url, in_flight) = start_counting_server(Duration::from_millis(20)).await;

    let report = TestRunner::new(TestExecutor::new(Client::new().unwrap()))
        .run(&base_url, &ok_cases(4))
        .await;

    assert_eq!(report.summary.passed, 4);
    assert_eq!(in_flight.peak.load(Ordering::SeqCst), 1);
}
