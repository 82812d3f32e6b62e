//! 修改类请求的重试行为（本地假服务器，无需真实 Mail-in-a-Box）
//!
//! 服务器读完请求头后直接断开连接，模拟“请求已送达但响应丢失”。

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use miab_webhook_provider::{DnsProvider, DnsRecordType, MiabProvider, ProviderError};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

const QNAME: &str = "_acme-challenge.example.org";

/// 统计收到的请求行，每个连接读完请求头后立即关闭
struct DroppingServer {
    addr: String,
    requests: Arc<std::sync::Mutex<Vec<String>>>,
    connections: Arc<AtomicUsize>,
}

impl DroppingServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(std::sync::Mutex::new(Vec::new()));
        let connections = Arc::new(AtomicUsize::new(0));

        let (seen, count) = (requests.clone(), connections.clone());
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                count.fetch_add(1, Ordering::SeqCst);
                let mut head = Vec::new();
                let mut buf = [0_u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&head);
                if let Some(line) = head.lines().next() {
                    seen.lock().unwrap().push(line.to_string());
                }
                // stream 在此处被丢弃，不返回任何响应
            }
        });

        Self {
            addr,
            requests,
            connections,
        }
    }

    fn count(&self, method: &str) -> usize {
        let prefix = format!("{method} ");
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|line| line.starts_with(&prefix))
            .count()
    }

    /// 配置了重试的 provider，确认修改类请求不受其影响
    fn provider(&self, max_retries: u32) -> MiabProvider {
        let provider = MiabProvider::builder(
            &self.addr,
            "admin@example.org".to_string(),
            "secret".to_string(),
        )
        .max_retries(max_retries)
        .build()
        .unwrap();
        assert_eq!(provider.base_url(), format!("{}/admin", self.addr));
        provider
    }
}

#[tokio::test]
async fn test_create_record_is_sent_once_when_response_is_lost() {
    let server = DroppingServer::start().await;
    let provider = server.provider(2);

    let result = provider
        .create_record(QNAME, DnsRecordType::Txt, "token-value")
        .await;

    assert!(
        matches!(result, Err(ProviderError::NetworkError { .. })),
        "unexpected result: {result:?}"
    );
    assert_eq!(server.count("POST"), 1);
    assert_eq!(server.connections.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_delete_record_is_sent_once_when_response_is_lost() {
    let server = DroppingServer::start().await;
    let provider = server.provider(2);

    let result = provider
        .delete_record(QNAME, DnsRecordType::Txt, "token-value")
        .await;

    assert!(result.is_err());
    assert_eq!(server.count("DELETE"), 1);
}

#[tokio::test]
async fn test_update_dns_is_sent_once_when_response_is_lost() {
    let server = DroppingServer::start().await;
    let provider = server.provider(2);

    assert!(provider.update_dns(false).await.is_err());
    assert_eq!(server.count("POST"), 1);
}

#[tokio::test]
async fn test_list_records_retries_transient_failures() {
    let server = DroppingServer::start().await;
    let provider = server.provider(2);

    let result = provider.list_records(QNAME, DnsRecordType::Txt).await;

    assert!(matches!(result, Err(ProviderError::NetworkError { .. })));
    // 读请求：首次 + 2 次重试
    assert_eq!(server.count("GET"), 3);
}
