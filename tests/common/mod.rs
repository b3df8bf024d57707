//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use fibtrace::config::ServiceConfig;
use fibtrace::http::HttpServer;
use fibtrace::observability::{batch_provider, service_resource, Telemetry};
use opentelemetry_sdk::trace::{BatchConfig, BatchConfigBuilder, InMemorySpanExporter, SdkTracerProvider};
use tokio::sync::oneshot;

/// A server running on an ephemeral port with an in-memory span sink.
pub struct TestServer {
    pub addr: SocketAddr,
    pub exporter: InMemorySpanExporter,
    pub provider: SdkTracerProvider,
    stop: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Stop the server, wait for in-flight requests, then flush every span.
    pub async fn stop(self) -> (SdkTracerProvider, InMemorySpanExporter) {
        let _ = self.stop.send(());
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop")
            .expect("server task panicked");
        self.provider.force_flush().unwrap();
        (self.provider, self.exporter)
    }
}

/// Batch settings that only export on flush.
pub fn flush_only() -> BatchConfig {
    BatchConfigBuilder::default()
        .with_scheduled_delay(Duration::from_secs(3600))
        .build()
}

/// Start a server whose spans only leave the queue on flush.
pub async fn start_server() -> TestServer {
    start_server_with(flush_only()).await
}

/// Start a server whose span pipeline uses `batch`.
pub async fn start_server_with(batch: BatchConfig) -> TestServer {
    let exporter = InMemorySpanExporter::default();
    let provider = batch_provider(
        exporter.clone(),
        batch,
        service_resource("fib", "v0.1.0", "test"),
    );

    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let (stop, stopped) = oneshot::channel::<()>();
    let server = HttpServer::new(config, Telemetry::for_provider(&provider));

    let handle = tokio::spawn(async move {
        let shutdown = async {
            let _ = stopped.await;
        };
        server.run(listener, shutdown).await.unwrap();
    });

    TestServer {
        addr,
        exporter,
        provider,
        stop,
        handle,
    }
}

/// Client that never reuses connections, so shutdown is not held up.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
