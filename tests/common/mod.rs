#![allow(dead_code)]

use axum::extract::ConnectInfo;
use slug_shortener::application::services::{MissPolicy, SlugRange, UrlService};
use slug_shortener::domain::repositories::UrlRepository;
use slug_shortener::infrastructure::cache::{CacheService, MemoryCache, UrlCache};
use slug_shortener::infrastructure::persistence::MemoryUrlRepository;
use slug_shortener::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const BASE_URL: &str = "http://sho.rt";
pub const PEER: &str = "127.0.0.1:12345";

/// In-memory backends shared between a test and the state under test.
pub struct TestBackends {
    pub repo: MemoryUrlRepository,
    pub cache: MemoryCache,
}

pub fn create_test_state(miss_policy: MissPolicy) -> (AppState, TestBackends) {
    create_test_state_with(miss_policy, true)
}

pub fn create_test_state_with(miss_policy: MissPolicy, behind_proxy: bool) -> (AppState, TestBackends) {
    let backends = TestBackends {
        repo: MemoryUrlRepository::new(),
        cache: MemoryCache::new(),
    };

    let url_repository: Arc<dyn UrlRepository> = Arc::new(backends.repo.clone());
    let cache_backend: Arc<dyn CacheService> = Arc::new(backends.cache.clone());

    let url_service = Arc::new(UrlService::new(
        url_repository,
        UrlCache::new(cache_backend),
        10,
        SlugRange::default(),
        miss_policy,
    ));

    let state = AppState::new(url_service, BASE_URL.to_string(), behind_proxy);

    (state, backends)
}

/// Inserts a fixed peer address the way `into_make_service_with_connect_info`
/// does for real connections.
#[derive(Clone)]
pub struct MockConnectInfoLayer {
    addr: SocketAddr,
}

impl MockConnectInfoLayer {
    pub fn new(addr: &str) -> Self {
        Self {
            addr: addr.parse().unwrap(),
        }
    }
}

impl Default for MockConnectInfoLayer {
    fn default() -> Self {
        Self::new(PEER)
    }
}

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.addr,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}
