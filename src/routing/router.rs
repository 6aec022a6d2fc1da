use std::sync::Arc;

use arc_swap::ArcSwap;
use hyper::Request;
use tracing::{debug, info, instrument};

use crate::routing::{
    Action,
    BackendConfig,
    RouteDecision,
    RouteRequest,
    RoutingError,
    RuleTable,
};

/// 요청을 규칙 테이블에 대입해 `RouteDecision`을 만드는 라우터입니다.
///
/// 상태를 갖지 않는 순수 계산이므로 여러 요청에서 동시에 공유해도 안전합니다.
#[derive(Debug, Clone)]
pub struct Router {
    table: RuleTable,
    backend: BackendConfig,
}

impl Router {
    pub fn new(table: RuleTable, backend: BackendConfig) -> Self {
        Self { table, backend }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    /// 요청에 대한 라우팅 결정을 계산합니다.
    #[instrument(level = "trace", skip_all, fields(path = %req.path()))]
    pub fn decide(&self, req: &RouteRequest) -> RouteDecision {
        let path = req.path();
        let query = req.query();

        let Some(rule) = self.table.match_path(path) else {
            // 기본 동작: 헤더 없이 백엔드로 재작성
            let dest = self.backend.destination(path, query);
            debug!(path = %path, destination = %dest, "기본 재작성");
            return RouteDecision::rewrite(dest, Vec::new(), None);
        };

        let label = rule.label();
        let decision = match &rule.action {
            Action::PassThrough => RouteDecision::pass_through(Some(label)),
            Action::Rewrite { base_override } => {
                let base = base_override.as_ref().unwrap_or(&self.backend);
                RouteDecision::rewrite(base.destination(path, query), Vec::new(), Some(label))
            }
            Action::RewriteWithHeaders { base_override, headers } => {
                let base = base_override.as_ref().unwrap_or(&self.backend);
                let extra_headers = headers
                    .iter()
                    .filter_map(|header| header.resolve(req))
                    .collect();
                RouteDecision::rewrite(base.destination(path, query), extra_headers, Some(label))
            }
        };

        debug!(
            path = %path,
            rule = ?decision.rule,
            action = rule.action.name(),
            destination = ?decision.destination,
            "규칙 적용"
        );
        decision
    }

    /// hyper 요청을 바로 평가합니다. 요청을 해석할 수 없으면 `InvalidRequest`를 반환합니다.
    pub fn decide_http<B>(&self, req: &Request<B>) -> Result<RouteDecision, RoutingError> {
        let route_req = RouteRequest::from_http(req)?;
        Ok(self.decide(&route_req))
    }
}

/// 원자적으로 교체 가능한 라우터 핸들입니다.
///
/// 읽는 쪽은 잠금 없이 스냅샷을 얻고, 재구성된 테이블은 통째로 게시됩니다.
#[derive(Debug, Clone)]
pub struct SharedRouter {
    inner: Arc<ArcSwap<Router>>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(router)),
        }
    }

    /// 현재 라우터 스냅샷
    pub fn load(&self) -> Arc<Router> {
        self.inner.load_full()
    }

    pub fn decide(&self, req: &RouteRequest) -> RouteDecision {
        self.inner.load().decide(req)
    }

    pub fn publish(&self, router: Router) {
        info!(
            rules = router.table().len(),
            backend = %router.backend().base_url(),
            "새 라우터 게시"
        );
        self.inner.store(Arc::new(router));
    }

    /// 현재 백엔드를 유지한 채 규칙 테이블만 교체합니다.
    ///
    /// 읽기와 교체가 한 번의 compare-and-swap으로 이뤄지므로 동시에 게시된 백엔드를 덮어쓰지 않습니다.
    pub fn rebuild_rules(&self, table: RuleTable) {
        let rules = table.len();
        let previous = self.inner.rcu(|current| Router::new(table.clone(), current.backend().clone()));
        info!(
            rules,
            backend = %previous.backend().base_url(),
            "규칙 테이블 재구성"
        );
    }
}
