//! Edge Rewrite는 경로 규칙에 따라 요청을 고정된 백엔드 오리진으로 재작성하는 라우터 코어입니다.
//!
//! # 주요 기능
//!
//! - 순서가 있는 규칙 테이블 (exact / prefix / regex 매칭, 첫 매칭 우선)
//! - 재작성 목적지 계산과 요청별 헤더 주입
//! - 잠금 없는 라우터 교체 (`SharedRouter`)
//! - 환경 변수 / TOML / JSON 설정과 로깅
//!
//! 실제 HTTP 전송은 이 크레이트의 범위가 아니며, 호출 측이 `RouteDecision`을 보고 수행합니다.
//!
//! # 예제
//!
//! ```
//! use edge_rewrite::routing::{
//!     Action, BackendConfig, HeaderRule, PathMatcher, RouteRequest, Router, RuleTable,
//! };
//! use hyper::Method;
//!
//! let backend = BackendConfig::new("http://backend.local").unwrap();
//! let table = RuleTable::builder()
//!     .add(PathMatcher::prefix("/_next").unwrap(), Action::PassThrough)
//!     .add(
//!         PathMatcher::prefix("/admin/").unwrap(),
//!         Action::rewrite_with_headers(vec![HeaderRule::request_host("X-Forwarded-Host").unwrap()]),
//!     )
//!     .build();
//! let router = Router::new(table, backend);
//!
//! let req = RouteRequest::new(Method::GET, "/admin/login?next=/dashboard", "example.com").unwrap();
//! let decision = router.decide(&req);
//! assert!(decision.forward);
//! assert_eq!(
//!     decision.destination.as_deref(),
//!     Some("http://backend.local/admin/login?next=/dashboard")
//! );
//! assert_eq!(decision.header("x-forwarded-host").unwrap(), "example.com");
//! ```
//!
//! # 설정에서 라우터 만들기
//!
//! ```
//! use edge_rewrite::settings::Settings;
//!
//! let settings = Settings::from_toml_str(r#"
//! [backend]
//! base_url = "http://127.0.0.1:8000"
//! "#).unwrap();
//! let router = settings.build_router().unwrap();
//! assert!(!router.table().is_empty());
//! ```

pub mod logging;
pub mod routing;
pub mod settings;

pub use routing::{RouteDecision, RouteRequest, Router, SharedRouter};
pub use settings::Settings;
