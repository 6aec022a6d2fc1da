//! 경로 규칙 기반 재작성 라우팅의 핵심 기능을 제공하는 모듈입니다.

mod action;
mod backend;
mod decision;
mod error;
mod host;
mod matcher;
pub mod presets;
mod request;
mod router;
mod table;

pub use action::{Action, HeaderRule, HeaderValueSource};
pub use backend::{BackendConfig, DEFAULT_BACKEND_URL};
pub use decision::RouteDecision;
pub use error::{BackendError, RoutingError};
pub use host::HostInfo;
pub use matcher::{PathMatcher, PathMatcherKind};
pub use request::{RouteRequest, Scheme};
pub use router::{Router, SharedRouter};
pub use table::{Rule, RuleTable, RuleTableBuilder};
