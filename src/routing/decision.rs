use hyper::header::{HeaderName, HeaderValue};
use hyper::Uri;

use crate::routing::RoutingError;

/// 라우터가 내린 결정입니다. 실제 전달은 외부 HTTP 계층이 수행합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDecision {
    /// 백엔드로 전달할지 여부. `false`면 로컬에서 그대로 처리합니다.
    pub forward: bool,
    pub destination: Option<String>,
    pub extra_headers: Vec<(HeaderName, HeaderValue)>,
    /// 매칭된 규칙 (기본 동작이면 `None`)
    pub rule: Option<String>,
}

impl RouteDecision {
    pub fn pass_through(rule: Option<String>) -> Self {
        Self {
            forward: false,
            destination: None,
            extra_headers: Vec::new(),
            rule,
        }
    }

    pub fn rewrite(
        destination: String,
        extra_headers: Vec<(HeaderName, HeaderValue)>,
        rule: Option<String>,
    ) -> Self {
        Self {
            forward: true,
            destination: Some(destination),
            extra_headers,
            rule,
        }
    }

    /// 목적지를 전송 계층이 사용할 `Uri`로 변환합니다.
    pub fn destination_uri(&self) -> Option<Result<Uri, RoutingError>> {
        self.destination.as_ref().map(|dest| {
            dest.parse::<Uri>().map_err(|e| RoutingError::InvalidRequest {
                uri: dest.clone(),
                reason: e.to_string(),
            })
        })
    }

    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.extra_headers
            .iter()
            .find(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}
