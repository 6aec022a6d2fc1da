use hyper::header::{HeaderName, HeaderValue};
use tracing::warn;

use crate::routing::{BackendConfig, RouteRequest, RoutingError};

/// 헤더 값을 어디서 가져올지 나타냅니다.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValueSource {
    /// 규칙에 고정된 값
    Static(HeaderValue),
    /// 클라이언트가 요청한 원래 호스트
    RequestHost,
    /// 클라이언트가 사용한 스킴 (http/https)
    RequestScheme,
}

/// 재작성 시 추가할 헤더 하나입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRule {
    pub name: HeaderName,
    pub value: HeaderValueSource,
}

impl HeaderRule {
    pub fn new(name: &str, value: HeaderValueSource) -> Result<Self, RoutingError> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| RoutingError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { name, value })
    }

    pub fn fixed(name: &str, value: &str) -> Result<Self, RoutingError> {
        let header_value = HeaderValue::from_str(value).map_err(|e| RoutingError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Self::new(name, HeaderValueSource::Static(header_value))
    }

    pub fn request_host(name: &str) -> Result<Self, RoutingError> {
        Self::new(name, HeaderValueSource::RequestHost)
    }

    pub fn request_scheme(name: &str) -> Result<Self, RoutingError> {
        Self::new(name, HeaderValueSource::RequestScheme)
    }

    /// 현재 요청을 기준으로 헤더 값을 계산합니다.
    pub fn resolve(&self, req: &RouteRequest) -> Option<(HeaderName, HeaderValue)> {
        let value = match &self.value {
            HeaderValueSource::Static(value) => value.clone(),
            HeaderValueSource::RequestHost => match HeaderValue::from_str(req.host()) {
                Ok(value) => value,
                Err(e) => {
                    warn!(header = %self.name, host = %req.host(), error = %e, "호스트 헤더 값 변환 실패");
                    return None;
                }
            },
            HeaderValueSource::RequestScheme => HeaderValue::from_static(req.scheme().as_str()),
        };
        Some((self.name.clone(), value))
    }
}

/// 규칙이 매칭되었을 때 수행할 동작입니다.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 재작성하지 않고 로컬에서 처리
    PassThrough,
    /// 백엔드로 재작성
    Rewrite {
        base_override: Option<BackendConfig>,
    },
    /// 백엔드로 재작성하고 헤더를 추가
    RewriteWithHeaders {
        base_override: Option<BackendConfig>,
        headers: Vec<HeaderRule>,
    },
}

impl Action {
    pub fn rewrite() -> Self {
        Action::Rewrite { base_override: None }
    }

    pub fn rewrite_with_headers(headers: Vec<HeaderRule>) -> Self {
        Action::RewriteWithHeaders { base_override: None, headers }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::PassThrough => "pass-through",
            Action::Rewrite { .. } => "rewrite",
            Action::RewriteWithHeaders { .. } => "rewrite-with-headers",
        }
    }
}
