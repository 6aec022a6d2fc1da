use hyper::Uri;
use url::Url;

use crate::routing::error::BackendError;

/// 기본 백엔드 주소 (설정이 없을 때)
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// 재작성 대상 백엔드 오리진입니다.
///
/// 시작 시 한 번 검증되며 이후 변경되지 않습니다.
/// 끝의 `/`는 제거되어 `base_url + path`가 `//`를 만들지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl BackendConfig {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let misconfigured = |reason: &str| BackendError::Misconfigured {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(misconfigured("백엔드 URL이 비어 있음"));
        }

        let parsed = Url::parse(trimmed).map_err(|e| misconfigured(&e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(misconfigured("http 또는 https 스킴만 지원"));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(misconfigured("호스트가 없음"));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(misconfigured("쿼리나 프래그먼트를 포함할 수 없음"));
        }

        // 검증한 것과 같은 정규화된 형태를 저장
        let base_url = parsed.as_str().trim_end_matches('/').to_string();
        base_url.parse::<Uri>().map_err(|e| misconfigured(&e.to_string()))?;

        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url + path (+ '?' + query)` 형태의 목적지 URL을 만듭니다.
    /// 쿼리는 다시 인코딩하지 않고 그대로 붙입니다.
    pub fn destination(&self, path: &str, query: Option<&str>) -> String {
        let mut dest = String::with_capacity(self.base_url.len() + path.len() + 16);
        dest.push_str(&self.base_url);
        dest.push_str(path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            dest.push('?');
            dest.push_str(query);
        }
        dest
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}
