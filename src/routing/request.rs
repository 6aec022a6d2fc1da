use hyper::header::{self, HeaderMap};
use hyper::{Method, Request, Uri};

use crate::routing::{HostInfo, RoutingError};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "http" => Some(Scheme::Http),
            "https" => Some(Scheme::Https),
            _ => None,
        }
    }
}

/// 라우터가 참조하는 인바운드 요청 정보입니다.
///
/// 경로와 쿼리는 디코딩이나 정규화 없이 원문 그대로 보관합니다.
/// 메서드와 나머지 헤더는 검사하지 않고 그대로 전달됩니다.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    method: Method,
    host: String,
    host_info: HostInfo,
    path: String,
    query: Option<String>,
    scheme: Scheme,
    headers: HeaderMap,
}

impl RouteRequest {
    /// 요청 대상(origin-form 또는 absolute-form)과 호스트로 요청을 만듭니다.
    pub fn new(method: Method, target: &str, host: &str) -> Result<Self, RoutingError> {
        let uri = target.parse::<Uri>().map_err(|e| RoutingError::InvalidRequest {
            uri: target.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_parts(method, &uri, Some(host), HeaderMap::new())
    }

    /// hyper 요청에서 라우팅 정보를 추출합니다.
    pub fn from_http<B>(req: &Request<B>) -> Result<Self, RoutingError> {
        let host = match req.headers().get(header::HOST) {
            Some(value) => Some(value.to_str().map_err(|e| RoutingError::InvalidRequest {
                uri: req.uri().to_string(),
                reason: format!("Host 헤더 파싱 실패: {}", e),
            })?),
            None => None,
        };
        Self::from_parts(req.method().clone(), req.uri(), host, req.headers().clone())
    }

    fn from_parts(
        method: Method,
        uri: &Uri,
        host: Option<&str>,
        headers: HeaderMap,
    ) -> Result<Self, RoutingError> {
        let invalid = |reason: &str| RoutingError::InvalidRequest {
            uri: uri.to_string(),
            reason: reason.to_string(),
        };

        let path = uri.path();
        if !path.starts_with('/') {
            return Err(invalid("경로는 '/'로 시작해야 합니다"));
        }

        // absolute-form이면 URI의 authority가 Host 헤더보다 우선 (RFC 9112 3.2.2)
        let host = uri
            .authority()
            .map(|a| a.as_str())
            .or(host)
            .ok_or_else(|| invalid("Host 헤더가 누락됨"))?;
        let host_info = HostInfo::from_header_value(host)?;

        let scheme = uri
            .scheme_str()
            .and_then(Scheme::from_token)
            .or_else(|| {
                headers
                    .get(X_FORWARDED_PROTO)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.split(',').next())
                    .and_then(Scheme::from_token)
            })
            .unwrap_or(Scheme::Http);

        Ok(Self {
            method,
            host: host.to_string(),
            host_info,
            path: path.to_string(),
            query: uri.query().map(str::to_string),
            scheme,
            headers,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// 클라이언트가 요청한 원래 호스트 (포트 포함)
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn host_info(&self) -> &HostInfo {
        &self.host_info
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_query_kept_verbatim() {
        let req = RouteRequest::new(Method::GET, "/a%2Fb//c/?x=%20&y", "example.com").unwrap();
        assert_eq!(req.path(), "/a%2Fb//c/");
        assert_eq!(req.query(), Some("x=%20&y"));
    }

    #[test]
    fn test_scheme_from_absolute_uri() {
        let req = RouteRequest::new(Method::GET, "https://example.com/x", "example.com").unwrap();
        assert_eq!(req.scheme(), Scheme::Https);
    }

    #[test]
    fn test_scheme_from_forwarded_proto() {
        let request = Request::builder()
            .uri("/x")
            .header("Host", "example.com")
            .header("X-Forwarded-Proto", "https, http")
            .body(())
            .unwrap();
        let req = RouteRequest::from_http(&request).unwrap();
        assert_eq!(req.scheme(), Scheme::Https);
    }

    #[test]
    fn test_authority_used_without_host_header() {
        let request = Request::builder()
            .uri("http://example.com:8080/x")
            .body(())
            .unwrap();
        let req = RouteRequest::from_http(&request).unwrap();
        assert_eq!(req.host(), "example.com:8080");
        assert_eq!(req.host_info().port, Some(8080));
    }

    #[test]
    fn test_absolute_form_authority_overrides_host_header() {
        let request = Request::builder()
            .uri("https://shop.example.com/admin/")
            .header("Host", "other.example.com")
            .body(())
            .unwrap();
        let req = RouteRequest::from_http(&request).unwrap();
        assert_eq!(req.host(), "shop.example.com");
        assert_eq!(req.host_info().name, "shop.example.com");

        let req = RouteRequest::new(Method::GET, "http://a.example.com:8080/x", "b.example.com").unwrap();
        assert_eq!(req.host(), "a.example.com:8080");
    }

    #[test]
    fn test_malformed_target_rejected() {
        let result = RouteRequest::new(Method::GET, "/bad path", "example.com");
        assert!(matches!(result, Err(RoutingError::InvalidRequest { .. })));
    }

    #[test]
    fn test_missing_host_rejected() {
        let request = Request::builder().uri("/x").body(()).unwrap();
        assert!(matches!(
            RouteRequest::from_http(&request),
            Err(RoutingError::InvalidRequest { .. })
        ));
    }
}
