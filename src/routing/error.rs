use hyper::StatusCode;

/// 라우팅 관련 에러를 표현하는 열거형입니다.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    /// 요청 URI 또는 호스트를 해석할 수 없음
    #[error("잘못된 요청 {uri}: {reason}")]
    InvalidRequest {
        uri: String,
        reason: String,
    },
    /// 잘못된 경로 패턴
    #[error("잘못된 경로 패턴: {pattern} ({reason})")]
    InvalidPathPattern {
        pattern: String,
        reason: String,
    },
    /// 잘못된 헤더 이름 또는 값
    #[error("잘못된 헤더 {name}: {reason}")]
    InvalidHeader {
        name: String,
        reason: String,
    },
}

impl RoutingError {
    /// 호출 측(HTTP 계층)이 응답해야 할 상태 코드를 반환합니다.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RoutingError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            RoutingError::InvalidPathPattern { .. }
            | RoutingError::InvalidHeader { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 백엔드 설정 에러입니다. 시작 시점에만 발생하며 치명적입니다.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("백엔드 설정 오류 '{url}': {reason}")]
    Misconfigured {
        url: String,
        reason: String,
    },
}
