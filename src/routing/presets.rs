//! 엣지 배포에서 쓰던 기본 규칙 묶음입니다.
//!
//! 프레임워크 정적 자원과 파비콘, `robots.txt`, 사이트 인증 파일은 재작성하지 않고,
//! 관리자/로그인 경로는 원래 스킴과 호스트를 `X-Forwarded-*` 헤더로 넘깁니다.
//! 나머지는 모두 기본 동작(백엔드 재작성)을 따릅니다.

use crate::routing::{Action, HeaderRule, PathMatcher, Rule, RoutingError, RuleTable};

pub const FORWARDED_PROTO: &str = "X-Forwarded-Proto";
pub const FORWARDED_HOST: &str = "X-Forwarded-Host";

#[derive(Debug, Clone)]
pub struct EdgeOptions {
    /// 사이트 소유권 인증 파일 경로 (예: "/google1234abcd.html")
    pub verification_file: Option<String>,
    /// 전달 헤더를 붙일 관리자/로그인 경로 접두사
    pub admin_prefixes: Vec<String>,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            verification_file: None,
            admin_prefixes: vec![
                "/admin/".to_string(),
                "/accounts/login/".to_string(),
                "/login/".to_string(),
            ],
        }
    }
}

/// 엣지 규칙을 평가 순서대로 생성합니다.
pub fn edge_rules(options: &EdgeOptions) -> Result<Vec<Rule>, RoutingError> {
    let mut rules = vec![
        Rule::named("next-assets", PathMatcher::prefix("/_next")?, Action::PassThrough),
        Rule::named("favicon", PathMatcher::prefix("/favicon")?, Action::PassThrough),
        Rule::named("robots", PathMatcher::exact("/robots.txt")?, Action::PassThrough),
    ];

    if let Some(file) = options.verification_file.as_deref().filter(|f| !f.is_empty()) {
        let file = if file.starts_with('/') { file.to_string() } else { format!("/{}", file) };
        rules.push(Rule::named("site-verification", PathMatcher::exact(file)?, Action::PassThrough));
    }

    for prefix in &options.admin_prefixes {
        let headers = vec![
            HeaderRule::request_scheme(FORWARDED_PROTO)?,
            HeaderRule::request_host(FORWARDED_HOST)?,
        ];
        rules.push(Rule::named(
            format!("admin:{}", prefix),
            PathMatcher::prefix(prefix.as_str())?,
            Action::rewrite_with_headers(headers),
        ));
    }

    Ok(rules)
}

pub fn edge_table(options: &EdgeOptions) -> Result<RuleTable, RoutingError> {
    Ok(edge_rules(options)?.into_iter().collect())
}
