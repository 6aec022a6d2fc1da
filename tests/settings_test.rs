use edge_rewrite::routing::{PathMatcherKind, RouteRequest};
use edge_rewrite::settings::{LogFormat, LogOutput, Preset, Settings, SettingsError};
use hyper::Method;
use serial_test::serial;

// 테스트 전후 환경변수 초기화를 위한 헬퍼 함수
fn cleanup_env() {
    for name in [
        "PROXY_CONFIG_FILE",
        "PROXY_BACKEND_URL",
        "PROXY_PRESET",
        "PROXY_VERIFICATION_FILE",
        "PROXY_ADMIN_PREFIXES",
        "PROXY_LOG_LEVEL",
        "PROXY_LOG_FORMAT",
        "PROXY_LOG_OUTPUT",
    ] {
        std::env::remove_var(name);
    }
}

// 테스트용 임시 설정 파일 생성 헬퍼
fn create_test_file(name: &str, content: &str) -> (String, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join(name);
    std::fs::write(&file_path, content).unwrap();
    (file_path.to_str().unwrap().to_string(), dir)
}

fn request(target: &str) -> RouteRequest {
    RouteRequest::new(Method::GET, target, "www.example.com").unwrap()
}

#[test]
#[serial]
fn test_settings_defaults() {
    cleanup_env();

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.backend.base_url, "http://127.0.0.1:8000");
    assert_eq!(settings.preset, Preset::Edge);
    assert_eq!(settings.logging.level, tracing::Level::INFO);
    assert_eq!(settings.logging.format, LogFormat::Text);
    assert_eq!(settings.logging.output, LogOutput::Stdout);

    let router = settings.build_router().unwrap();
    assert!(!router.decide(&request("/robots.txt")).forward);
    assert_eq!(
        router.decide(&request("/projects/")).destination.as_deref(),
        Some("http://127.0.0.1:8000/projects/")
    );
}

#[test]
#[serial]
fn test_settings_from_env() {
    cleanup_env();
    std::env::set_var("PROXY_BACKEND_URL", "https://api.example.com/");
    std::env::set_var("PROXY_VERIFICATION_FILE", "/naver1234.html");
    std::env::set_var("PROXY_ADMIN_PREFIXES", "/manage/, /signin/");
    std::env::set_var("PROXY_LOG_LEVEL", "debug");
    std::env::set_var("PROXY_LOG_FORMAT", "json");
    std::env::set_var("PROXY_LOG_OUTPUT", "/tmp/edge.log");

    let settings = Settings::from_env().unwrap();
    cleanup_env();

    assert_eq!(settings.logging.level, tracing::Level::DEBUG);
    assert_eq!(settings.logging.format, LogFormat::Json);
    assert_eq!(settings.logging.output, LogOutput::File("/tmp/edge.log".to_string()));

    let router = settings.build_router().unwrap();
    assert_eq!(router.backend().base_url(), "https://api.example.com");
    assert!(!router.decide(&request("/naver1234.html")).forward);

    let decision = router.decide(&request("/signin/?next=/"));
    assert_eq!(decision.destination.as_deref(), Some("https://api.example.com/signin/?next=/"));
    assert_eq!(decision.extra_headers.len(), 2);

    // 기본 관리자 경로는 목록이 대체되었으므로 헤더가 붙지 않음
    assert!(router.decide(&request("/admin/")).extra_headers.is_empty());
}

#[test]
#[serial]
fn test_settings_validation() {
    cleanup_env();

    // 1. 빈 백엔드 URL
    std::env::set_var("PROXY_BACKEND_URL", "");
    assert!(matches!(Settings::from_env(), Err(SettingsError::Backend(_))));
    cleanup_env();

    // 2. 잘못된 백엔드 URL
    std::env::set_var("PROXY_BACKEND_URL", "not a url");
    assert!(Settings::from_env().is_err());
    cleanup_env();

    // 3. 잘못된 로그 레벨
    std::env::set_var("PROXY_LOG_LEVEL", "invalid_level");
    assert!(matches!(Settings::from_env(), Err(SettingsError::EnvVarInvalid { .. })));
    cleanup_env();

    // 4. 잘못된 프리셋
    std::env::set_var("PROXY_PRESET", "vercel");
    assert!(Settings::from_env().is_err());
    cleanup_env();
}

#[test]
fn test_settings_from_toml() {
    let toml_content = r#"
preset = "edge"
verification_file = "/google1234.html"

[backend]
base_url = "http://backend.local"

[logging]
level = "warn"
format = "json"

[[rules]]
name = "health"
match = "exact"
pattern = "/health/"
action = "pass-through"

[[rules]]
name = "api"
pattern = "/api/*"
action = "rewrite-with-headers"
backend = "http://api.local:9000"
headers = [
    { name = "X-Frame-Options", value = "SAMEORIGIN" },
    { name = "X-Forwarded-Host", from = "host" },
]
"#;

    let settings = Settings::from_toml_str(toml_content).unwrap();
    assert_eq!(settings.logging.level, tracing::Level::WARN);
    assert_eq!(settings.rules.len(), 2);

    let router = settings.build_router().unwrap();
    let rules = router.table().rules();
    // 명시적 규칙이 프리셋보다 앞에 위치
    assert_eq!(rules[0].label(), "health");
    assert_eq!(rules[1].label(), "api");
    assert_eq!(rules[1].matcher.kind, PathMatcherKind::Prefix);
    assert_eq!(rules[2].label(), "next-assets");

    assert!(!router.decide(&request("/health/")).forward);
    assert!(!router.decide(&request("/google1234.html")).forward);

    let decision = router.decide(&request("/api/v1/items?limit=10"));
    assert_eq!(decision.destination.as_deref(), Some("http://api.local:9000/api/v1/items?limit=10"));
    assert_eq!(decision.header("x-frame-options").unwrap(), "SAMEORIGIN");
    assert_eq!(decision.header("x-forwarded-host").unwrap(), "www.example.com");
}

#[test]
fn test_settings_preset_none() {
    let settings = Settings::from_toml_str(r#"
preset = "none"

[backend]
base_url = "http://backend.local"
"#).unwrap();

    let router = settings.build_router().unwrap();
    assert!(router.table().is_empty());
    assert!(router.decide(&request("/robots.txt")).forward);
}

#[test]
#[serial]
fn test_settings_preset_none_rejects_preset_options() {
    let with_verification = Settings::from_toml_str(r#"
preset = "none"
verification_file = "/google1234.html"
"#);
    assert!(matches!(with_verification, Err(SettingsError::InvalidConfig(_))));

    let with_prefixes = Settings::from_toml_str(r#"
preset = "none"
admin_prefixes = ["/manage/"]
"#);
    assert!(matches!(with_prefixes, Err(SettingsError::InvalidConfig(_))));

    cleanup_env();
    std::env::set_var("PROXY_PRESET", "none");
    std::env::set_var("PROXY_ADMIN_PREFIXES", "/manage/");
    let from_env = Settings::from_env();
    cleanup_env();
    assert!(matches!(from_env, Err(SettingsError::InvalidConfig(_))));
}

#[test]
fn test_settings_invalid_toml() {
    let bad_regex = r#"
[[rules]]
match = "regex"
pattern = "[unclosed"
"#;
    assert!(matches!(Settings::from_toml_str(bad_regex), Err(SettingsError::Routing(_))));

    let bad_action = r#"
[[rules]]
pattern = "/x"
action = "redirect"
"#;
    assert!(matches!(Settings::from_toml_str(bad_action), Err(SettingsError::ParseError { .. })));

    let empty_backend = r#"
[backend]
base_url = ""
"#;
    assert!(matches!(Settings::from_toml_str(empty_backend), Err(SettingsError::Backend(_))));
}

#[test]
fn test_settings_from_json_file() {
    let json = r#"{
        "backend": { "base_url": "http://backend.local" },
        "preset": "none",
        "rules": [
            { "match": "prefix", "pattern": "/_next", "action": "pass-through" },
            {
                "match": "prefix",
                "pattern": "/admin/",
                "action": "rewrite-with-headers",
                "headers": [ { "name": "X-Forwarded-Proto", "from": "scheme" } ]
            }
        ]
    }"#;
    let (path, _dir) = create_test_file("edge.json", json);

    let settings = Settings::from_file(&path).unwrap();
    let router = settings.build_router().unwrap();
    assert_eq!(router.table().len(), 2);

    let decision = router.decide(&request("/admin/login"));
    assert_eq!(decision.header("x-forwarded-proto").unwrap(), "http");
}

#[test]
fn test_settings_json_schema_errors() {
    let json = r#"{ "rules": [ { "pattern": "/x", "action": "redirect" } ], "extra": 1 }"#;
    let (path, _dir) = create_test_file("broken.json", json);

    match Settings::from_file(&path) {
        Err(SettingsError::ValidationErrors { errors, file }) => {
            assert!(errors.len() >= 2, "오류 목록: {:?}", errors);
            assert!(file.ends_with("broken.json"));
        }
        other => panic!("ValidationErrors가 아님: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_settings_from_toml_file() {
    let (path, _dir) = create_test_file("edge.toml", r#"
[backend]
base_url = "http://backend.local"
"#);

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.backend.base_url, "http://backend.local");
}

#[test]
fn test_settings_missing_file() {
    let result = Settings::from_file("/nonexistent/edge.toml");
    assert!(matches!(result, Err(SettingsError::FileError { .. })));
}

#[test]
#[serial]
fn test_settings_load_uses_config_file() {
    cleanup_env();
    let (path, _dir) = create_test_file("edge.toml", r#"
preset = "none"

[backend]
base_url = "http://from-file.local"
"#);
    std::env::set_var("PROXY_CONFIG_FILE", &path);
    std::env::set_var("PROXY_BACKEND_URL", "http://from-env.local");

    let settings = Settings::load();
    cleanup_env();

    let settings = settings.unwrap();
    assert_eq!(settings.backend.base_url, "http://from-file.local");
    assert_eq!(settings.preset, Preset::None);
}
