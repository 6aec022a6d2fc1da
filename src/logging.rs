use std::ffi::OsStr;
use std::path::Path;

use time::format_description::well_known::Rfc3339;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::routing::{RouteDecision, RouteRequest};
use crate::settings::{LogFormat, LogOutput, LogSettings};

const DEFAULT_LOG_FILE: &str = "edge_rewrite.log";

/// 설정에 따라 전역 subscriber를 초기화합니다.
///
/// 파일 출력일 때 반환되는 guard는 프로세스가 끝날 때까지 유지해야 합니다.
/// 이미 subscriber가 설정되어 있으면 경고만 남기고 넘어갑니다.
pub fn init_logging(settings: &LogSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(settings.level).into())
        .from_env_lossy();

    let (writer, guard) = match &settings.output {
        LogOutput::Stdout => (BoxMakeWriter::new(std::io::stdout), None),
        LogOutput::File(path) => {
            let path = Path::new(path);
            let dir = path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));
            let (non_blocking, guard) = tracing_appender::non_blocking(
                tracing_appender::rolling::never(dir, file_name),
            );
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_timer(UtcTime::new(Rfc3339))
        .with_target(true);

    let result = match settings.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    match result {
        Ok(()) => debug!(format = ?settings.format, output = ?settings.output, "로깅 초기화 완료"),
        Err(e) => warn!(error = %e, "로깅이 이미 초기화되어 있음"),
    }

    guard
}

/// 라우팅 결정 하나에 대한 구조화된 로그 레코드입니다.
///
/// 전송 계층이 요청 처리 후 `log_decision`으로 남깁니다.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionLog {
    pub method: String,
    pub host: String,
    pub path: String,
    pub query: Option<String>,
    pub forward: bool,
    pub rule: Option<String>,
    pub destination: Option<String>,
    pub extra_headers: Vec<String>,
}

impl DecisionLog {
    pub fn new(req: &RouteRequest, decision: &RouteDecision) -> Self {
        Self {
            method: req.method().to_string(),
            host: req.host().to_string(),
            path: req.path().to_string(),
            query: req.query().map(str::to_string),
            forward: decision.forward,
            rule: decision.rule.clone(),
            destination: decision.destination.clone(),
            extra_headers: decision.extra_headers
                .iter()
                .map(|(name, _)| name.as_str().to_string())
                .collect(),
        }
    }

    pub fn outcome(&self) -> &'static str {
        if self.forward { "rewrite" } else { "pass-through" }
    }
}

pub fn log_decision(log: &DecisionLog) {
    info!(
        method = %log.method,
        host = %log.host,
        path = %log.path,
        query = ?log.query,
        outcome = log.outcome(),
        rule = ?log.rule,
        destination = ?log.destination,
        headers = ?log.extra_headers,
        "라우팅 결정"
    );
}
