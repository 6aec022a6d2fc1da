use std::{env, fs, path::Path};
use serde::Deserialize;
use tracing::{debug, info};

use crate::routing::{
    presets::{self, EdgeOptions},
    BackendConfig,
    Router,
    Rule,
    RuleTable,
    DEFAULT_BACKEND_URL,
};

mod error;
pub mod logging;
mod rules;
mod schema;
mod validator;

pub use error::SettingsError;
pub use logging::{LogFormat, LogOutput, LogSettings};
pub use rules::{ActionKind, HeaderSettings, HeaderSource, RuleSettings};
pub use schema::CONFIG_SCHEMA;
pub use validator::{JsonConfigValidator, ValidationError};

pub type Result<T> = std::result::Result<T, SettingsError>;

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Edge,
    None,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // 백엔드 설정
    #[serde(default)]
    pub backend: BackendSettings,

    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    /// 명시적 규칙 뒤에 붙일 기본 규칙 묶음
    #[serde(default)]
    pub preset: Preset,

    #[serde(default)]
    pub verification_file: Option<String>,

    /// 엣지 프리셋의 관리자 경로 목록 (생략 시 기본값)
    #[serde(default)]
    pub admin_prefixes: Option<Vec<String>>,

    /// 명시적 규칙. 프리셋 규칙보다 먼저 평가됩니다.
    #[serde(default)]
    pub rules: Vec<RuleSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendSettings::default(),
            logging: LogSettings::default(),
            preset: Preset::default(),
            verification_file: None,
            admin_prefixes: None,
            rules: Vec::new(),
        }
    }
}

impl Settings {
    /// `PROXY_CONFIG_FILE`이 있으면 파일에서, 없으면 환경 변수에서 설정을 읽습니다.
    pub fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("PROXY_CONFIG_FILE") {
            Self::from_file(&config_path)
        } else {
            Self::from_env()
        }
    }

    /// 확장자가 `.json`이면 JSON(스키마 검증 포함), 그 외에는 TOML로 읽습니다.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SettingsError::FileError {
            path: path.to_string_lossy().to_string(),
            error: e,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), json = is_json, "설정 파일 로드");
        let settings = if is_json {
            Self::from_json_str(&content, &path.to_string_lossy())?
        } else {
            Self::from_toml_str(&content)?
        };

        info!(path = %path.display(), rules = settings.rules.len(), "설정 파일 로드 완료");
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(content: &str, file: &str) -> Result<Self> {
        let value = JsonConfigValidator::new()?.validate_file(content, file)?;
        let settings: Self = serde_json::from_value(value)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let base_url = match env::var("PROXY_BACKEND_URL") {
            Ok(url) => url,
            Err(env::VarError::NotPresent) => default_base_url(),
            Err(e) => {
                return Err(SettingsError::EnvVarInvalid {
                    var_name: "PROXY_BACKEND_URL".to_string(),
                    value: "".to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let admin_prefixes = env::var("PROXY_ADMIN_PREFIXES").ok().map(|value| {
            value.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let settings = Self {
            backend: BackendSettings { base_url },
            logging: LogSettings::from_env()?,
            preset: parse_env_var("PROXY_PRESET", Preset::default)?,
            verification_file: env::var("PROXY_VERIFICATION_FILE").ok().filter(|v| !v.is_empty()),
            admin_prefixes,
            rules: Vec::new(),
        };

        // 설정 생성 시점에 바로 검증
        settings.validate()?;
        Ok(settings)
    }

    /// 백엔드 URL과 모든 규칙이 유효한지 검증합니다.
    ///
    /// 프리셋을 끈 상태에서 프리셋 전용 옵션을 지정하면 무시되지 않고 오류가 됩니다.
    pub fn validate(&self) -> Result<()> {
        if self.preset == Preset::None {
            let unused: Vec<&str> = [
                ("verification_file", self.verification_file.is_some()),
                ("admin_prefixes", self.admin_prefixes.is_some()),
            ]
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect();

            if !unused.is_empty() {
                return Err(SettingsError::InvalidConfig(format!(
                    "preset = \"none\"에서는 {}를 사용할 수 없습니다",
                    unused.join(", ")
                )));
            }
        }

        self.build_router().map(|_| ())
    }

    pub fn backend_config(&self) -> Result<BackendConfig> {
        Ok(BackendConfig::new(&self.backend.base_url)?)
    }

    pub fn edge_options(&self) -> EdgeOptions {
        let defaults = EdgeOptions::default();
        EdgeOptions {
            verification_file: self.verification_file.clone(),
            admin_prefixes: self.admin_prefixes.clone().unwrap_or(defaults.admin_prefixes),
        }
    }

    /// 명시적 규칙 다음에 프리셋 규칙을 이어 붙인 테이블을 만듭니다.
    pub fn rule_table(&self) -> Result<RuleTable> {
        let explicit = self.rules
            .iter()
            .map(RuleSettings::to_rule)
            .collect::<Result<Vec<Rule>>>()?;

        let preset = match self.preset {
            Preset::Edge => presets::edge_rules(&self.edge_options())?,
            Preset::None => Vec::new(),
        };

        Ok(RuleTable::builder().extend(explicit).extend(preset).build())
    }

    pub fn build_router(&self) -> Result<Router> {
        let backend = self.backend_config()?;
        let table = self.rule_table()?;
        Ok(Router::new(table, backend))
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "edge" => Ok(Preset::Edge),
            "none" => Ok(Preset::None),
            _ => Err(format!("Invalid preset: {}", s)),
        }
    }
}
