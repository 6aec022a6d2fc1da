use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use tracing::debug;

use super::error::SettingsError;
use super::schema::CONFIG_SCHEMA;
use super::Result;

/// JSON 설정 검증을 위한 구조체
pub struct JsonConfigValidator {
    schema: JSONSchema,
}

/// 검증 오류 타입
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    ParseError(String),
    SchemaError { path: String, message: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ParseError(msg) => write!(f, "파싱 오류: {}", msg),
            ValidationError::SchemaError { path, message } =>
                write!(f, "스키마 오류 (경로: {}): {}", path, message),
        }
    }
}

impl JsonConfigValidator {
    pub fn new() -> Result<Self> {
        let schema_value: Value = serde_json::from_str(CONFIG_SCHEMA)
            .map_err(|e| SettingsError::SchemaCompileError {
                reason: format!("스키마 파싱 오류: {}", e)
            })?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| SettingsError::SchemaCompileError {
                reason: format!("스키마 컴파일 오류: {}", e)
            })?;

        debug!("JSON 스키마 컴파일 성공");
        Ok(Self { schema })
    }

    /// JSON 문자열을 파싱하고 스키마로 검사합니다.
    pub fn validate(&self, json_str: &str) -> std::result::Result<Value, Vec<ValidationError>> {
        let value = serde_json::from_str::<Value>(json_str)
            .map_err(|e| vec![ValidationError::ParseError(e.to_string())])?;

        if let Err(errors) = self.schema.validate(&value) {
            let validation_errors = errors
                .map(|error| ValidationError::SchemaError {
                    path: error.instance_path.to_string(),
                    message: error.to_string(),
                })
                .collect::<Vec<_>>();
            return Err(validation_errors);
        }

        Ok(value)
    }

    /// 검증 실패를 파일 경로가 포함된 `SettingsError`로 변환합니다.
    pub fn validate_file(&self, json_str: &str, file: &str) -> Result<Value> {
        self.validate(json_str).map_err(|errors| SettingsError::ValidationErrors {
            errors: errors.iter().map(ToString::to_string).collect(),
            file: file.to_string(),
        })
    }
}
