/// JSON 설정 스키마 정의
///
/// JSON 설정 파일 검증에 사용되며 JSON Schema Draft 7을 따릅니다.
/// TOML 설정은 같은 구조를 serde로만 검사합니다.
pub const CONFIG_SCHEMA: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "additionalProperties": false,
    "properties": {
        "backend": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "base_url": {"type": "string"}
            }
        },
        "logging": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "format": {"type": "string", "enum": ["text", "json"]},
                "level": {"type": "string"},
                "output": {"type": "string", "minLength": 1}
            }
        },
        "preset": {
            "type": "string",
            "enum": ["edge", "none"]
        },
        "verification_file": {"type": "string"},
        "admin_prefixes": {
            "type": "array",
            "items": {"type": "string", "minLength": 1}
        },
        "rules": {
            "type": "array",
            "items": {
                "type": "object",
                "required": ["pattern"],
                "additionalProperties": false,
                "properties": {
                    "name": {"type": "string"},
                    "match": {"type": "string", "enum": ["exact", "prefix", "regex"]},
                    "pattern": {"type": "string", "minLength": 1},
                    "action": {
                        "type": "string",
                        "enum": ["pass-through", "rewrite", "rewrite-with-headers"]
                    },
                    "backend": {"type": "string"},
                    "headers": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["name"],
                            "additionalProperties": false,
                            "properties": {
                                "name": {"type": "string", "minLength": 1},
                                "value": {"type": "string"},
                                "from": {"type": "string", "enum": ["host", "scheme"]}
                            }
                        }
                    }
                }
            }
        }
    }
}"#;
