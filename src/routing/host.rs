use crate::routing::error::RoutingError;

/// 호스트 헤더를 분해한 불변 데이터 구조입니다.
///
/// # 필드
///
/// * `name` - 호스트 이름 (예: "example.com", "[::1]")
/// * `port` - 선택적 포트 번호
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostInfo {
    pub name: String,
    pub port: Option<u16>,
}

impl HostInfo {
    /// 호스트 헤더 값에서 HostInfo를 생성합니다.
    ///
    /// # 예제
    ///
    /// ```
    /// use edge_rewrite::routing::HostInfo;
    ///
    /// let host_info = HostInfo::from_header_value("example.com:8080").unwrap();
    /// assert_eq!(host_info.name, "example.com");
    /// assert_eq!(host_info.port, Some(8080));
    /// ```
    pub fn from_header_value(value: &str) -> Result<Self, RoutingError> {
        let invalid = |reason: &str| RoutingError::InvalidRequest {
            uri: value.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(invalid("호스트가 비어 있음"));
        }
        if value.chars().any(|c| c.is_whitespace() || c == '/' || c == '@') {
            return Err(invalid("호스트에 허용되지 않는 문자"));
        }

        // IPv6: [::1]:8080
        let (name, port) = if value.starts_with('[') {
            let end = value.find(']').ok_or_else(|| invalid("닫히지 않은 IPv6 주소"))?;
            let rest = &value[end + 1..];
            let port = match rest {
                "" => None,
                _ => Some(rest.strip_prefix(':').ok_or_else(|| invalid("잘못된 포트 구분자"))?),
            };
            (&value[..=end], port)
        } else {
            match value.split_once(':') {
                Some((name, port)) => (name, Some(port)),
                None => (value, None),
            }
        };

        if name.is_empty() || name == "[]" {
            return Err(invalid("호스트 이름이 비어 있음"));
        }

        let port = match port {
            Some(port) => {
                let parsed = port.parse::<u16>().map_err(|_| invalid("잘못된 포트"))?;
                if parsed == 0 {
                    return Err(invalid("포트는 0이 될 수 없습니다"));
                }
                Some(parsed)
            }
            None => None,
        };

        Ok(HostInfo {
            name: name.to_string(),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_variants() {
        let cases = vec![
            ("example.com", Some(("example.com", None))),
            ("example.com:8080", Some(("example.com", Some(8080)))),
            ("[::1]:8443", Some(("[::1]", Some(8443)))),
            ("[::1]", Some(("[::1]", None))),
            ("", None),
            (":8080", None),
            ("example.com:0", None),
            ("example.com:abc", None),
            ("a:1:2", None),
            ("[::1", None),
        ];

        for (input, expected) in cases {
            let result = HostInfo::from_header_value(input);
            match expected {
                Some((name, port)) => {
                    let info = result.unwrap_or_else(|e| panic!("{} 파싱 실패: {}", input, e));
                    assert_eq!(info.name, name);
                    assert_eq!(info.port, port);
                }
                None => assert!(result.is_err(), "{} 는 실패해야 함", input),
            }
        }
    }
}
