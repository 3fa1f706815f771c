//! 엔트리포인트 설정 레코드
//!
//! 표현식 매퍼가 생성하고 리스너 시작, TLS 핸드셰이크, 인증 미들웨어 등
//! 외부 구성 요소가 소비하는 구조체들입니다.

use serde::{Deserialize, Serialize};

/// 하나의 엔트리포인트(리스너) 설정
///
/// 이름은 [`EntryPoints`](super::EntryPoints)의 키로만 쓰이며 레코드에는
/// 저장되지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    /// 바인딩 주소 (예: `:8000`)
    #[serde(default)]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,

    /// 허용할 소스 IP/CIDR 목록
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist_source_range: Option<Vec<String>>,

    #[serde(default)]
    pub compress: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_protocol: Option<ProxyProtocol>,

    /// 항상 존재하며, 설정이 없으면 모든 소스를 신뢰합니다.
    #[serde(default = "ForwardedHeaders::trust_all")]
    pub forwarded_headers: ForwardedHeaders,
}

/// 인증서/키 파일 쌍
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub cert_file: String,
    pub key_file: String,
}

/// 클라이언트 인증서 검증용 CA 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCa {
    #[serde(default)]
    pub files: Vec<String>,

    /// 참이면 클라이언트 인증서 제출이 필수가 아님
    #[serde(default)]
    pub optional: bool,
}

/// 엔트리포인트 TLS 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tls {
    #[serde(default)]
    pub certificates: Vec<Certificate>,

    #[serde(default)]
    pub client_ca: ClientCa,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cipher_suites: Vec<String>,

    #[serde(default)]
    pub sni_strict: bool,
}

/// 리다이렉트 규칙
///
/// `entry_point` 방식과 `regex`/`replacement` 방식을 동시에 지정할 수 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    #[serde(default)]
    pub entry_point: String,
    #[serde(default)]
    pub regex: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(default)]
    pub permanent: bool,
}

/// 인증 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic: Option<Basic>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<Digest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward: Option<Forward>,

    /// 인증된 사용자 이름을 전달할 헤더
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_field: Option<String>,
}

/// Basic 인증 사용자 목록 (`user:hash` 형식)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basic {
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_file: Option<String>,
    #[serde(default)]
    pub remove_header: bool,
}

/// Digest 인증 사용자 목록 (`user:realm:hash` 형식)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Digest {
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_file: Option<String>,
    #[serde(default)]
    pub remove_header: bool,
}

/// 외부 인증 서버로 위임하는 포워드 인증
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forward {
    #[serde(default)]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ClientTls>,

    #[serde(default)]
    pub trust_forward_header: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auth_response_headers: Vec<String>,
}

/// 인증 서버 연결용 클라이언트 TLS 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTls {
    #[serde(default)]
    pub ca: String,
    #[serde(default)]
    pub ca_optional: bool,
    #[serde(default)]
    pub cert: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyProtocol {
    #[serde(default)]
    pub insecure: bool,
    #[serde(default, rename = "trustedIPs")]
    pub trusted_ips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardedHeaders {
    /// 참이면 모든 소스의 `X-Forwarded-*` 헤더를 신뢰
    #[serde(default)]
    pub insecure: bool,
    #[serde(default, rename = "trustedIPs")]
    pub trusted_ips: Vec<String>,
}

impl ForwardedHeaders {
    /// 아무 설정도 없을 때 사용하는 값: 모든 소스 신뢰
    pub fn trust_all() -> Self {
        Self {
            insecure: true,
            trusted_ips: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let entry_point = EntryPoint {
            address: ":80".to_string(),
            proxy_protocol: Some(ProxyProtocol {
                insecure: false,
                trusted_ips: vec!["10.0.0.1".to_string()],
            }),
            forwarded_headers: ForwardedHeaders::trust_all(),
            ..Default::default()
        };

        let json = serde_json::to_value(&entry_point).unwrap();
        assert_eq!(json["address"], ":80");
        assert_eq!(json["proxyProtocol"]["trustedIPs"][0], "10.0.0.1");
        assert_eq!(json["forwardedHeaders"]["insecure"], true);
        assert!(json.get("tls").is_none());
        assert!(json.get("whitelistSourceRange").is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let entry_point: EntryPoint = serde_json::from_str(r#"{"address": ":443"}"#).unwrap();
        assert_eq!(entry_point.address, ":443");
        assert!(entry_point.tls.is_none());
        assert_eq!(entry_point.forwarded_headers, ForwardedHeaders::trust_all());

        // 명시된 값은 그대로 사용
        let entry_point: EntryPoint =
            serde_json::from_str(r#"{"forwardedHeaders": {"trustedIPs": ["10.0.0.1"]}}"#).unwrap();
        assert!(!entry_point.forwarded_headers.insecure);
        assert_eq!(entry_point.forwarded_headers.trusted_ips, vec!["10.0.0.1"]);
    }
}
