use std::collections::HashMap;
use tracing::trace;

/// 정규화 키 → 원본 값 맵
pub type FlatConfig = HashMap<String, String>;

/// 값 없이 `TLS`만 지정되었을 때 기록하는 키 (자동 인증서 발급 표시)
pub const TLS_ACME_KEY: &str = "tls_acme";

/// `tls_acme` 키에 기록되는 마커 값
pub const TLS_ACME_MARKER: &str = "TLS";

/// 키 정규화: 소문자 변환 후 `.`을 `_`로 치환
///
/// `Redirect.EntryPoint`, `redirect.entryPoint`, `REDIRECT.ENTRYPOINT`는
/// 모두 `redirect_entrypoint`가 됩니다.
pub fn canonicalize_key(raw: &str) -> String {
    raw.to_lowercase().replace('.', "_")
}

/// 엔트리포인트 표현식을 평탄화된 키/값 맵으로 변환합니다.
///
/// 토큰은 공백으로 구분되며, 각 토큰은 **첫 번째** 콜론에서만 분리됩니다.
/// 따라서 `Address::8000`은 `address` → `:8000`이 됩니다.
///
/// ```
/// use rproxy_entrypoints::entrypoints::parse_entry_points_configuration;
///
/// let conf = parse_entry_points_configuration("Name:foo TLS:goo,gii TLS");
/// assert_eq!(conf["name"], "foo");
/// assert_eq!(conf["tls"], "goo,gii");
/// assert_eq!(conf["tls_acme"], "TLS");
/// ```
pub fn parse_entry_points_configuration(raw: &str) -> FlatConfig {
    let mut config = FlatConfig::new();

    for token in raw.split_whitespace() {
        match token.split_once(':') {
            Some((key, value)) => {
                config.insert(canonicalize_key(key), value.to_string());
            }
            None if token.eq_ignore_ascii_case("tls") => {
                config.insert(TLS_ACME_KEY.to_string(), TLS_ACME_MARKER.to_string());
            }
            None => {
                // 값이 없는 키는 존재만 표시
                config.insert(canonicalize_key(token), String::new());
            }
        }
        trace!(token = %token, "엔트리포인트 토큰 처리");
    }

    config
}
