use std::collections::HashMap;
use tracing::debug;

use super::coerce::{is_true, split_list, split_pair};
use super::error::EntryPointError;
use super::flatten::FlatConfig;
use super::key::{ConfigKey, Section};
use super::types::{
    Auth, Basic, Certificate, ClientCa, ClientTls, Digest, EntryPoint, ForwardedHeaders,
    Forward, ProxyProtocol, Redirect, Tls,
};

/// 키 대응표로 한 번 해석된 설정
///
/// 인식하지 못한 키는 해석 단계에서 버려집니다.
struct ResolvedConfig {
    values: HashMap<ConfigKey, String>,
    /// 해석 전 원본 맵에 `forwardedheaders_*` 키가 있었는지 (오타 키 포함)
    forwarded_headers_configured: bool,
}

/// ForwardedHeaders 섹션 키의 정규화 접두사
const FORWARDED_HEADERS_PREFIX: &str = "forwardedheaders_";

impl ResolvedConfig {
    fn resolve(flat: FlatConfig) -> Self {
        let forwarded_headers_configured = flat
            .keys()
            .any(|key| key.starts_with(FORWARDED_HEADERS_PREFIX));
        let mut values = HashMap::with_capacity(flat.len());

        for (raw_key, value) in flat {
            match ConfigKey::lookup(&raw_key) {
                Some(key) => {
                    values.insert(key, value);
                }
                None => debug!(key = %raw_key, "알 수 없는 엔트리포인트 키 무시"),
            }
        }

        Self {
            values,
            forwarded_headers_configured,
        }
    }

    fn get(&self, key: ConfigKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    fn string(&self, key: ConfigKey) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    fn flag(&self, key: ConfigKey) -> bool {
        self.get(key).is_some_and(is_true)
    }

    fn list(&self, key: ConfigKey) -> Option<Vec<String>> {
        self.get(key).map(split_list)
    }

    /// 섹션에 속한 키가 하나라도 있는지
    fn has_any(&self, sections: &[Section]) -> bool {
        self.values.keys().any(|key| sections.contains(&key.section()))
    }
}

/// 평탄화된 설정을 `(이름, 엔트리포인트)`로 조립합니다.
///
/// `name` 키가 없으면 [`EntryPointError::MissingField`]를 반환합니다.
/// 그 외의 의미 검증(주소 형식, CIDR, 파일 존재 여부)은 하지 않습니다.
pub fn map_entry_point(flat: FlatConfig) -> Result<(String, EntryPoint), EntryPointError> {
    let mut config = ResolvedConfig::resolve(flat);

    let name = config
        .values
        .remove(&ConfigKey::Name)
        .ok_or(EntryPointError::MissingField {
            field: ConfigKey::Name.as_str(),
        })?;

    let (forwarded_headers, forwarded_headers_configured) = make_forwarded_headers(&config);
    debug!(
        entry_point = %name,
        forwarded_headers_configured,
        "엔트리포인트 레코드 조립"
    );

    let entry_point = EntryPoint {
        address: config.string(ConfigKey::Address),
        tls: make_tls(&config),
        redirect: make_redirect(&config),
        auth: make_auth(&config),
        whitelist_source_range: config.list(ConfigKey::WhiteListSourceRange),
        compress: config.flag(ConfigKey::Compress),
        proxy_protocol: make_proxy_protocol(&config),
        forwarded_headers,
    };

    Ok((name, entry_point))
}

fn make_tls(config: &ResolvedConfig) -> Option<Tls> {
    if !config.has_any(&[Section::Tls]) {
        return None;
    }

    let certificates = config
        .get(ConfigKey::Tls)
        .map(|raw| {
            let (cert_file, key_file) = split_pair(raw);
            vec![Certificate { cert_file, key_file }]
        })
        .unwrap_or_default();

    let client_ca = ClientCa {
        files: config.list(ConfigKey::Ca).unwrap_or_default(),
        optional: config.flag(ConfigKey::CaOptional),
    };

    Some(Tls {
        certificates,
        client_ca,
        min_version: config.get(ConfigKey::TlsMinVersion).map(str::to_string),
        cipher_suites: config.list(ConfigKey::TlsCipherSuites).unwrap_or_default(),
        sni_strict: config.flag(ConfigKey::TlsSniStrict),
    })
}

fn make_redirect(config: &ResolvedConfig) -> Option<Redirect> {
    if !config.has_any(&[Section::Redirect]) {
        return None;
    }

    Some(Redirect {
        entry_point: config.string(ConfigKey::RedirectEntryPoint),
        regex: config.string(ConfigKey::RedirectRegex),
        replacement: config.string(ConfigKey::RedirectReplacement),
        permanent: config.flag(ConfigKey::RedirectPermanent),
    })
}

fn make_auth(config: &ResolvedConfig) -> Option<Auth> {
    let auth_sections = [
        Section::Auth,
        Section::AuthBasic,
        Section::AuthDigest,
        Section::AuthForward,
        Section::AuthForwardTls,
    ];
    if !config.has_any(&auth_sections) {
        return None;
    }

    let basic = config.has_any(&[Section::AuthBasic]).then(|| Basic {
        users: config.list(ConfigKey::AuthBasicUsers).unwrap_or_default(),
        users_file: config.get(ConfigKey::AuthBasicUsersFile).map(str::to_string),
        remove_header: config.flag(ConfigKey::AuthBasicRemoveHeader),
    });

    let digest = config.has_any(&[Section::AuthDigest]).then(|| Digest {
        users: config.list(ConfigKey::AuthDigestUsers).unwrap_or_default(),
        users_file: config.get(ConfigKey::AuthDigestUsersFile).map(str::to_string),
        remove_header: config.flag(ConfigKey::AuthDigestRemoveHeader),
    });

    Some(Auth {
        basic,
        digest,
        forward: make_forward(config),
        header_field: config.get(ConfigKey::AuthHeaderField).map(str::to_string),
    })
}

fn make_forward(config: &ResolvedConfig) -> Option<Forward> {
    if !config.has_any(&[Section::AuthForward, Section::AuthForwardTls]) {
        return None;
    }

    let tls = config.has_any(&[Section::AuthForwardTls]).then(|| ClientTls {
        ca: config.string(ConfigKey::AuthForwardTlsCa),
        ca_optional: config.flag(ConfigKey::AuthForwardTlsCaOptional),
        cert: config.string(ConfigKey::AuthForwardTlsCert),
        key: config.string(ConfigKey::AuthForwardTlsKey),
        insecure_skip_verify: config.flag(ConfigKey::AuthForwardTlsInsecureSkipVerify),
    });

    Some(Forward {
        address: config.string(ConfigKey::AuthForwardAddress),
        tls,
        trust_forward_header: config.flag(ConfigKey::AuthForwardTrustForwardHeader),
        auth_response_headers: config
            .list(ConfigKey::AuthForwardAuthResponseHeaders)
            .unwrap_or_default(),
    })
}

fn make_proxy_protocol(config: &ResolvedConfig) -> Option<ProxyProtocol> {
    if !config.has_any(&[Section::ProxyProtocol]) {
        return None;
    }

    Some(ProxyProtocol {
        insecure: config.flag(ConfigKey::ProxyProtocolInsecure),
        trusted_ips: config.list(ConfigKey::ProxyProtocolTrustedIps).unwrap_or_default(),
    })
}

/// ForwardedHeaders 레코드와 `forwardedheaders_*` 키 존재 여부를 반환합니다.
///
/// 관련 키가 하나도 없으면 모든 소스를 신뢰(`insecure = true`)하고,
/// 하나라도 있으면 `forwardedheaders_insecure` 값이 참일 때만 신뢰합니다.
/// 인식하지 못한 `forwardedheaders_*` 키도 "설정됨"으로 봅니다.
fn make_forwarded_headers(config: &ResolvedConfig) -> (ForwardedHeaders, bool) {
    if !config.forwarded_headers_configured {
        return (ForwardedHeaders::trust_all(), false);
    }

    let forwarded_headers = ForwardedHeaders {
        insecure: config.flag(ConfigKey::ForwardedHeadersInsecure),
        trusted_ips: config
            .list(ConfigKey::ForwardedHeadersTrustedIps)
            .unwrap_or_default(),
    };

    (forwarded_headers, true)
}
