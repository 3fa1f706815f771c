use std::fmt;
use std::str::FromStr;

/// 엔트리포인트 표현식에서 인식하는 정규화된 키 식별자
///
/// 정규화 키는 소문자 + `.` → `_` 변환 결과입니다.
/// (`Auth.Forward.TLS.CA` → `auth_forward_tls_ca`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    Name,
    Address,
    Tls,
    TlsAcme,
    TlsMinVersion,
    TlsCipherSuites,
    TlsSniStrict,
    Ca,
    CaOptional,
    RedirectEntryPoint,
    RedirectRegex,
    RedirectReplacement,
    RedirectPermanent,
    Compress,
    WhiteListSourceRange,
    ProxyProtocolInsecure,
    ProxyProtocolTrustedIps,
    ForwardedHeadersInsecure,
    ForwardedHeadersTrustedIps,
    AuthBasicUsers,
    AuthBasicUsersFile,
    AuthBasicRemoveHeader,
    AuthDigestUsers,
    AuthDigestUsersFile,
    AuthDigestRemoveHeader,
    AuthHeaderField,
    AuthForwardAddress,
    AuthForwardTrustForwardHeader,
    AuthForwardAuthResponseHeaders,
    AuthForwardTlsCa,
    AuthForwardTlsCaOptional,
    AuthForwardTlsCert,
    AuthForwardTlsKey,
    AuthForwardTlsInsecureSkipVerify,
}

/// 키가 속한 하위 스키마
///
/// 매퍼는 섹션 단위로 레코드를 조립하며, 섹션에 속한 키가 하나라도 있어야
/// 해당 레코드를 생성합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Root,
    Tls,
    Redirect,
    Auth,
    AuthBasic,
    AuthDigest,
    AuthForward,
    AuthForwardTls,
    ProxyProtocol,
    ForwardedHeaders,
}

/// 정규화 키 문자열과 식별자의 단일 대응표
const KEY_TABLE: &[(&str, ConfigKey, Section)] = &[
    ("name", ConfigKey::Name, Section::Root),
    ("address", ConfigKey::Address, Section::Root),
    ("tls", ConfigKey::Tls, Section::Tls),
    ("tls_acme", ConfigKey::TlsAcme, Section::Root),
    ("tls_minversion", ConfigKey::TlsMinVersion, Section::Tls),
    ("tls_ciphersuites", ConfigKey::TlsCipherSuites, Section::Tls),
    ("tls_snistrict", ConfigKey::TlsSniStrict, Section::Tls),
    ("ca", ConfigKey::Ca, Section::Tls),
    ("ca_optional", ConfigKey::CaOptional, Section::Tls),
    ("redirect_entrypoint", ConfigKey::RedirectEntryPoint, Section::Redirect),
    ("redirect_regex", ConfigKey::RedirectRegex, Section::Redirect),
    ("redirect_replacement", ConfigKey::RedirectReplacement, Section::Redirect),
    ("redirect_permanent", ConfigKey::RedirectPermanent, Section::Redirect),
    ("compress", ConfigKey::Compress, Section::Root),
    ("whitelistsourcerange", ConfigKey::WhiteListSourceRange, Section::Root),
    ("proxyprotocol_insecure", ConfigKey::ProxyProtocolInsecure, Section::ProxyProtocol),
    ("proxyprotocol_trustedips", ConfigKey::ProxyProtocolTrustedIps, Section::ProxyProtocol),
    ("forwardedheaders_insecure", ConfigKey::ForwardedHeadersInsecure, Section::ForwardedHeaders),
    ("forwardedheaders_trustedips", ConfigKey::ForwardedHeadersTrustedIps, Section::ForwardedHeaders),
    ("auth_basic_users", ConfigKey::AuthBasicUsers, Section::AuthBasic),
    ("auth_basic_usersfile", ConfigKey::AuthBasicUsersFile, Section::AuthBasic),
    ("auth_basic_removeheader", ConfigKey::AuthBasicRemoveHeader, Section::AuthBasic),
    ("auth_digest_users", ConfigKey::AuthDigestUsers, Section::AuthDigest),
    ("auth_digest_usersfile", ConfigKey::AuthDigestUsersFile, Section::AuthDigest),
    ("auth_digest_removeheader", ConfigKey::AuthDigestRemoveHeader, Section::AuthDigest),
    ("auth_headerfield", ConfigKey::AuthHeaderField, Section::Auth),
    ("auth_forward_address", ConfigKey::AuthForwardAddress, Section::AuthForward),
    ("auth_forward_trustforwardheader", ConfigKey::AuthForwardTrustForwardHeader, Section::AuthForward),
    ("auth_forward_authresponseheaders", ConfigKey::AuthForwardAuthResponseHeaders, Section::AuthForward),
    ("auth_forward_tls_ca", ConfigKey::AuthForwardTlsCa, Section::AuthForwardTls),
    ("auth_forward_tls_caoptional", ConfigKey::AuthForwardTlsCaOptional, Section::AuthForwardTls),
    ("auth_forward_tls_cert", ConfigKey::AuthForwardTlsCert, Section::AuthForwardTls),
    ("auth_forward_tls_key", ConfigKey::AuthForwardTlsKey, Section::AuthForwardTls),
    ("auth_forward_tls_insecureskipverify", ConfigKey::AuthForwardTlsInsecureSkipVerify, Section::AuthForwardTls),
];

impl ConfigKey {
    /// 인식 가능한 모든 키 (대응표 순서)
    pub const ALL: [ConfigKey; 34] = [
        ConfigKey::Name,
        ConfigKey::Address,
        ConfigKey::Tls,
        ConfigKey::TlsAcme,
        ConfigKey::TlsMinVersion,
        ConfigKey::TlsCipherSuites,
        ConfigKey::TlsSniStrict,
        ConfigKey::Ca,
        ConfigKey::CaOptional,
        ConfigKey::RedirectEntryPoint,
        ConfigKey::RedirectRegex,
        ConfigKey::RedirectReplacement,
        ConfigKey::RedirectPermanent,
        ConfigKey::Compress,
        ConfigKey::WhiteListSourceRange,
        ConfigKey::ProxyProtocolInsecure,
        ConfigKey::ProxyProtocolTrustedIps,
        ConfigKey::ForwardedHeadersInsecure,
        ConfigKey::ForwardedHeadersTrustedIps,
        ConfigKey::AuthBasicUsers,
        ConfigKey::AuthBasicUsersFile,
        ConfigKey::AuthBasicRemoveHeader,
        ConfigKey::AuthDigestUsers,
        ConfigKey::AuthDigestUsersFile,
        ConfigKey::AuthDigestRemoveHeader,
        ConfigKey::AuthHeaderField,
        ConfigKey::AuthForwardAddress,
        ConfigKey::AuthForwardTrustForwardHeader,
        ConfigKey::AuthForwardAuthResponseHeaders,
        ConfigKey::AuthForwardTlsCa,
        ConfigKey::AuthForwardTlsCaOptional,
        ConfigKey::AuthForwardTlsCert,
        ConfigKey::AuthForwardTlsKey,
        ConfigKey::AuthForwardTlsInsecureSkipVerify,
    ];

    /// 정규화 키 문자열로 식별자를 찾습니다.
    ///
    /// 인식하지 못하는 키는 `None`을 반환합니다.
    pub fn lookup(canonical: &str) -> Option<Self> {
        KEY_TABLE
            .iter()
            .find(|(name, _, _)| *name == canonical)
            .map(|(_, key, _)| *key)
    }

    /// 정규화 키 문자열
    pub fn as_str(self) -> &'static str {
        self.entry().0
    }

    /// 키가 속한 하위 스키마
    pub fn section(self) -> Section {
        self.entry().2
    }

    fn entry(self) -> &'static (&'static str, ConfigKey, Section) {
        // KEY_TABLE은 ALL과 같은 순서로 모든 변형을 담고 있음
        &KEY_TABLE[self as usize]
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| format!("Unknown entry point key: {}", s))
    }
}
