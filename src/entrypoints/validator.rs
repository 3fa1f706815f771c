use std::fmt;
use std::net::IpAddr;
use regex_lite::Regex;
use tracing::{debug, warn};
use url::Url;

use super::types::EntryPoint;
use super::EntryPoints;

/// 엔트리포인트 검사에서 발견된 문제
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub entry_point: String,
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "엔트리포인트 {} 의 {} 오류: {}", self.entry_point, self.field, self.message)
    }
}

/// 매핑이 끝난 엔트리포인트를 소비자 관점에서 검사합니다.
///
/// 매퍼는 관대하게 동작하므로 잘못된 값도 그대로 레코드에 들어갑니다.
/// 이 검사는 파일 존재 여부나 네트워크는 확인하지 않고 형식만 봅니다.
pub fn validate(name: &str, entry_point: &EntryPoint) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut report = |field: &'static str, message: String| {
        issues.push(ValidationIssue {
            entry_point: name.to_string(),
            field,
            message,
        });
    };

    if let Err(message) = check_address(&entry_point.address) {
        report("address", message);
    }

    if let Some(tls) = &entry_point.tls {
        for certificate in &tls.certificates {
            if certificate.cert_file.is_empty() || certificate.key_file.is_empty() {
                report("tls", "인증서와 키 파일이 모두 필요합니다".to_string());
            }
        }
    }

    if let Some(redirect) = &entry_point.redirect {
        if !redirect.regex.is_empty() {
            if let Err(e) = Regex::new(&redirect.regex) {
                report("redirect.regex", e.to_string());
            }
        } else if !redirect.replacement.is_empty() {
            report("redirect.replacement", "regex 없이 replacement만 지정되었습니다".to_string());
        }
    }

    if let Some(forward) = entry_point.auth.as_ref().and_then(|auth| auth.forward.as_ref()) {
        if let Err(e) = Url::parse(&forward.address) {
            report("auth.forward.address", format!("{}: {}", forward.address, e));
        }
    }

    let ranges = [
        ("whiteListSourceRange", entry_point.whitelist_source_range.as_deref()),
        (
            "proxyProtocol.trustedIPs",
            entry_point.proxy_protocol.as_ref().map(|p| p.trusted_ips.as_slice()),
        ),
        (
            "forwardedHeaders.trustedIPs",
            Some(entry_point.forwarded_headers.trusted_ips.as_slice()),
        ),
    ];
    for (field, entries) in ranges {
        for entry in entries.unwrap_or_default() {
            if let Err(message) = check_ip_range(entry) {
                report(field, message);
            }
        }
    }

    issues
}

/// 컬렉션 전체를 검사하고 문제를 경고 로그로 남깁니다.
pub fn validate_all(entry_points: &EntryPoints) -> Vec<ValidationIssue> {
    let issues: Vec<ValidationIssue> = entry_points
        .iter()
        .flat_map(|(name, entry_point)| validate(name, entry_point))
        .collect();

    for issue in &issues {
        warn!(
            entry_point = %issue.entry_point,
            field = issue.field,
            "{}", issue.message
        );
    }
    debug!(count = issues.len(), "엔트리포인트 검사 완료");

    issues
}

/// 빈 주소 또는 `[호스트]:포트`
fn check_address(address: &str) -> Result<(), String> {
    if address.is_empty() {
        return Ok(());
    }

    let (_, port) = address
        .rsplit_once(':')
        .ok_or_else(|| format!("포트가 없습니다: {}", address))?;

    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(format!("포트는 1-65535 범위여야 합니다: {}", address)),
        Ok(_) => Ok(()),
    }
}

/// IP 주소 또는 CIDR
fn check_ip_range(entry: &str) -> Result<(), String> {
    let (ip, prefix) = match entry.split_once('/') {
        Some((ip, prefix)) => (ip, Some(prefix)),
        None => (entry, None),
    };

    let ip: IpAddr = ip
        .parse()
        .map_err(|_| format!("유효하지 않은 IP 주소: {}", entry))?;

    if let Some(prefix) = prefix {
        let max = if ip.is_ipv4() { 32 } else { 128 };
        match prefix.parse::<u8>() {
            Ok(len) if len <= max => {}
            _ => return Err(format!("유효하지 않은 CIDR 접두사 길이: {}", entry)),
        }
    }

    Ok(())
}
