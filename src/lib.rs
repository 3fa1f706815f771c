//! 리버스 프록시 엔트리포인트 설정 컴파일러입니다.
//!
//! 한 줄짜리 엔트리포인트 표현식을 리스너 시작, TLS, 인증 구성 요소가 사용하는
//! 타입이 있는 설정으로 변환합니다.
//!
//! # 주요 기능
//!
//! - 대소문자/구분자 무관 키 정규화 (`Redirect.EntryPoint` == `redirect.entrypoint`)
//! - 목록, 불리언, 인증서 쌍 변환
//! - ForwardedHeaders 기본값 규칙
//! - TOML 파일 또는 환경 변수에서 표현식 로드
//!
//! # 예제
//!
//! ```
//! use rproxy_entrypoints::entrypoints::EntryPoints;
//!
//! let mut entry_points = EntryPoints::new();
//! entry_points
//!     .set("Name:https Address::443 TLS:cert.pem,key.pem Compress:on")
//!     .unwrap();
//!
//! let https = entry_points.get("https").unwrap();
//! assert_eq!(https.address, ":443");
//! assert!(https.compress);
//!
//! // ForwardedHeaders 설정이 없으면 모든 소스를 신뢰
//! assert!(https.forwarded_headers.insecure);
//! ```
//!
//! # 자동 TLS 마커
//!
//! ```
//! use rproxy_entrypoints::entrypoints::{parse_entry_points_configuration, TLS_ACME_KEY};
//!
//! let conf = parse_entry_points_configuration("Name:https TLS");
//! assert_eq!(conf.get(TLS_ACME_KEY).map(String::as_str), Some("TLS"));
//! ```

pub mod entrypoints;
pub mod logging;
pub mod settings;
