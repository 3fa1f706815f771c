//! 엔트리포인트 표현식 컴파일러
//!
//! `Name:foo Address::8000 TLS:cert.pem,key.pem Compress:on` 처럼 공백으로 구분된
//! 한 줄 표현식을 [`EntryPoint`] 레코드로 변환합니다.
//!
//! 1. [`parse_entry_points_configuration`]: 토큰 분리 및 키 정규화
//! 2. [`map_entry_point`]: 키 대응표 해석, 타입 변환, 기본값 적용
//! 3. [`EntryPoints::set`]: 이름을 키로 컬렉션에 저장

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

mod coerce;
mod error;
mod flatten;
mod key;
mod mapper;
mod types;
pub mod validator;

pub use coerce::{is_true, split_list, split_pair, to_bool, TRUTHY_VALUES};
pub use error::EntryPointError;
pub use flatten::{
    canonicalize_key, parse_entry_points_configuration, FlatConfig, TLS_ACME_KEY,
    TLS_ACME_MARKER,
};
pub use key::{ConfigKey, Section};
pub use mapper::map_entry_point;
pub use types::{
    Auth, Basic, Certificate, ClientCa, ClientTls, Digest, EntryPoint, ForwardedHeaders,
    Forward, ProxyProtocol, Redirect, Tls,
};
pub use validator::{validate, validate_all, ValidationIssue};

impl EntryPoint {
    /// 표현식 하나를 `(이름, 엔트리포인트)`로 변환합니다.
    pub fn parse(expression: &str) -> Result<(String, Self), EntryPointError> {
        map_entry_point(parse_entry_points_configuration(expression))
    }
}

/// 이름 → 엔트리포인트 컬렉션
///
/// 내부 잠금은 없으므로 여러 곳에서 동시에 쓰려면 호출 측에서 보호해야 합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryPoints(BTreeMap<String, EntryPoint>);

impl EntryPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// 표현식을 해석해 컬렉션에 추가합니다.
    ///
    /// 같은 이름이 이미 있으면 덮어씁니다. 실패하면 컬렉션은 변경되지 않습니다.
    pub fn set(&mut self, expression: &str) -> Result<(), EntryPointError> {
        let (name, entry_point) = EntryPoint::parse(expression)?;

        if self.0.insert(name.clone(), entry_point).is_some() {
            debug!(entry_point = %name, "기존 엔트리포인트 덮어씀");
        }
        info!(entry_point = %name, "엔트리포인트 설정 등록");
        Ok(())
    }

    /// 여러 표현식을 처리합니다. 실패한 표현식은 건너뛰고 오류만 모읍니다.
    pub fn from_expressions<I, S>(expressions: I) -> (Self, Vec<EntryPointError>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entry_points = Self::new();
        let mut errors = Vec::new();

        for expression in expressions {
            let expression = expression.as_ref();
            if let Err(e) = entry_points.set(expression) {
                warn!(expression = %expression, error = %e, "엔트리포인트 표현식 처리 실패");
                errors.push(e);
            }
        }

        (entry_points, errors)
    }

    pub fn get(&self, name: &str) -> Option<&EntryPoint> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EntryPoint)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, EntryPoint> {
        self.0
    }
}

impl FromIterator<(String, EntryPoint)> for EntryPoints {
    fn from_iter<T: IntoIterator<Item = (String, EntryPoint)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for EntryPoints {
    type Item = (String, EntryPoint);
    type IntoIter = std::collections::btree_map::IntoIter<String, EntryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for EntryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, entry_point) in &self.0 {
            writeln!(f, "{}: {:?}", name, entry_point)?;
        }
        Ok(())
    }
}
