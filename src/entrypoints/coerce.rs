//! 평탄화된 문자열 값을 타입이 있는 값으로 변환하는 함수들

use super::flatten::FlatConfig;

/// 참으로 인정하는 값 (대소문자 무시)
pub const TRUTHY_VALUES: [&str; 3] = ["on", "true", "enable"];

/// 값이 `on`, `true`, `enable` 중 하나이면 참
pub fn is_true(value: &str) -> bool {
    TRUTHY_VALUES.iter().any(|v| v.eq_ignore_ascii_case(value))
}

/// 맵에서 키를 찾아 불리언으로 변환합니다. 키가 없으면 거짓입니다.
pub fn to_bool(config: &FlatConfig, key: &str) -> bool {
    config.get(key).is_some_and(|value| is_true(value))
}

/// 쉼표로 분리 (공백 제거나 빈 항목 제거는 하지 않음)
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// 쉼표로 분리한 첫 두 항목을 쌍으로 반환합니다.
///
/// 항목이 부족하면 빈 문자열로 채웁니다.
pub fn split_pair(raw: &str) -> (String, String) {
    let mut parts = raw.split(',');
    let first = parts.next().unwrap_or_default().to_string();
    let second = parts.next().unwrap_or_default().to_string();
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bool() {
        let cases = [
            ("on", "foo", true),
            ("true", "foo", true),
            ("enable", "foo", true),
            ("bar", "foo", false),
            ("bar", "fii", false),
        ];

        for (value, key, expected) in cases {
            let conf: FlatConfig = [("foo".to_string(), value.to_string())].into();
            assert_eq!(to_bool(&conf, key), expected, "value={} key={}", value, key);
        }
    }

    #[test]
    fn test_is_true_ignores_case() {
        assert!(is_true("ON"));
        assert!(is_true("True"));
        assert!(is_true("ENABLE"));
        assert!(!is_true(""));
        assert!(!is_true("1"));
        assert!(!is_true("yes"));
    }

    #[test]
    fn test_split_list_keeps_empty_segments() {
        assert_eq!(split_list("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split_list(""), vec![""]);
        assert_eq!(split_list(" a , b"), vec![" a ", " b"]);
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("goo,gii"), ("goo".to_string(), "gii".to_string()));
        assert_eq!(split_pair("goo"), ("goo".to_string(), String::new()));
        assert_eq!(split_pair("a,b,c"), ("a".to_string(), "b".to_string()));
    }
}
