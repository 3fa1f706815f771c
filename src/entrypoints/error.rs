#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryPointError {
    #[error("엔트리포인트 필수 항목 누락: {field}")]
    MissingField { field: &'static str },
}
