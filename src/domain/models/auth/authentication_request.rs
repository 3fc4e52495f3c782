/// 인증 모드를 정의하는 열거형
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthMode {
    /// 인증이 반드시 필요함
    Required,
    /// 인증이 선택사항임 (있으면 검증, 없어도 허용)
    Optional,
}

/// 요구되는 스코프 정보
#[derive(Debug, Clone)]
pub enum RequiredScope {
    /// 특정 단일 스코프가 필요
    Single(String),
    /// 여러 스코프 중 하나라도 있으면 허용 (OR 조건)
    Any(Vec<String>),
    /// 모든 스코프가 필요 (AND 조건)
    All(Vec<String>),
}

impl RequiredScope {
    /// 토큰 스코프가 요구사항을 만족하는지 확인
    pub fn is_satisfied(&self, scopes: &[String]) -> bool {
        match self {
            RequiredScope::Single(required) => scopes.contains(required),
            RequiredScope::Any(required) => required.iter().any(|scope| scopes.contains(scope)),
            RequiredScope::All(required) => required.iter().all(|scope| scopes.contains(scope)),
        }
    }
}
