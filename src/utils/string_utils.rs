//! # 문자열 유틸리티
//!
//! 옵션 입력과 클레임 문자열 정리에 사용하는 공통 함수들입니다.

use crate::errors::{TokenError, TokenResult};

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 `OptionError`를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  api  ", "audience").unwrap(), "api");
/// assert!(validate_required_string("   ", "audience").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> TokenResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TokenError::option(
            field_name,
            format!("{}은(는) 필수입니다", field_name),
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// 빈 문자열/공백만 있는 경우 `None`을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 빈 문자열만 거부하고 값은 그대로 반환합니다.
///
/// 토큰 클레임과 정확히 비교해야 하는 값에 사용합니다.
pub fn require_non_empty(value: String, field_name: &str) -> TokenResult<String> {
    if value.is_empty() {
        return Err(TokenError::option(
            field_name,
            format!("{}은(는) 필수입니다", field_name),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("Hello", "name").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "name").unwrap(), "World");

        let err = validate_required_string("\t\n", "subject").unwrap_err();
        assert!(matches!(err, TokenError::OptionError { ref field, .. } if field == "subject"));
        assert!(validate_required_string("", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  api  ".to_string())), Some("api".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_require_non_empty_keeps_value() {
        assert_eq!(require_non_empty(" api ".to_string(), "audience").unwrap(), " api ");
        assert!(matches!(
            require_non_empty(String::new(), "audience"),
            Err(TokenError::OptionError { .. })
        ));
    }
}
