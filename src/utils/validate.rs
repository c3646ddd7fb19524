use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@.+_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// 字段长度上限（按字符计）
pub const ACCOUNT_NAME_MAX: usize = 20;
pub const ACCOUNT_CONTACT_MAX: usize = 20;
pub const ACCOUNT_ADDRESS_MAX: usize = 100;
pub const LABEL_MAX: usize = 45;
pub const DESCRIPTION_MAX: usize = 100;

// 评分范围（闭区间）
pub const GRADING_SCORE_MIN: i32 = 0;
pub const GRADING_SCORE_MAX: i32 = 10;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：1 <= x <= 150
    if username.is_empty() || username.chars().count() > 150 {
        return Err("Username length must be between 1 and 150 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, digits and @/./+/-/_");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 评分必须在 [0, 10] 之内
pub fn validate_grading_score(score: i32) -> Result<(), &'static str> {
    if !(GRADING_SCORE_MIN..=GRADING_SCORE_MAX).contains(&score) {
        return Err("Grading score must be between 0 and 10");
    }
    Ok(())
}

/// 必填文本字段：非空白且不超过上限
pub fn validate_required_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    validate_text(field, value, max)
}

/// 可为空的文本字段：只检查长度上限
pub fn validate_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len > max {
        return Err(format!(
            "{field} must be at most {max} characters (got {len})"
        ));
    }
    Ok(())
}

pub fn validate_submit_count(count: i32) -> Result<(), &'static str> {
    if count < 0 {
        return Err("Submit count must not be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grading_score_bounds() {
        for score in 0..=10 {
            assert!(validate_grading_score(score).is_ok(), "score {score}");
        }
        assert!(validate_grading_score(-1).is_err());
        assert!(validate_grading_score(11).is_err());
        assert!(validate_grading_score(i32::MAX).is_err());
    }

    #[test]
    fn test_username() {
        assert!(validate_username("kim01").is_ok());
        assert!(validate_username("a.b+c@d").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("grader@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_text_limits_count_characters() {
        // 20 个韩文字符，字节数超过 20 但字符数没有
        let name = "가".repeat(20);
        assert!(validate_required_text("name", &name, ACCOUNT_NAME_MAX).is_ok());
        assert!(validate_required_text("name", &"가".repeat(21), ACCOUNT_NAME_MAX).is_err());
        assert!(validate_required_text("name", "   ", ACCOUNT_NAME_MAX).is_err());
        assert!(validate_text("address", "", ACCOUNT_ADDRESS_MAX).is_ok());
    }

    #[test]
    fn test_submit_count() {
        assert!(validate_submit_count(0).is_ok());
        assert!(validate_submit_count(-1).is_err());
    }
}
