use once_cell::sync::Lazy;
use regex::Regex;

const CLICKBAIT: &str = "클릭베이트";
const PARTIALLY_RESTRICTED: &str = "일부 제한됨";
const UNRELIABLE_CLAIMS: &str = "신뢰할 수 없는 주장";
const HEALTH_CONTENT_RESTRICTED: &str = "개인 맞춤 광고 정책 내 건강 관련 콘텐츠 (제한됨)";
const HEALTH_CONTENT: &str = "개인 맞춤 광고 정책 내 건강 관련 콘텐츠";

/// Matches "YouTube 광고 요건 - <category>[ (qualifier)] (제한됨)" and
/// captures the category up to the first parenthesis
static AD_REQUIREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"YouTube 광고 요건 - ([^(]+)(?:\([^)]*\))? \(제한됨\)")
        .expect("ad requirement pattern is valid")
});

/// Map a raw rejection-reason clause to its canonical category.
///
/// Rules are ordered and the first match wins; unrecognized text passes
/// through unchanged.
pub fn normalize_reason(raw: &str) -> String {
    if raw.contains(CLICKBAIT) {
        return CLICKBAIT.to_string();
    }
    if raw.contains(PARTIALLY_RESTRICTED) {
        return PARTIALLY_RESTRICTED.to_string();
    }
    if raw.contains(UNRELIABLE_CLAIMS) {
        return UNRELIABLE_CLAIMS.to_string();
    }
    if raw.contains(HEALTH_CONTENT_RESTRICTED) {
        return HEALTH_CONTENT.to_string();
    }
    if let Some(caps) = AD_REQUIREMENT.captures(raw) {
        if let Some(category) = caps.get(1) {
            return category.as_str().trim().to_string();
        }
    }
    raw.to_string()
}
