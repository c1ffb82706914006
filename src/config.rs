use std::env;

pub const BASE_URL_VAR: &str = "DASHBOARD_URL";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub fn resolve_base_url() -> String {
    base_url_from(env::var(BASE_URL_VAR).ok())
}

fn base_url_from(value: Option<String>) -> String {
    value
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_when_unset_or_blank() {
        assert_eq!(base_url_from(None), DEFAULT_BASE_URL);
        assert_eq!(base_url_from(Some("   ".into())), DEFAULT_BASE_URL);
    }

    #[test]
    fn trims_configured_url() {
        assert_eq!(
            base_url_from(Some(" http://dashboard:9000 ".into())),
            "http://dashboard:9000"
        );
    }
}
