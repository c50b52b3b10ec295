use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the hosted backend, e.g. `https://xyz.supabase.co`.
    pub api_url: String,
    /// The service's public (anon) API key, sent on every request.
    pub api_key: String,
    /// Domain used to synthesize admin identities from usernames.
    pub admin_domain: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:54321".into(),
            api_key: "dev-anon-key".into(),
            admin_domain: "urex.admin".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("urex.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_url") {
                settings.api_url = v.clone();
            }
            if let Some(v) = file_cfg.get("api_key") {
                settings.api_key = v.clone();
            }
            if let Some(v) = file_cfg.get("admin_domain") {
                settings.admin_domain = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("UREX_API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("UREX_API_KEY") {
        settings.api_key = v;
    }
    if let Ok(v) = std::env::var("UREX_ADMIN_DOMAIN") {
        settings.admin_domain = v;
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, "http://127.0.0.1:54321");
        assert_eq!(settings.admin_domain, "urex.admin");
    }

    #[test]
    fn file_values_parse_as_flat_string_map() {
        let raw = "api_url = \"https://example.supabase.co\"\napi_key = \"k\"\n";
        let parsed: HashMap<String, String> = toml::from_str(raw).expect("parse");
        assert_eq!(
            parsed.get("api_url").map(String::as_str),
            Some("https://example.supabase.co")
        );
    }
}
