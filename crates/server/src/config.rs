use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
        }
    }
}

/// Layered lookup: built-in default, then `server.toml`, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("bind_addr") {
            settings.server_bind = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_matches_the_documented_port() {
        assert_eq!(Settings::default().server_bind, "127.0.0.1:8080");
    }

    #[test]
    fn file_config_overrides_the_bind_address() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "bind_addr = \"0.0.0.0:9000\"\n");
        assert_eq!(settings.server_bind, "0.0.0.0:9000");
    }

    #[test]
    fn unknown_keys_and_broken_toml_leave_the_default() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "public_url = \"http://example\"\n");
        assert_eq!(settings.server_bind, "127.0.0.1:8080");

        apply_file_config(&mut settings, "bind_addr = not toml");
        assert_eq!(settings.server_bind, "127.0.0.1:8080");
    }
}
