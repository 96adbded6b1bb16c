use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_STORAGE_PATH: &str = ".prep/local-storage.json";

/// Which Profile/Signup flavour the client runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Login and signup only write `user` to local storage.
    Local,
    /// Firebase identity plus the REST backend for profiles and resumes.
    Backend { firebase_api_key: String },
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub storage_path: PathBuf,
    pub auth_mode: AuthMode,
    pub rust_log: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        ClientConfig {
            api_url: get("PREP_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            storage_path: get("PREP_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH)),
            auth_mode: match get("FIREBASE_API_KEY") {
                Some(firebase_api_key) => AuthMode::Backend { firebase_api_key },
                None => AuthMode::Local,
            },
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_local_mode() {
        let config = config(&[]);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(config.auth_mode, AuthMode::Local);
    }

    #[test]
    fn test_firebase_key_switches_to_backend_mode() {
        let config = config(&[
            ("FIREBASE_API_KEY", "abc"),
            ("PREP_API_URL", "http://api.test/api"),
        ]);
        assert_eq!(
            config.auth_mode,
            AuthMode::Backend {
                firebase_api_key: "abc".into()
            }
        );
        assert_eq!(config.api_url, "http://api.test/api");

        assert_eq!(config_blank_key().auth_mode, AuthMode::Local);
    }

    fn config_blank_key() -> ClientConfig {
        config(&[("FIREBASE_API_KEY", "  ")])
    }
}
