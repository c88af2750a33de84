//! Application settings loaded via OrthoConfig.
//!
//! Every field can be set with a `HEALTHSPIRE_`-prefixed environment
//! variable, a command-line flag, or a configuration file. Unset fields fall
//! back to the defaults exposed by the accessor methods.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::uploads::DEFAULT_UPLOAD_LIMIT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_CORS_ORIGIN: &str = "*";
const DEFAULT_UPLOADS_DIR: &str = "uploads";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a `host:port` socket address.
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
    /// Only one half of the seed admin identity was configured.
    #[error("seed_admin_email and seed_admin_password must be set together")]
    IncompleteSeedAdmin,
}

/// Start-up configuration for the HealthSpire backend.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HEALTHSPIRE")]
pub struct AppSettings {
    /// PostgreSQL connection URL. Without it content lives in memory.
    pub database_url: Option<String>,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Email of the admin account provisioned on first login.
    pub seed_admin_email: Option<String>,
    /// Password of the admin account provisioned on first login.
    pub seed_admin_password: Option<String>,
    /// Allowed browser origin, or `*` for any.
    pub cors_origin: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Directory receiving uploaded files.
    pub uploads_dir: Option<PathBuf>,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: Option<usize>,
    /// JSON document replacing the packaged default content for seeding and
    /// resets.
    pub defaults_file: Option<PathBuf>,
}

impl AppSettings {
    /// Configured CORS origin, defaulting to any origin.
    pub fn cors_origin(&self) -> &str {
        self.cors_origin.as_deref().unwrap_or(DEFAULT_CORS_ORIGIN)
    }

    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Uploads directory, defaulting to `./uploads`.
    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR))
    }

    /// Request body cap, defaulting to 10 MiB.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes.unwrap_or(DEFAULT_UPLOAD_LIMIT)
    }

    /// Seed admin identity when both halves are configured.
    pub fn seed_admin(&self) -> Result<Option<(&str, &str)>, SettingsError> {
        match (
            self.seed_admin_email.as_deref(),
            self.seed_admin_password.as_deref(),
        ) {
            (Some(email), Some(password)) => Ok(Some((email, password))),
            (None, None) => Ok(None),
            _ => Err(SettingsError::IncompleteSeedAdmin),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 9] = [
        "HEALTHSPIRE_DATABASE_URL",
        "HEALTHSPIRE_JWT_SECRET",
        "HEALTHSPIRE_SEED_ADMIN_EMAIL",
        "HEALTHSPIRE_SEED_ADMIN_PASSWORD",
        "HEALTHSPIRE_CORS_ORIGIN",
        "HEALTHSPIRE_BIND_ADDR",
        "HEALTHSPIRE_UPLOADS_DIR",
        "HEALTHSPIRE_MAX_BODY_BYTES",
        "HEALTHSPIRE_DEFAULTS_FILE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("healthspire-backend")])
            .expect("config should load")
    }

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();

        assert!(settings.database_url.is_none());
        assert!(settings.jwt_secret.is_none());
        assert_eq!(settings.cors_origin(), "*");
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:4000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.uploads_dir(), PathBuf::from("uploads"));
        assert_eq!(settings.max_body_bytes(), 10 * 1024 * 1024);
        assert!(settings.seed_admin().expect("no seed admin").is_none());
        assert!(settings.defaults_file.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("HEALTHSPIRE_DATABASE_URL", "postgres://localhost/healthspire"),
            ("HEALTHSPIRE_CORS_ORIGIN", "https://healthspire.example"),
            ("HEALTHSPIRE_BIND_ADDR", "127.0.0.1:8080"),
            ("HEALTHSPIRE_UPLOADS_DIR", "/srv/uploads"),
            ("HEALTHSPIRE_MAX_BODY_BYTES", "2048"),
            ("HEALTHSPIRE_SEED_ADMIN_EMAIL", "admin@healthspire.example"),
            ("HEALTHSPIRE_SEED_ADMIN_PASSWORD", "correct horse"),
            ("HEALTHSPIRE_DEFAULTS_FILE", "/etc/healthspire/defaults.json"),
        ]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/healthspire")
        );
        assert_eq!(settings.cors_origin(), "https://healthspire.example");
        assert_eq!(
            settings.bind_addr().expect("address").to_string(),
            "127.0.0.1:8080"
        );
        assert_eq!(settings.uploads_dir(), PathBuf::from("/srv/uploads"));
        assert_eq!(settings.max_body_bytes(), 2048);
        assert_eq!(
            settings.seed_admin().expect("seed admin"),
            Some(("admin@healthspire.example", "correct horse"))
        );
        assert_eq!(
            settings.defaults_file,
            Some(PathBuf::from("/etc/healthspire/defaults.json"))
        );
    }

    #[rstest]
    fn malformed_bind_addresses_are_reported() {
        let settings = AppSettings {
            bind_addr: Some("localhost".to_owned()),
            ..AppSettings::default()
        };

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }

    #[rstest]
    fn half_configured_seed_admin_is_an_error() {
        let settings = AppSettings {
            seed_admin_email: Some("admin@healthspire.example".to_owned()),
            ..AppSettings::default()
        };

        assert!(matches!(
            settings.seed_admin(),
            Err(SettingsError::IncompleteSeedAdmin)
        ));
    }
}
