//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `EXERCISE_LIBRARY_*` environment variables, command-line
//! flags, or a configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised when a configured value cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Runtime settings for the exercise library service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXERCISE_LIBRARY")]
pub struct ExerciseLibrarySettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without it exercises live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    pub run_migrations: Option<bool>,
}

impl ExerciseLibrarySettings {
    /// Return the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not
    /// parse as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// Return the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the pool size, falling back to 10.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Whether to apply embedded migrations at startup. Defaults to `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "EXERCISE_LIBRARY_BIND_ADDR",
        "EXERCISE_LIBRARY_DATABASE_URL",
        "EXERCISE_LIBRARY_DB_MAX_CONNECTIONS",
        "EXERCISE_LIBRARY_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ExerciseLibrarySettings {
        ExerciseLibrarySettings::load_from_iter([OsString::from("exercise-library")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), 10);
        assert!(settings.run_migrations());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EXERCISE_LIBRARY_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "EXERCISE_LIBRARY_DATABASE_URL",
                Some("postgres://localhost/exercises".to_owned()),
            ),
            ("EXERCISE_LIBRARY_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("EXERCISE_LIBRARY_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9090)))
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/exercises")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(!settings.run_migrations());
    }

    #[rstest]
    fn blank_database_url_counts_as_absent() {
        let _guard = lock_env([
            ("EXERCISE_LIBRARY_BIND_ADDR", None::<String>),
            ("EXERCISE_LIBRARY_DATABASE_URL", Some("   ".to_owned())),
            ("EXERCISE_LIBRARY_DB_MAX_CONNECTIONS", None::<String>),
            ("EXERCISE_LIBRARY_RUN_MIGRATIONS", None::<String>),
        ]);

        assert_eq!(load_from_empty_args().database_url(), None);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = ExerciseLibrarySettings {
            bind_addr: Some("not-an-address".to_owned()),
            database_url: None,
            db_max_connections: None,
            run_migrations: None,
        };

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }

    #[rstest]
    #[case::unset(None, true)]
    #[case::enabled(Some(true), true)]
    #[case::disabled(Some(false), false)]
    fn run_migrations_defaults_to_enabled(
        #[case] configured: Option<bool>,
        #[case] expected: bool,
    ) {
        let settings = ExerciseLibrarySettings {
            bind_addr: None,
            database_url: None,
            db_max_connections: None,
            run_migrations: configured,
        };

        assert_eq!(settings.run_migrations(), expected);
    }
}
