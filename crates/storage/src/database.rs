use std::str::FromStr;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use tracing::info;

use crate::error::Result;

/// Named connection profile. The profile name is reported to Postgres as the
/// `application_name`, and TLS is required unless the profile disables it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    pub name: String,
    pub require_tls: bool,
}

impl ConnectionProfile {
    pub const DEFAULT_NAME: &'static str = "heroku";

    /// TLS stays on for every `DEV_MODE` value except `DEV`.
    pub fn from_dev_mode(name: impl Into<String>, dev_mode: Option<&str>) -> Self {
        Self {
            name: name.into(),
            require_tls: dev_mode != Some("DEV"),
        }
    }

    fn ssl_mode(&self) -> PgSslMode {
        if self.require_tls {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        }
    }
}

impl Default for ConnectionProfile {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            require_tls: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str, profile: &ConnectionProfile) -> Result<Self> {
        let options = PgConnectOptions::from_str(database_url)?
            .application_name(&profile.name)
            .ssl_mode(profile.ssl_mode());

        info!(
            "Opening '{}' connection pool (tls: {})",
            profile.name, profile.require_tls
        );

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_mode_disables_tls() {
        let profile = ConnectionProfile::from_dev_mode("heroku", Some("DEV"));
        assert!(!profile.require_tls);
        assert!(matches!(profile.ssl_mode(), PgSslMode::Disable));
    }

    #[test]
    fn test_other_dev_modes_keep_tls() {
        assert!(ConnectionProfile::from_dev_mode("heroku", None).require_tls);
        assert!(ConnectionProfile::from_dev_mode("heroku", Some("dev")).require_tls);
        assert!(ConnectionProfile::from_dev_mode("heroku", Some("PROD")).require_tls);
    }

    #[test]
    fn test_default_profile_is_heroku() {
        let profile = ConnectionProfile::default();
        assert_eq!(profile.name, "heroku");
        assert!(profile.require_tls);
    }
}
