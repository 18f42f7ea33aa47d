use serde::Deserialize;

/// Which engine backs the user repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl StorageKind {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => anyhow::bail!("unknown APP_STORAGE value: {other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub profile: String,
    pub storage: StorageKind,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage = StorageKind::parse(
            &std::env::var("APP_STORAGE").unwrap_or_else(|_| "postgres".into()),
        )?;

        let database = match storage {
            StorageKind::Postgres => Some(DatabaseConfig {
                url: std::env::var("DATABASE_URL")?,
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(10),
            }),
            StorageKind::Memory => None,
        };

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            profile: std::env::var("APP_PROFILE").unwrap_or_else(|_| "default".into()),
            storage,
            database,
        })
    }

    /// Demo rows are only inserted under the `local` profile.
    pub fn seeds_demo_data(&self) -> bool {
        self.profile.eq_ignore_ascii_case("local")
    }

    pub fn in_memory() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            profile: "test".into(),
            storage: StorageKind::Memory,
            database: None,
        }
    }
}
