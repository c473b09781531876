#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub environment: Environment,
    pub storage_path: std::path::PathBuf,
    pub public_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(39400);

        let environment = match std::env::var("SOUNDVAULT_ENV")
            .unwrap_or_else(|_| "production".to_string())
            .to_lowercase()
            .as_str()
        {
            "development" => Environment::Development,
            _ => Environment::Production,
        };

        let storage_path = std::env::var("SOUNDVAULT_STORAGE_PATH")
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|_| std::path::PathBuf::from("./cdn"));

        let public_url = std::env::var("SOUNDVAULT_PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        Self {
            port,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:soundvault.db?mode=rwc".to_string()),
            environment,
            storage_path,
            public_url,
        }
    }
}
