/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub static_dir: String,
    pub seed_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://tarefas.db?mode=rwc".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            static_dir: "frontend/dist".to_string(),
            seed_data: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            database_url: value("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: value("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: value("STATIC_DIR").unwrap_or(defaults.static_dir),
            seed_data: value("SEED_DATA")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.seed_data),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
