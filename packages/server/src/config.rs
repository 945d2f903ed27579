use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. An empty list allows any origin without credentials.
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Secret used to sign session cookies.
    pub secret: String,
    pub cookie_name: String,
    /// Only send the session cookie over HTTPS.
    pub secure: bool,
    /// Days of inactivity after which a session expires.
    pub inactivity_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        builder()?.build()?.try_deserialize()
    }
}

impl DatabaseConfig {
    /// Load only the `database` section, so tools that never serve HTTP do not
    /// need a session secret. `url` takes precedence over every other source.
    pub fn load(url: Option<String>) -> Result<Self, ConfigError> {
        builder()?
            .set_override_option("database.url", url)?
            .build()?
            .get("database")
    }
}

fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5555)?
        .set_default("server.cors.allow_origins", Vec::<String>::new())?
        .set_default("server.cors.max_age", 3600)?
        .set_default("database.max_connections", 20)?
        .set_default("database.min_connections", 1)?
        .set_default("session.cookie_name", "blog_session")?
        .set_default("session.secure", false)?
        .set_default("session.inactivity_days", 7)?
        // Load from config/config.toml
        .add_source(File::with_name("config/config").required(false))
        // Override from environment (e.g., BLOG__SESSION__SECRET)
        .add_source(
            Environment::with_prefix("BLOG")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors.allow_origins"),
        )
        // Conventional variable names win over everything else
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .set_override_option("session.secret", std::env::var("SECRET_KEY").ok())?)
}
