use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> String {
    "dev".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut config: Config = config.try_deserialize()?;

        // ENVIRONMENT is the deployment-wide switch shared with the
        // container tooling, so it wins over the APP__ namespace.
        if let Ok(environment) = std::env::var("ENVIRONMENT") {
            config.environment = environment;
        }

        Ok(config)
    }

    pub fn is_prod(&self) -> bool {
        self.environment == "prod"
    }
}
