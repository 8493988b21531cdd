use std::env::var;

use dotenvy::dotenv;

pub struct Config {
    pub bot_token: String,
    pub database_url: String,
    pub dispatch_interval_secs: u64,
}

impl Config {
    pub fn try_parse() -> Result<Config, &'static str> {
        let _ = dotenv();

        Ok(Config {
            bot_token: var("BOT_TOKEN")
                .map_err(|_| "An error occured while getting BOT_TOKEN env param")?,
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://broadcaster.db".to_string()),
            dispatch_interval_secs: match var("DISPATCH_INTERVAL_SECS") {
                Ok(raw) => raw
                    .parse::<u64>()
                    .map_err(|_| "An error occured while parsing DISPATCH_INTERVAL_SECS env param")?,
                Err(_) => 60,
            },
        })
    }
}
