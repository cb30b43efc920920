use std::num::NonZeroU32;

use anyhow::{Context, Result};

use crate::store::NameCollation;

const DEFAULT_DATABASE_URL: &str = "sqlite://database.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: NonZeroU32 = NonZeroU32::new(16).unwrap();

/// Server configuration, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: NonZeroU32,
    pub name_collation: NameCollation,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
                Some(n) => n
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a positive number")?,
                None => DEFAULT_MAX_CONNECTIONS,
            },
            name_collation: match lookup("ROOM_NAME_COLLATION") {
                Some(c) => c.parse().context("invalid ROOM_NAME_COLLATION")?,
                None => NameCollation::default(),
            },
        })
    }
}
