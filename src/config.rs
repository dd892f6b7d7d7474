use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "local")]
    pub environment: String,

    #[clap(env, long, value_enum, default_value = "memory")]
    pub storage: StorageBackend,

    #[clap(env, long)]
    pub database_url: Option<String>,

    /// Defaults to the number of CPUs.
    #[clap(env, long)]
    pub db_pool_size: Option<u32>,

    #[clap(env, long, default_value_t = 8080)]
    pub port: u16,

    /// Comma separated list of allowed CORS origins
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,
}

impl Config {
    pub fn pool_size(&self) -> u32 {
        self.db_pool_size
            .unwrap_or_else(|| num_cpus::get() as u32)
            .max(1)
    }
}
