use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Debug, Parser)]
#[command(name = "inventory-service")]
pub struct Args {
    /// Full connection URL; overrides the individual `--db-*` settings.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    #[arg(long, env = "DB_PASSWORD", default_value = "")]
    pub db_password: String,

    #[arg(long, env = "DB_NAME", default_value = "inventory")]
    pub db_name: String,

    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub pool_size: u32,

    /// Key used to sign flash cookies.
    #[arg(long, env = "SECRET_KEY", default_value = "some_random_data", hide_env_values = true)]
    pub secret_key: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long, value_enum, default_value_t = StoreKind::Postgres)]
    pub store: StoreKind,
}

impl Args {
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => assemble_database_url(&self.db_host, &self.db_user, &self.db_password, &self.db_name),
        }
    }
}

pub fn assemble_database_url(host: &str, user: &str, password: &str, name: &str) -> String {
    if password.is_empty() {
        format!("postgres://{user}@{host}/{name}")
    } else {
        format!("postgres://{user}:{password}@{host}/{name}")
    }
}
