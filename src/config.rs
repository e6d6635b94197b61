use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "readdensity")]
#[command(about = "Read density estimation server for indexed BAM files")]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "READDENSITY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "READDENSITY_PORT", default_value = "8080")]
    pub port: u16,

    /// Directory containing BAM files and their indexes
    #[arg(long, env = "READDENSITY_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Enable CORS for all origins
    #[arg(long, env = "READDENSITY_CORS", default_value = "true")]
    pub cors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Maximum number of index summaries kept in memory
    #[arg(long, env = "READDENSITY_CACHE_CAPACITY", default_value = "64")]
    pub cache_capacity: u64,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
