use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Scribble relay server
#[derive(Parser, Serialize, Deserialize, Clone, Debug)]
#[command(name = "scribble-server", version, about = "Realtime collaborative drawing relay")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Bind address
    #[arg(long, env = "SCRIBBLE_BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Path to TOML config file
    #[arg(long, default_value = "./scribble.toml")]
    pub config: String,

    /// Directory of static client assets served at the root path
    #[arg(long, env = "SCRIBBLE_STATIC_DIR", default_value = "./public")]
    pub static_dir: String,

    /// Enable structured JSON logging (for Docker/production)
    #[arg(long, env = "SCRIBBLE_JSON_LOGS")]
    pub json_logs: bool,

    /// Output a commented TOML config template and exit
    #[arg(long)]
    pub generate_config: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "0.0.0.0".to_string(),
            config: "./scribble.toml".to_string(),
            static_dir: "./public".to_string(),
            json_logs: false,
            generate_config: false,
        }
    }
}

impl Config {
    /// Load config with layered precedence:
    /// built-in defaults < TOML file < env vars (SCRIBBLE_*) < CLI args
    ///
    /// The port additionally honors the plain `PORT` env var (picked up by the
    /// CLI layer), matching the conventional deployment override.
    pub fn load() -> Result<Self, figment::Error> {
        let cli = Config::parse();
        let config_path = cli.config.clone();

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("SCRIBBLE_"))
            .merge(Serialized::defaults(cli))
            .extract()
    }
}

/// Generate a commented TOML config template
pub fn generate_config_template() -> String {
    r#"# Scribble Server Configuration
# Place this file at ./scribble.toml or specify with --config <path>
# All settings can be overridden via environment variables (SCRIBBLE_PORT, etc.)
# or CLI flags (--port, etc.). The plain PORT env var also overrides the port.

# Server port (default: 3000)
# port = 3000

# Bind address (default: 0.0.0.0 — all interfaces)
# bind_address = "0.0.0.0"

# Directory of static client assets served at the root path
# static_dir = "./public"

# Enable structured JSON logging for Docker/production
# json_logs = false
"#
    .to_string()
}
