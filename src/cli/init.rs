//! Init command implementation
//!
//! Scaffolds a deployable Stockroom directory: `stockroom.toml`,
//! `.env.example`, `.gitignore` and the `data/` directory.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    Success,
    /// stockroom.toml exists and `--force` was not given
    AlreadyExists,
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    pub path: PathBuf,
    pub force: bool,
    pub host: String,
    pub port: u16,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Stockroom");

    let base_path = &config.path;

    let config_path = base_path.join("stockroom.toml");
    if config_path.exists() && !config.force {
        output.warning("stockroom.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    output.subheader("Creating directories");

    let data_dir = base_path.join("data");
    if data_dir.exists() {
        output.skipped("data", "already exists");
    } else {
        if let Err(e) = fs::create_dir_all(&data_dir) {
            output.error(&format!("Failed to create data: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created("directory", "data");
    }

    output.subheader("Creating configuration files");

    if let Err(e) = write_file(&config_path, &generate_stockroom_toml(&config), config.force) {
        output.error(&format!("Failed to create stockroom.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "stockroom.toml");

    let env_example_path = base_path.join(".env.example");
    if let Err(e) = write_file(&env_example_path, &generate_env_example(), config.force) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("env", ".env.example");

    let gitignore_path = base_path.join(".gitignore");
    if !gitignore_path.exists() {
        if let Err(e) = write_file(&gitignore_path, &generate_gitignore(), false) {
            output.warning(&format!("Failed to create .gitignore: {}", e));
        } else {
            output.created("file", ".gitignore");
        }
    }

    output.complete("Stockroom initialized successfully!");

    output.header("Next Steps");
    output.newline();
    output.info("1. Set the token secret:");
    output.command("cp .env.example .env");
    output.command("# Edit .env and set SECRET (min 32 chars)");
    output.newline();
    output.info("2. Start the server:");
    output.command("stockroom-server");
    output.newline();

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));
    output.hint("API docs at /api-docs (build with --features swagger-ui)");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_stockroom_toml(config: &InitConfig) -> String {
    format!(
        r#"# Stockroom server configuration

[server]
host = "{host}"
port = {port}
log_level = "info"
# "pretty" or "json"
log_format = "pretty"
body_limit_bytes = 1048576

[auth]
# The variable named here wins over `secret` below.
secret_env = "SECRET"
token_ttl_secs = 3600
# Argon2id cost
hash_memory_kib = 19456
hash_iterations = 2
hash_parallelism = 1

[database]
# "sqlite" or "memory"
backend = "sqlite"
url = "./data/stockroom.db"
"#,
        host = config.host,
        port = config.port
    )
}

fn generate_env_example() -> String {
    r#"# Token signing secret (required, min 32 chars)
SECRET=change-me-to-a-long-random-string

# Overrides server.port
# PORT=3000

# Log filter, overrides server.log_level
# RUST_LOG=stockroom=debug,tower_http=debug
"#
    .to_string()
}

fn generate_gitignore() -> String {
    r#"# Stockroom data
/data/
*.db
*.db-journal

# Environment
.env
.env.local

# Rust
/target/
"#
    .to_string()
}
