// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the configuration crate.
//!
//! This example demonstrates:
//! - Loading a configuration file
//! - Looking up top-level keys and nested paths
//! - Type conversions (string, int, bool, float)
//! - Using default values for missing keys
//! - Reloading after the file changes
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use cfg_lib::prelude::*;
use std::fs;

const SAMPLE: &str = r#"
# Sample application configuration
app: {
    name: 'MyApplication'
    debug: true
}
database = {
    host: "db.example.com", port: 5432
    timeout: 30.5
}
replicas: ['r1.example.com', 'r2.example.com']
"#;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== cfg-lib {}: Basic Usage ===\n", cfg_lib::VERSION);

    let dir = std::env::temp_dir().join("cfg-lib-basic-usage");
    fs::create_dir_all(&dir)?;
    let path = dir.join("app.cfg");
    fs::write(&path, SAMPLE)?;

    let mut config = Config::from_file(&path)?;
    println!("Loaded {} top-level keys from {}\n", config.keys().count(), path.display());

    // Example 1: Get a string value
    println!("--- Example 1: String Values ---");
    println!("app.name = {}", config.get_str("app.name")?);
    println!("database.host = {}\n", config["database.host"]);

    // Example 2: Typed values
    println!("--- Example 2: Type Conversions ---");
    let port = config.get_i64("database.port")?;
    let debug = config.get_bool("app.debug")?;
    let timeout = config.get_f64("database.timeout")?;
    let port16: u16 = config.get_as("database.port")?;
    println!("port = {} (as u16: {}), debug = {}, timeout = {}\n", port, port16, debug, timeout);

    // Example 3: Sequences and negative indices
    println!("--- Example 3: Sequences ---");
    println!("first replica = {}", config.get_str("replicas[0]")?);
    println!("last replica = {}\n", config.get_str("replicas[-1]")?);

    // Example 4: Missing keys and defaults
    println!("--- Example 4: Defaults ---");
    match config.get("app.workers") {
        Ok(value) => println!("app.workers = {}", value),
        Err(e) => println!("lookup failed: {}", e),
    }
    let workers = config.get_or_default("app.workers", 4);
    println!("app.workers (with default) = {}\n", workers);

    // Example 5: Reload after editing the file
    println!("--- Example 5: Reload ---");
    fs::write(&path, SAMPLE.replace("debug: true", "debug: false"))?;
    config.reload()?;
    println!("app.debug after reload = {}", config.get_bool("app.debug")?);

    // Example 6: Write it back out
    println!("\n--- Example 6: Serialized ---");
    print!("{}", to_cfg_string(config.root())?);

    fs::remove_dir_all(&dir)?;
    Ok(())
}
