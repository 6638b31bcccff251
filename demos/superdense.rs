//! Sends all four 2-bit messages through superdense coding and prints the
//! verdicts.
//!
//! Usage: `cargo run --example superdense [config.toml]`
//! Set `RUST_LOG=debug` to see every protocol stage.

use densecode::{Message, ProtocolConfig, SimError, SuperdenseProtocol};
use tracing_subscriber::EnvFilter;

fn load_config() -> Result<ProtocolConfig, SimError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| SimError::Config(format!("cannot read {}: {}", path, e)))?;
            ProtocolConfig::from_toml_str(&text)
        }
        None => Ok(ProtocolConfig::default()),
    }
}

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let mut rng = config.rng();
    let protocol = SuperdenseProtocol::with_config(config.simulator);

    // The full gate plan for the message that needs both encoding gates
    println!("Circuit for message 11:\n{}", protocol.circuit(Message::M11)?);

    println!("Sending every message with {} shots each...", config.shots);
    let report = protocol.run_all(config.shots, &mut rng)?;

    for result in report.results() {
        print!("Message '{}' {}", result.sent, result.histogram);
    }
    println!();
    print!("{}", report);

    if !report.all_succeeded() {
        println!("Some messages were not decoded correctly.");
    }
    Ok(())
}
