//! Command-line arguments for the billboard.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use quote_common::net::{BILLBOARD_PORT, addr};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address the HTTP server binds to.
    #[arg(long, env = "BILLBOARD_BIND", default_value_t = addr("127.0.0.1", BILLBOARD_PORT))]
    pub bind: String,

    /// Upstream instance as `service-name=base-url`. Repeat the flag (or
    /// separate entries with commas) to balance over several instances.
    #[arg(
        long = "instance",
        env = "BILLBOARD_INSTANCES",
        value_delimiter = ',',
        default_value = "message-service=http://127.0.0.1:8081"
    )]
    pub instances: Vec<String>,

    /// Upstream request timeout in seconds. Must be at least 1.
    #[arg(
        long,
        env = "BILLBOARD_TIMEOUT_SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_message_service() {
        let args = Args::try_parse_from(["billboard_client"]).unwrap();
        assert_eq!(args.bind, "127.0.0.1:8080");
        assert_eq!(args.instances, vec!["message-service=http://127.0.0.1:8081"]);
        assert_eq!(args.timeout_secs, 5);
    }

    #[test]
    fn instances_repeat_and_split() {
        let args = Args::try_parse_from([
            "billboard_client",
            "--instance",
            "message-service=http://a:1,message-service=http://b:2",
            "--instance",
            "message-service=http://c:3",
        ])
        .unwrap();
        assert_eq!(args.instances.len(), 3);
    }

    #[test]
    fn timeout_must_be_positive() {
        assert!(Args::try_parse_from(["billboard_client", "--timeout-secs", "0"]).is_err());
        let args = Args::try_parse_from(["billboard_client", "--timeout-secs", "1"]).unwrap();
        assert_eq!(args.timeout_secs, 1);
    }
}
