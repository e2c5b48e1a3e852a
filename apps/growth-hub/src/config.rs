//! # Configuration
//!
//! Server settings come from command-line flags, each with an environment
//! variable fallback, and are folded into a [`HubConfig`].

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Listen address when nothing else is configured.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Live sessions kept before the oldest is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    pub addr: SocketAddr,
    /// Validate the current stage on every `Next`, not only on submit.
    pub gate_next: bool,
    /// JSON file replacing the seeded talent-grid population.
    pub individuals: Option<PathBuf>,
    /// Upper bound on live sessions; creating one more evicts the oldest.
    pub max_sessions: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            gate_next: false,
            individuals: None,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Flags of the `serve` command.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "GROWTH_HUB_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: SocketAddr,

    /// Require each stage to be complete before moving to the next one
    #[arg(
        long,
        env = "GROWTH_HUB_GATE_NEXT",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub gate_next: bool,

    /// JSON file with the individuals plotted on the talent grid
    #[arg(long, env = "GROWTH_HUB_INDIVIDUALS")]
    pub individuals: Option<PathBuf>,

    /// Maximum number of live sessions
    #[arg(long, env = "GROWTH_HUB_MAX_SESSIONS", default_value_t = DEFAULT_MAX_SESSIONS)]
    pub max_sessions: usize,
}

impl From<ServeArgs> for HubConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            addr: args.addr,
            gate_next: args.gate_next,
            individuals: args.individuals,
            max_sessions: args.max_sessions.max(1),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Serve {
        #[command(flatten)]
        args: ServeArgs,
    }

    #[test]
    fn default_matches_default_addr_flag() {
        let parsed: Result<SocketAddr, _> = DEFAULT_ADDR.parse();
        assert_eq!(parsed.ok(), Some(HubConfig::default().addr));
        assert!(!HubConfig::default().gate_next);
    }

    #[test]
    fn serve_args_fold_into_config() {
        let args = ServeArgs {
            addr: SocketAddr::from(([0, 0, 0, 0], 9000)),
            gate_next: true,
            individuals: Some(PathBuf::from("people.json")),
            max_sessions: 0,
        };
        let config = HubConfig::from(args);
        assert_eq!(config.addr.port(), 9000);
        assert!(config.gate_next);
        assert_eq!(config.individuals, Some(PathBuf::from("people.json")));
        assert_eq!(config.max_sessions, 1);
    }

    #[test]
    fn gate_next_env_accepts_boolish_values() {
        // Every parse of `ServeArgs` lives here so no other test reads the
        // variable while it is set.
        let cases = [
            ("1", true),
            ("yes", true),
            ("on", true),
            ("0", false),
            ("false", false),
        ];
        for (value, expected) in cases {
            unsafe { std::env::set_var("GROWTH_HUB_GATE_NEXT", value) };
            let parsed = Serve::try_parse_from(["serve"]);
            assert_eq!(
                parsed.map(|s| s.args.gate_next).ok(),
                Some(expected),
                "value {value}"
            );
        }
        unsafe { std::env::set_var("GROWTH_HUB_GATE_NEXT", "maybe") };
        assert!(Serve::try_parse_from(["serve"]).is_err());
        unsafe { std::env::remove_var("GROWTH_HUB_GATE_NEXT") };

        let parsed = Serve::try_parse_from(["serve"]).unwrap();
        assert!(!parsed.args.gate_next);
        assert_eq!(parsed.args.max_sessions, DEFAULT_MAX_SESSIONS);
        let parsed =
            Serve::try_parse_from(["serve", "--gate-next", "--max-sessions", "2"]).unwrap();
        let config = HubConfig::from(parsed.args);
        assert!(config.gate_next);
        assert_eq!(config.max_sessions, 2);
    }
}
