use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "polctl", version, about = "Manage container access policies on a remote controller")]
pub struct Args {
    /// Enable debug logging
    #[arg(long, short = 'D')]
    pub debug: bool,

    /// Address of the policy controller API (overrides config and POLCTL_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Path to the config file (default: ./polctl.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Command tokens, e.g. `policy list` or `policy create web:db`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tokens_are_collected_verbatim() {
        let args = Args::parse_from(["polctl", "policy", "create", "web:db"]);
        assert_eq!(args.command, vec!["policy", "create", "web:db"]);
        assert!(!args.debug);
    }

    #[test]
    fn global_flags_come_before_the_command() {
        let args = Args::parse_from(["polctl", "-D", "--host", "http://c:7171", "policy", "list"]);
        assert!(args.debug);
        assert_eq!(args.host.as_deref(), Some("http://c:7171"));
        assert_eq!(args.command, vec!["policy", "list"]);
    }

    #[test]
    fn hyphen_tokens_pass_through_to_the_dispatcher() {
        let args = Args::parse_from(["polctl", "policy", "create", "-h"]);
        assert_eq!(args.command, vec!["policy", "create", "-h"]);
    }

    #[test]
    fn no_command_tokens_is_valid() {
        let args = Args::parse_from(["polctl"]);
        assert!(args.command.is_empty());
    }
}
