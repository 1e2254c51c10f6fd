//! Usage scopes for individual commands.
//!
//! A [`FlagScope`] wraps the flag-parsing collaborator (`clap`) behind the
//! usage format every command shares: a `Usage:` block of one or more
//! synopses, a blank line, the description, then clap's own option listing.

use clap::error::ErrorKind;
use clap::{Arg, ArgMatches, Command};

/// Name of the binary as it appears in usage lines and error messages.
pub const PROGRAM: &str = "polctl";

/// The single help-request token operations accept in place of real
/// arguments.
pub const HELP_FLAG: &str = "-h";

/// Result of feeding an operation's argument vector through its scope.
#[derive(Debug)]
pub enum FlagOutcome {
    Matches(ArgMatches),
    /// The help flag was the effective request; usage has been printed and
    /// the operation should return without performing its normal effect.
    HelpRequested,
}

pub struct FlagScope {
    command: Command,
    exit_on_error: bool,
}

/// Build a ready-to-use flag scope for a (possibly multi-word) command.
///
/// `exit_on_error` selects how the scope reacts to malformed input: exit the
/// process like a top-level command, or hand the error back to the caller.
pub fn subcommand_scope(
    name: &str,
    synopses: &[&str],
    description: &str,
    exit_on_error: bool,
) -> FlagScope {
    let command = Command::new(name.to_string())
        .override_usage(usage_block(name, synopses))
        .about(description.to_string())
        .help_template("{usage-heading} {usage}\n\n{about}\n\n{options}")
        .arg(
            Arg::new("args")
                .value_name("ARG")
                .num_args(0..)
                .help("Command operands"),
        );
    FlagScope {
        command,
        exit_on_error,
    }
}

impl FlagScope {
    pub fn parse(&mut self, args: &[String]) -> anyhow::Result<FlagOutcome> {
        let argv = std::iter::once(self.command.get_name().to_string()).chain(args.iter().cloned());
        match self.command.clone().try_get_matches_from(argv) {
            Ok(matches) => Ok(FlagOutcome::Matches(matches)),
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                self.print_usage();
                Ok(FlagOutcome::HelpRequested)
            }
            Err(err) if self.exit_on_error => err.exit(),
            Err(err) => Err(err.into()),
        }
    }

    /// The formatted usage block, options included.
    pub fn usage(&mut self) -> String {
        self.command.render_long_help().to_string()
    }

    pub fn print_usage(&mut self) {
        println!("{}", self.usage());
    }
}

/// Positional operands collected by the scope's catch-all argument.
pub fn operands(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("args")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

// First line carries the word "Usage:" (rendered by the template heading);
// later synopses align under it without repeating the word. An empty
// synopsis contributes no trailing space.
fn usage_block(name: &str, synopses: &[&str]) -> String {
    let synopses = if synopses.is_empty() { &[""][..] } else { synopses };
    let mut block = String::new();
    for (i, synopsis) in synopses.iter().enumerate() {
        if i > 0 {
            block.push_str("\n       ");
        }
        block.push_str(PROGRAM);
        block.push(' ');
        block.push_str(name);
        if !synopsis.is_empty() {
            block.push(' ');
            block.push_str(synopsis);
        }
    }
    block
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn usage_lists_name_synopsis_and_description_in_order() {
        let mut scope = subcommand_scope(
            "policy create",
            &["CONTAINER:CONTAINER"],
            "Creates a policy",
            false,
        );
        let rendered = scope.usage();

        let usage_at = rendered.find("Usage:").expect("usage heading");
        let name_at = rendered.find("policy create").expect("command name");
        let synopsis_at = rendered.find("CONTAINER:CONTAINER").expect("synopsis");
        let description_at = rendered.find("Creates a policy").expect("description");
        assert!(usage_at < name_at);
        assert!(name_at < synopsis_at);
        assert!(synopsis_at < description_at);
    }

    #[test]
    fn no_synopses_renders_a_bare_usage_line() {
        let mut scope = subcommand_scope("policy list", &[], "Lists policies", true);
        let rendered = scope.usage();

        assert!(rendered.contains("Usage: polctl policy list\n"));
    }

    #[test]
    fn later_synopses_align_without_repeating_the_word_usage() {
        let mut scope = subcommand_scope(
            "policy",
            &["COMMAND [OPTIONS]", "COMMAND --help"],
            "Manage policies",
            false,
        );
        let rendered = scope.usage();

        assert_eq!(rendered.matches("Usage:").count(), 1);
        assert!(rendered.contains("Usage: polctl policy COMMAND [OPTIONS]"));
        assert!(rendered.contains("\n       polctl policy COMMAND --help"));
    }

    #[test]
    fn usage_block_separates_name_and_synopsis_with_one_space() {
        assert_eq!(
            usage_block("policy create", &["CONTAINER:CONTAINER"]),
            "polctl policy create CONTAINER:CONTAINER"
        );
        assert_eq!(usage_block("policy list", &[]), "polctl policy list");
    }

    #[test]
    fn parse_collects_operands() {
        let mut scope = subcommand_scope(
            "policy create",
            &["CONTAINER:CONTAINER"],
            "Creates a policy",
            false,
        );
        let outcome = scope.parse(&args(&["web:db"])).unwrap();
        match outcome {
            FlagOutcome::Matches(matches) => {
                assert_eq!(operands(&matches), args(&["web:db"]));
            }
            FlagOutcome::HelpRequested => panic!("help was not requested"),
        }
    }

    #[test]
    fn parse_reports_help_request_without_matching() {
        let mut scope = subcommand_scope("policy list", &[], "Lists policies", false);
        let outcome = scope.parse(&args(&[HELP_FLAG])).unwrap();
        assert!(matches!(outcome, FlagOutcome::HelpRequested));
    }

    #[test]
    fn parse_returns_errors_when_not_exiting() {
        let mut scope = subcommand_scope("policy list", &[], "Lists policies", false);
        let err = scope.parse(&args(&["--bogus"])).unwrap_err();
        assert!(err.to_string().contains("--bogus"));
    }

    #[test]
    fn usage_mentions_recognized_flags() {
        let mut scope = subcommand_scope("policy list", &[], "Lists policies", false);
        let rendered = scope.usage();
        assert!(rendered.contains("--help"));
    }
}
