//! The `policy` command family.
//!
//! Each handler owns its usage scope: it parses its own argument vector,
//! prints usage when asked to (or given nothing to do), and talks to the
//! controller through the [`PolicyApi`] seam.

use std::sync::Arc;

use anyhow::Result;

use polctl_core::api::{operands, subcommand_scope, FlagOutcome, PROGRAM};

use crate::api::{parse_peer, PolicyApi};

/// Bare `policy`: print the subcommand listing.
pub async fn root(args: Vec<String>) -> Result<()> {
    let mut scope = subcommand_scope("policy", &["COMMAND [OPTIONS]"], &subcommands_help(), false);
    match scope.parse(&args) {
        Ok(FlagOutcome::HelpRequested) => Ok(()),
        Ok(FlagOutcome::Matches(_)) => {
            scope.print_usage();
            Ok(())
        }
        Err(err) => {
            scope.print_usage();
            Err(err)
        }
    }
}

/// `policy list`: print every policy, one padded `source target` row each.
pub async fn list(api: Arc<dyn PolicyApi>, args: Vec<String>) -> Result<()> {
    let mut scope = subcommand_scope("policy list", &[], "Lists policies", true);
    let _matches = match scope.parse(&args)? {
        FlagOutcome::HelpRequested => return Ok(()),
        FlagOutcome::Matches(matches) => matches,
    };

    for peer in api.list().await? {
        println!("{:<20}{:<20}", peer.source, peer.target);
    }
    Ok(())
}

/// `policy create CONTAINER:CONTAINER`: allow the peer, echo it on success.
pub async fn create(api: Arc<dyn PolicyApi>, args: Vec<String>) -> Result<()> {
    let mut scope = subcommand_scope(
        "policy create",
        &["CONTAINER:CONTAINER"],
        "Creates a policy with a container peer",
        false,
    );
    let matches = match scope.parse(&args)? {
        FlagOutcome::HelpRequested => return Ok(()),
        FlagOutcome::Matches(matches) => matches,
    };

    let Some(raw) = operands(&matches).into_iter().next() else {
        scope.print_usage();
        return Ok(());
    };
    let peer = parse_peer(&raw)?;
    api.create(&peer).await?;
    println!("{peer}");
    Ok(())
}

/// `policy delete CONTAINER:CONTAINER`: revoke the peer, echo it on success.
pub async fn delete(api: Arc<dyn PolicyApi>, args: Vec<String>) -> Result<()> {
    let mut scope = subcommand_scope(
        "policy delete",
        &["CONTAINER:CONTAINER"],
        "Deletes a policy with a container peer",
        false,
    );
    let matches = match scope.parse(&args)? {
        FlagOutcome::HelpRequested => return Ok(()),
        FlagOutcome::Matches(matches) => matches,
    };

    let Some(raw) = operands(&matches).into_iter().next() else {
        scope.print_usage();
        return Ok(());
    };
    let peer = parse_peer(&raw)?;
    api.delete(&peer).await?;
    println!("{peer}");
    Ok(())
}

fn subcommands_help() -> String {
    let commands = [
        ("list", "List all policies"),
        ("create", "Create a policy"),
        ("delete", "Delete a policy"),
    ];

    let mut help = String::from("Commands:\n");
    for (cmd, description) in commands {
        help.push_str(&format!("  {cmd:<25}{description}\n"));
    }
    help.push_str(&format!(
        "\nRun '{PROGRAM} policy COMMAND --help' for more information on a command."
    ));
    help
}
