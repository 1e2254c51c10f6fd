use anyhow::Result;
use clap::CommandFactory;
use tracing_subscriber::EnvFilter;

use polctl_core::api::{load_default, DispatchError, Dispatcher, HandlerSet, PROGRAM};

use crate::commands::cli::Args;

/// Wire config, handlers, and dispatcher together and run one command.
///
/// Returns the process exit code. The unrecognized-command message and the
/// non-zero status live here, at the outermost layer — the engine itself
/// only ever returns errors.
pub async fn run_app(args: Args) -> Result<i32> {
    let mut cfg = load_default(args.config.as_deref())?;
    if let Some(host) = args.host {
        cfg.api.base_url = host;
    }

    let filter = if args.debug {
        "debug".to_string()
    } else {
        cfg.logging.filter.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let handlers = polctl_plugins::factory::build_handlers(&cfg)?;
    let dispatcher = dispatcher_for(handlers);

    match dispatcher.run(&args.command).await {
        Ok(()) => Ok(0),
        Err(DispatchError::UnknownCommand(name)) => {
            eprintln!("{}", unknown_command_message(&name));
            Ok(1)
        }
        Err(DispatchError::EmptyCommand) => {
            eprintln!("{PROGRAM}: empty command.\nSee '{PROGRAM} --help'.");
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}

fn dispatcher_for(handlers: HandlerSet) -> Dispatcher {
    let usage = top_level_usage(handlers.command_names());
    Dispatcher::new(handlers).with_usage(move || println!("{usage}"))
}

fn top_level_usage(names: &[String]) -> String {
    let mut help = Args::command().render_long_help().to_string();
    help.push_str("\nCommands:\n");
    for name in names {
        help.push_str(&format!("  {name}\n"));
    }
    help.push_str(&format!(
        "\nRun '{PROGRAM} COMMAND --help' for more information on a command.\n"
    ));
    help
}

fn unknown_command_message(name: &str) -> String {
    format!("{PROGRAM}: '{name}' is not a {PROGRAM} command.\nSee '{PROGRAM} --help'.")
}
