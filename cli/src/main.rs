use std::io;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use todo_cli::{render, shell, UreqTransport};
use todo_core::{TodoClient, TodoId, TodoListController};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal client for a REST todo service.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about)]
struct Args {
    /// Base URL of the todo service.
    #[arg(long, env = "TODO_BASE_URL", default_value = "http://localhost:3001")]
    base_url: String,

    /// Timeout for each HTTP call, in seconds.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Run one command and exit. Without one, starts an interactive shell.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all todos.
    List,
    /// Create a todo.
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Flip the completed flag of a todo.
    Toggle { id: TodoId },
    /// Delete a todo.
    Delete { id: TodoId },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the list.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let transport = UreqTransport::new(Duration::from_secs(args.timeout_secs));
    let mut controller = TodoListController::new(TodoClient::new(&args.base_url), transport);

    match args.command {
        None => shell::run(&mut controller, io::stdin().lock(), io::stdout().lock())
            .context("interactive session failed"),
        Some(command) => run_once(&mut controller, command),
    }
}

fn run_once(
    controller: &mut TodoListController<UreqTransport>,
    command: Command,
) -> anyhow::Result<()> {
    controller.load().context("failed to load todos")?;

    let outcome = match command {
        Command::List => Ok(()),
        Command::Add { title } => {
            controller.set_draft_title(title.join(" "));
            match controller.submit_draft() {
                Ok(false) => bail!("title is blank"),
                other => other.map(|_| ()),
            }
        }
        Command::Toggle { id } => match controller.find(id).cloned() {
            Some(item) => controller.toggle_completion(&item),
            None => bail!("no todo with id {id}"),
        },
        Command::Delete { id } => controller.delete_item(id),
    };

    print!("{}", render(controller.state()));
    outcome.context("todo service request failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_to_ten_seconds() {
        let args = Args::try_parse_from(["todo", "list"]).unwrap();
        assert_eq!(args.timeout_secs, 10);
        assert!(matches!(args.command, Some(Command::List)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Args::try_parse_from(["todo", "--timeout-secs", "0", "list"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn add_joins_words_into_one_title() {
        let args = Args::try_parse_from(["todo", "add", "Buy", "oat", "milk"]).unwrap();
        match args.command {
            Some(Command::Add { title }) => assert_eq!(title.join(" "), "Buy oat milk"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
