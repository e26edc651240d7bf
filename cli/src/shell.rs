//! Line-oriented interactive front end.
//!
//! Each input line is parsed into an `Intent`, handed to the controller,
//! and followed by a fresh render of the list. Service failures do not end
//! the session: the controller keeps them in its state and the render
//! prints them.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use todo_core::{TodoId, TodoListController, Transport};
use tracing::debug;

use crate::render::render;

pub const HELP: &str = "\
commands:
  add <title>    create a todo
  toggle <id>    flip completed
  delete <id>    remove a todo
  list           reload and show the list
  help           show this text
  quit           leave
";

/// A user action, as entered on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Toggle(TodoId),
    Delete(TodoId),
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{0}` needs an id")]
    MissingId(&'static str),

    #[error("`{0}` is not a valid id")]
    BadId(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Intent>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let intent = match command.to_ascii_lowercase().as_str() {
        "add" | "a" => Intent::Add(rest.to_string()),
        "toggle" | "t" => Intent::Toggle(parse_id("toggle", rest)?),
        "delete" | "del" | "d" | "rm" => Intent::Delete(parse_id("delete", rest)?),
        "list" | "ls" | "reload" => Intent::List,
        "help" | "?" => Intent::Help,
        "quit" | "exit" | "q" => Intent::Quit,
        _ => return Err(ParseError::UnknownCommand(command.to_string())),
    };
    Ok(Some(intent))
}

fn parse_id(command: &'static str, arg: &str) -> Result<TodoId, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingId(command));
    }
    arg.parse().map_err(|_| ParseError::BadId(arg.to_string()))
}

/// Apply a mutating or reload intent. Returns a note for the user when the
/// intent could not be carried out locally.
pub fn apply<T: Transport>(controller: &mut TodoListController<T>, intent: Intent) -> Option<String> {
    debug!(?intent, "applying intent");
    // Service errors are kept in the controller state and rendered.
    match intent {
        Intent::Add(title) => {
            controller.set_draft_title(title);
            if let Ok(false) = controller.submit_draft() {
                return Some("nothing to add: title is blank".to_string());
            }
        }
        Intent::Toggle(id) => match controller.find(id).cloned() {
            Some(item) => {
                let _ = controller.toggle_completion(&item);
            }
            None => return Some(format!("no todo with id {id}")),
        },
        Intent::Delete(id) => {
            let _ = controller.delete_item(id);
        }
        Intent::List => {
            let _ = controller.load();
        }
        Intent::Help | Intent::Quit => {}
    }
    None
}

/// Run the shell until `quit` or end of input.
pub fn run<T, R, W>(controller: &mut TodoListController<T>, input: R, mut out: W) -> io::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let _ = controller.load();
    write!(out, "{}", render(controller.state()))?;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(Intent::Quit)) => break,
            Ok(Some(Intent::Help)) => write!(out, "{HELP}")?,
            Ok(Some(intent)) => {
                if let Some(note) = apply(controller, intent) {
                    writeln!(out, "{note}")?;
                }
                write!(out, "{}", render(controller.state()))?;
            }
            Err(err) => writeln!(out, "{err}; type `help` for commands")?,
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn add_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse_line("add  Buy oat milk "),
            Ok(Some(Intent::Add("Buy oat milk".to_string())))
        );
        assert_eq!(parse_line("add"), Ok(Some(Intent::Add(String::new()))));
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_line("TOGGLE 3"), Ok(Some(Intent::Toggle(3))));
        assert_eq!(parse_line("rm 4"), Ok(Some(Intent::Delete(4))));
        assert_eq!(parse_line("Exit"), Ok(Some(Intent::Quit)));
    }

    #[test]
    fn ids_are_validated() {
        assert_eq!(parse_line("toggle"), Err(ParseError::MissingId("toggle")));
        assert_eq!(
            parse_line("delete x1"),
            Err(ParseError::BadId("x1".to_string()))
        );
        assert_eq!(
            parse_line("delete -1"),
            Err(ParseError::BadId("-1".to_string()))
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = parse_line("frobnicate 1").unwrap_err();
        assert_eq!(err.to_string(), "unknown command `frobnicate`");
    }
}
