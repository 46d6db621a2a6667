//! Line commands driving a session from a terminal.
//!
//! ```text
//! scroll 300         click Jerk Chicken
//! info Jerk Chicken   theme bronx    key Escape    touch    close
//! apikey sk-...       backend http://localhost:3000
//! status              quit
//! ```

use tasteshift_page::{NodeId, Page};
use tasteshift_reconciler::markers::{INFO_BUTTON_CLASS, INFO_ITEM_ATTR, ITEM_ATTR};
use thiserror::Error;

use crate::overlay::SELECT_ID;
use crate::panel::CLOSE_CLASS;
use crate::session::HostEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(HostEvent),
    Status,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("not a scroll offset: {0}")]
    InvalidOffset(String),
    #[error("nothing on the page matches: {0}")]
    NotOnPage(String),
}

/// Parses one line against the current page.
pub fn parse_command(line: &str, page: &Page) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let arg = |name: &'static str| {
        if rest.is_empty() {
            Err(CommandError::MissingArgument(name))
        } else {
            Ok(rest)
        }
    };

    let event = match verb {
        "" => return Err(CommandError::Empty),
        "quit" | "exit" => return Ok(Command::Quit),
        "status" => return Ok(Command::Status),
        "touch" => HostEvent::Touch,
        "scroll" => {
            let raw = arg("scroll")?;
            let y = raw
                .parse()
                .map_err(|_| CommandError::InvalidOffset(raw.to_string()))?;
            HostEvent::Scroll { y }
        }
        "key" => HostEvent::Key {
            key: arg("key")?.to_string(),
        },
        "click" => {
            let name = arg("click")?;
            HostEvent::Click {
                target: find(page, name, |n| n.attr(ITEM_ATTR) == Some(name))?,
            }
        }
        "info" => {
            let name = arg("info")?;
            HostEvent::Click {
                target: find(page, name, |n| {
                    n.has_class(INFO_BUTTON_CLASS) && n.attr(INFO_ITEM_ATTR) == Some(name)
                })?,
            }
        }
        "close" => HostEvent::Click {
            target: find(page, "close button", |n| n.has_class(CLOSE_CLASS))?,
        },
        "theme" => HostEvent::Change {
            target: find(page, "cuisine selector", |n| n.attr("id") == Some(SELECT_ID))?,
            value: arg("theme")?.to_string(),
        },
        "apikey" => HostEvent::CredentialEntered(arg("apikey")?.to_string()),
        "backend" => HostEvent::BackendUrlEntered(arg("backend")?.to_string()),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Command::Event(event))
}

fn find(
    page: &Page,
    what: &str,
    pred: impl Fn(&tasteshift_page::Node) -> bool,
) -> Result<NodeId, CommandError> {
    page.find_first(page.root(), pred)
        .ok_or_else(|| CommandError::NotOnPage(what.to_string()))
}
