use crate::domain::model::AlertAction;
use thiserror::Error;

/// A line typed at the panel prompt.
///
/// Section names may contain spaces, so arguments after the section are taken
/// from the end of the line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Show { section: String },
    Adjust { section: String, sensor: String, delta: f64 },
    /// One of the four control buttons of a section.
    Press { section: String, action: AlertAction },
    Alerts { section: String },
    /// `action` is the last two words of the line.
    Resolve { section: String, action: String },
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a finite number")]
    InvalidDelta(String),
}

pub const HELP: &str = "\
Commands:
  list                                   show every section
  show <section>                         show one section's readings
  set <section> <sensor> <delta>         add delta to a sensor (alias: adjust)
  inc-temp|dec-temp <section>            +/- 0.5 temperature
  inc-moisture|dec-moisture <section>    +/- 2.0 moisture
  alerts <section>                       evaluate a section now
  resolve <section> <action>             apply an alert's suggested action
  help                                   this text
  quit                                   leave the panel
Sections are named or numbered from 1.";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let rest: Vec<&str> = words.collect();

        match head.to_ascii_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "show" => Ok(Command::Show {
                section: section_arg("show", &rest)?,
            }),
            "alerts" => Ok(Command::Alerts {
                section: section_arg("alerts", &rest)?,
            }),
            "set" | "adjust" => {
                if rest.len() < 3 {
                    return Err(CommandError::MissingArgument {
                        command: "set",
                        expected: "<section> <sensor> <delta>",
                    });
                }
                let (section, tail) = rest.split_at(rest.len() - 2);
                let delta = tail[1]
                    .parse::<f64>()
                    .ok()
                    .filter(|delta| delta.is_finite())
                    .ok_or_else(|| CommandError::InvalidDelta(tail[1].to_string()))?;
                Ok(Command::Adjust {
                    section: section.join(" "),
                    sensor: tail[0].to_string(),
                    delta,
                })
            }
            "resolve" => {
                if rest.len() < 3 {
                    return Err(CommandError::MissingArgument {
                        command: "resolve",
                        expected: "<section> <action>",
                    });
                }
                let (section, action) = rest.split_at(rest.len() - 2);
                Ok(Command::Resolve {
                    section: section.join(" "),
                    action: action.join(" "),
                })
            }
            "inc-temp" => press("inc-temp", &rest, AlertAction::IncreaseTemperature),
            "dec-temp" => press("dec-temp", &rest, AlertAction::DecreaseTemperature),
            "inc-moisture" => press("inc-moisture", &rest, AlertAction::IncreaseMoisture),
            "dec-moisture" => press("dec-moisture", &rest, AlertAction::DecreaseMoisture),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn section_arg(command: &'static str, rest: &[&str]) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            expected: "<section>",
        });
    }
    Ok(rest.join(" "))
}

fn press(command: &'static str, rest: &[&str], action: AlertAction) -> Result<Command, CommandError> {
    Ok(Command::Press {
        section: section_arg(command, rest)?,
        action,
    })
}
