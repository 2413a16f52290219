//! Parsing of the line commands typed at the game prompt.

use std::{error::Error, fmt};

use pursuit_core::{Command, PursuerId, TileIndex};

/// Usage summary printed by the `help` request.
pub(crate) const HELP: &str = "\
commands:
  pursuer <0|1>   select a pursuer and show its legal destinations
  tile <index>    move the selected pursuer, or acknowledge the last move
  ack             acknowledge the last move
  end             end the current turn
  again           restart the game
  show            print the board
  quit            leave";

/// Single line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// A command forwarded to the world.
    Command(Command),
    /// Print the board without changing anything.
    Show,
    /// Print the usage summary.
    Help,
    /// Leave the game loop.
    Quit,
}

/// Parses one line of player input.
pub(crate) fn parse_input(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let keyword = words.next().ok_or(InputError::Empty)?;
    let argument = words.next();
    if let Some(extra) = words.next() {
        return Err(InputError::UnexpectedArgument(extra.to_owned()));
    }

    let input = match keyword.to_ascii_lowercase().as_str() {
        "pursuer" | "cop" | "p" => {
            let value = argument.ok_or(InputError::MissingArgument("pursuer"))?;
            let pursuer = value
                .parse::<usize>()
                .ok()
                .and_then(PursuerId::from_index)
                .ok_or_else(|| InputError::InvalidPursuer(value.to_owned()))?;
            Input::Command(Command::SelectPursuer { pursuer })
        }
        "tile" | "t" => {
            let value = argument.ok_or(InputError::MissingArgument("tile"))?;
            let index = value
                .parse::<u32>()
                .map_err(|_| InputError::InvalidTile(value.to_owned()))?;
            Input::Command(Command::SelectTile {
                tile: TileIndex::new(index),
            })
        }
        other => {
            if let Some(argument) = argument {
                return Err(InputError::UnexpectedArgument(argument.to_owned()));
            }
            match other {
                "ack" | "a" => Input::Command(Command::Acknowledge),
                "end" | "e" => Input::Command(Command::EndTurn),
                "again" | "restart" => Input::Command(Command::PlayAgain),
                "show" | "s" => Input::Show,
                "help" | "h" | "?" => Input::Help,
                "quit" | "q" | "exit" => Input::Quit,
                _ => return Err(InputError::UnknownCommand(other.to_owned())),
            }
        }
    };

    Ok(input)
}

/// Errors that can occur while parsing player input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum InputError {
    /// The line was empty or contained only whitespace.
    Empty,
    /// The keyword is not recognised.
    UnknownCommand(String),
    /// The keyword requires an argument that was not given.
    MissingArgument(&'static str),
    /// The line carried more words than the keyword accepts.
    UnexpectedArgument(String),
    /// The pursuer identifier is not `0` or `1`.
    InvalidPursuer(String),
    /// The tile index is not a non-negative integer.
    InvalidTile(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no command given"),
            Self::UnknownCommand(keyword) => write!(f, "unknown command '{keyword}'"),
            Self::MissingArgument(name) => write!(f, "missing {name} argument"),
            Self::UnexpectedArgument(argument) => {
                write!(f, "unexpected argument '{argument}'")
            }
            Self::InvalidPursuer(value) => write!(f, "pursuer must be 0 or 1, got '{value}'"),
            Self::InvalidTile(value) => write!(f, "could not parse tile index '{value}'"),
        }
    }
}

impl Error for InputError {}
