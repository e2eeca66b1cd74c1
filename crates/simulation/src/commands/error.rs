// ---------------------------------------------------------------------------
// CommandError: failures of world effect console commands
// ---------------------------------------------------------------------------

use std::fmt;

use crate::images::ImageError;

/// Errors a console command can report. A failed command leaves every
/// system unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Vector argument did not start with `(`.
    MissingOpenParen { argument: &'static str },
    /// Vector argument ended before all elements were read.
    MissingElement { argument: &'static str },
    /// A vector element or scalar was not a number.
    InvalidNumber { argument: &'static str, token: String },
    /// Vector argument did not end with `)`.
    MissingCloseParen { argument: &'static str },
    /// `init` with a missing, zero, negative or non-numeric particle count.
    InvalidCount { system: &'static str, token: String },
    /// A scalar parameter that must be a non-zero number was not.
    InvalidValue { argument: &'static str, token: String },
    /// First token did not name a known effect system.
    UnknownSystem(String),
    /// Command other than `init` issued before the system exists.
    NotInitialized(&'static str),
    /// Sub-command not recognized by the system or any of its effects.
    UnknownCommand { system: &'static str, command: String },
    /// A fog image could not be loaded.
    ImageLoad(ImageError),
    /// Any of the above, with the usage line of the offending command.
    Usage {
        cause: Box<CommandError>,
        usage: &'static str,
    },
}

impl CommandError {
    pub fn with_usage(self, usage: &'static str) -> Self {
        CommandError::Usage {
            cause: Box::new(self),
            usage,
        }
    }

    /// The error without any usage wrapper.
    pub fn root(&self) -> &CommandError {
        match self {
            CommandError::Usage { cause, .. } => cause.root(),
            other => other,
        }
    }

    /// Parse failures are reported as warnings, the rest as errors.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self.root(),
            CommandError::MissingOpenParen { .. }
                | CommandError::MissingElement { .. }
                | CommandError::InvalidNumber { .. }
                | CommandError::MissingCloseParen { .. }
                | CommandError::InvalidCount { .. }
                | CommandError::InvalidValue { .. }
        )
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::MissingOpenParen { argument } => {
                write!(f, "missing '(' parenthesis in argument {argument}")
            }
            CommandError::MissingElement { argument } => {
                write!(f, "missing vector element in argument {argument}")
            }
            CommandError::InvalidNumber { argument, token } => {
                write!(f, "'{token}' is not a number in argument {argument}")
            }
            CommandError::MissingCloseParen { argument } => {
                write!(f, "missing ')' parenthesis in argument {argument}")
            }
            CommandError::InvalidCount { system, token } => write!(
                f,
                "invalid particle count '{token}', not (re-)initializing {system} system"
            ),
            CommandError::InvalidValue { argument, token } => {
                write!(f, "invalid {argument} '{token}'")
            }
            CommandError::UnknownSystem(name) => {
                write!(f, "unknown world effect system '{name}'")
            }
            CommandError::NotInitialized(system) => write!(
                f,
                "{system} system not initialized yet, not executing command"
            ),
            CommandError::UnknownCommand { system, command } => {
                write!(f, "unknown {system} system command '{command}'")
            }
            CommandError::ImageLoad(e) => write!(f, "{e}"),
            CommandError::Usage { cause, usage } => write!(f, "{cause}\nUsage: {usage}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::ImageLoad(e) => Some(e),
            CommandError::Usage { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl From<ImageError> for CommandError {
    fn from(e: ImageError) -> Self {
        CommandError::ImageLoad(e)
    }
}
