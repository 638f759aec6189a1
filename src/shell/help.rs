//! Static command reference.

/// Usage line shown above the command table.
pub const HELP_USAGE: &str = "Usage: [command] [argument]";

/// Every recognized command with a one-line description.
pub const HELP_COMMANDS: &[(&str, &str)] = &[
    ("clear", "Clear the terminal screen"),
    ("cat", "Display the contents of a file"),
    ("cd", "Change the current directory"),
    ("help", "Show available commands and their descriptions"),
    ("ls", "List the contents of the current directory"),
    ("exit", "Exit the terminal"),
];
