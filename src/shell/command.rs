//! Command vocabulary and line tokenizer.

/// A parsed command line.
///
/// Only the first argument is kept; extra tokens are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank or whitespace-only line
    Empty,
    Clear,
    Help,
    Exit,
    Cat(Option<String>),
    Ls,
    Cd(Option<String>),
    Unknown(String),
}

impl Command {
    /// Tokenize on whitespace and map the first token to a command.
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Command::Empty;
        };
        let arg = tokens.next().map(str::to_string);
        match name {
            "clear" => Command::Clear,
            "help" => Command::Help,
            "exit" => Command::Exit,
            "cat" => Command::Cat(arg),
            "ls" => Command::Ls,
            "cd" => Command::Cd(arg),
            other => Command::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Command::Empty => "",
            Command::Clear => "clear",
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Cat(_) => "cat",
            Command::Ls => "ls",
            Command::Cd(_) => "cd",
            Command::Unknown(name) => name,
        }
    }

    /// Whether executing the command reads the tree.
    pub fn needs_tree(&self) -> bool {
        matches!(self, Command::Cat(_) | Command::Ls | Command::Cd(_))
    }
}
