#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    ToggleDetailed,
    MultiLine,
}

pub struct CommandSpec {
    pub keyword: &'static str,
    pub command: Command,
    pub description: &'static str,
}

/// Control inputs recognised at the prompt. Any other line is a query.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        keyword: "q",
        command: Command::Quit,
        description: "quit",
    },
    CommandSpec {
        keyword: "h",
        command: Command::Help,
        description: "display this message",
    },
    CommandSpec {
        keyword: "d",
        command: Command::ToggleDetailed,
        description: "toggle detailed mode",
    },
    CommandSpec {
        keyword: "n",
        command: Command::MultiLine,
        description: "input query with line breaks",
    },
];

/// Line that ends a multi-line query.
pub const MULTILINE_TERMINATOR: &str = "$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Command(Command),
    Query(&'a str),
}

pub fn parse(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    COMMANDS
        .iter()
        .find(|spec| spec.keyword == trimmed)
        .map_or(Input::Query(line), |spec| Input::Command(spec.command))
}

pub fn help_text() -> String {
    let mut text = String::from("Available commands:");
    for spec in COMMANDS {
        text.push_str(&format!("\n\t{} - {}", spec.keyword, spec.description));
    }
    text
}
