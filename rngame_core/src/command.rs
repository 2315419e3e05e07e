/// Top-level commands accepted at the `>` prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move,
    Loot,
    Inventory,
    Quit,
}

impl Command {
    /// Parses a command case-insensitively. Unknown input yields `None`.
    pub fn parse(input: &str) -> Option<Command> {
        match input.trim().to_ascii_lowercase().as_str() {
            "move" => Some(Command::Move),
            "loot" => Some(Command::Loot),
            "inventory" | "inv" => Some(Command::Inventory),
            "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}
