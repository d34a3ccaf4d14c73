use std::collections::HashMap;
use crate::application::errors::CommandError;
use crate::application::services::ConversationController;

/// What the event loop should do after a command ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Show a line of text below the dialog
    Notice(String),
    /// Nothing to say, the controller already emitted its events
    Done,
    /// Leave the dialog
    Quit,
}

/// Represents a console command
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub aliases: Vec<String>,
    pub usage: Option<String>,
    pub handler: Option<CommandHandler>,
}

/// Command handler function type
pub type CommandHandler = Box<dyn Fn(&ConversationController, &[String]) -> Result<CommandOutcome, CommandError> + Send + Sync>;

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            aliases: Vec::new(),
            usage: None,
            handler: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ConversationController, &[String]) -> Result<CommandOutcome, CommandError> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        let input_lower = input.to_lowercase();
        self.name.to_lowercase() == input_lower ||
            self.aliases.iter().any(|a| a.to_lowercase() == input_lower)
    }
}

/// Command registry for managing available commands
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name.clone(), command);
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.values().find(|c| c.matches(input))
    }

    /// Commands sorted by name
    pub fn all(&self) -> Vec<&Command> {
        let mut all: Vec<&Command> = self.commands.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_name_and_aliases_case_insensitive() {
        let cmd = Command::new("quit").with_aliases(vec!["exit".to_string(), "q".to_string()]);
        assert!(cmd.matches("QUIT"));
        assert!(cmd.matches("Exit"));
        assert!(cmd.matches("q"));
        assert!(!cmd.matches("close"));
    }

    #[test]
    fn test_registry_lists_sorted() {
        let mut registry = CommandRegistry::new();
        assert!(registry.is_empty());
        registry.register(Command::new("open"));
        registry.register(Command::new("close"));
        registry.register(Command::new("help"));

        let names: Vec<&str> = registry.all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["close", "help", "open"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.get("help").is_some());
        assert!(registry.find("HELP").is_some());
    }
}
