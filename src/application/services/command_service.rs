use crate::domain::entities::{Command, CommandOutcome, CommandRegistry};
use crate::application::errors::CommandError;
use super::ConversationController;

/// Service for managing and executing console commands
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        // help is answered by the service itself
        self.register(Command::new("help")
            .with_description("Show this message")
            .with_usage("/help [command]"));

        self.register(Command::new("close")
            .with_description("Close the dialog")
            .with_handler(|controller, _| {
                controller.close();
                Ok(CommandOutcome::Done)
            }));

        self.register(Command::new("open")
            .with_description("Reopen the dialog")
            .with_handler(|controller, _| {
                controller.set_open(true);
                Ok(CommandOutcome::Done)
            }));

        self.register(Command::new("copy")
            .with_description("Print the latest reply")
            .with_handler(|controller, _| {
                Ok(match controller.latest_reply() {
                    Some(reply) => CommandOutcome::Notice(format!("Copied: {}", reply)),
                    None => CommandOutcome::Notice("Nothing to copy yet".to_string()),
                })
            }));

        self.register(Command::new("quit")
            .with_description("Leave the dialog")
            .with_aliases(vec!["exit".to_string(), "q".to_string()])
            .with_handler(|_, _| Ok(CommandOutcome::Quit)));
    }

    /// Split a command line into name and arguments, None for plain text
    pub fn parse(&self, input: &str) -> Option<(String, Vec<String>)> {
        let input = input.trim();
        let cmd_text = input.strip_prefix(self.prefix.as_str())?;

        let mut parts = cmd_text.split_whitespace();
        let name = parts.next().unwrap_or("").to_string();
        let args = parts.map(|s| s.to_string()).collect();
        Some((name, args))
    }

    pub fn handle(&self, controller: &ConversationController, name: &str, args: &[String]) -> Result<CommandOutcome, CommandError> {
        let cmd = self.registry.find(name)
            .ok_or_else(|| CommandError::NotFound(name.to_string()))?;

        if cmd.name == "help" {
            if args.len() > 1 {
                return Err(CommandError::InvalidArgs("help takes at most one command name".to_string()));
            }
            return Ok(CommandOutcome::Notice(self.get_help(args.first().map(|s| s.as_str()))));
        }

        match &cmd.handler {
            Some(handler) => {
                tracing::debug!("Running command: {} {:?}", cmd.name, args);
                handler(controller, args)
            }
            None => Ok(CommandOutcome::Notice(format!("Command {} not implemented", cmd.name))),
        }
    }

    pub fn get_help(&self, command: Option<&str>) -> String {
        if let Some(name) = command {
            if let Some(cmd) = self.registry.find(name) {
                let mut help = format!("{}{} - {}", self.prefix, cmd.name, cmd.description.as_deref().unwrap_or("No description"));
                if let Some(usage) = &cmd.usage {
                    help.push_str(&format!("\nUsage: {}", usage));
                }
                return help;
            }
            return format!("Command {}{} not found", self.prefix, name);
        }

        let mut help = "Available commands:\n".to_string();
        for cmd in self.registry.all() {
            help.push_str(&format!("  {}{} - {}\n", self.prefix, cmd.name, cmd.description.as_deref().unwrap_or("")));
        }
        help
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CommandService {
        let mut commands = CommandService::new("/");
        commands.register_defaults();
        commands
    }

    #[test]
    fn test_parse_splits_name_and_args() {
        let commands = service();
        assert_eq!(commands.parse("/help copy"), Some(("help".to_string(), vec!["copy".to_string()])));
        assert_eq!(commands.parse("  /close  "), Some(("close".to_string(), vec![])));
        assert_eq!(commands.parse("hello /close"), None);
        assert_eq!(commands.parse("/"), Some((String::new(), vec![])));
    }

    #[test]
    fn test_close_and_open() {
        let commands = service();
        let controller = ConversationController::default();

        assert_eq!(commands.handle(&controller, "close", &[]), Ok(CommandOutcome::Done));
        assert!(!controller.is_open());
        assert_eq!(commands.handle(&controller, "open", &[]), Ok(CommandOutcome::Done));
        assert!(controller.is_open());
    }

    #[test]
    fn test_quit_aliases() {
        let commands = service();
        let controller = ConversationController::default();
        for name in ["quit", "exit", "q", "QUIT"] {
            assert_eq!(commands.handle(&controller, name, &[]), Ok(CommandOutcome::Quit));
        }
    }

    #[test]
    fn test_copy_without_reply() {
        let commands = service();
        let controller = ConversationController::default();
        assert_eq!(
            commands.handle(&controller, "copy", &[]),
            Ok(CommandOutcome::Notice("Nothing to copy yet".to_string()))
        );
    }

    #[test]
    fn test_unknown_command() {
        let commands = service();
        let controller = ConversationController::default();
        assert_eq!(
            commands.handle(&controller, "retry", &[]),
            Err(CommandError::NotFound("retry".to_string()))
        );
    }

    #[test]
    fn test_help_lists_commands() {
        let commands = service();
        let controller = ConversationController::default();
        let Ok(CommandOutcome::Notice(help)) = commands.handle(&controller, "help", &[]) else {
            panic!("help should produce a notice");
        };
        for name in ["/close", "/copy", "/help", "/open", "/quit"] {
            assert!(help.contains(name), "missing {} in {}", name, help);
        }

        let single = commands.get_help(Some("exit"));
        assert!(single.starts_with("/quit - Leave the dialog"));
        assert_eq!(commands.get_help(Some("nope")), "Command /nope not found");
        assert!(commands.handle(&controller, "help", &["a".to_string(), "b".to_string()]).is_err());
    }
}
