//! Slash commands of the chat REPL

use cod_domain::{Enhancement, ReasoningMethod, SessionConfig};

/// Change requested by `/enhanced`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancedChange {
    Toggle,
    Set(bool),
    Mode(Enhancement),
}

/// A parsed slash command
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Quit,
    Help,
    Settings,
    /// Forget the thread
    Clear,
    Method(ReasoningMethod),
    Words(usize),
    Enhanced(EnhancedChange),
    /// `None` toggles
    Vote(Option<bool>),
    Paths(usize),
}

pub const HELP: &str = "\
Commands:
  /method <standard|cot|cod>           - Reasoning method
  /words <n>                           - Words per draft step
  /enhanced [on|off|adaptive|standard] - Enhanced prompts (no argument toggles)
  /vote [on|off]                       - Self-consistency voting (no argument toggles)
  /paths <n>                           - Number of voting paths
  /settings                            - Show current settings
  /clear                               - Start a new thread
  /help, /h, /?                        - Show this help
  /quit, /exit, /q                     - Exit chat";

/// Parse a line starting with `/`. The error is a message for the user.
pub fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match name {
        "/quit" | "/exit" | "/q" => Ok(ReplCommand::Quit),
        "/help" | "/h" | "/?" => Ok(ReplCommand::Help),
        "/settings" => Ok(ReplCommand::Settings),
        "/clear" => Ok(ReplCommand::Clear),
        "/method" => arg
            .and_then(|a| a.parse::<ReasoningMethod>().ok())
            .map(ReplCommand::Method)
            .ok_or_else(|| "Usage: /method <standard|cot|cod>".to_string()),
        "/words" => parse_positive(arg)
            .map(ReplCommand::Words)
            .ok_or_else(|| "Usage: /words <n> (n >= 1)".to_string()),
        "/paths" => parse_positive(arg)
            .map(ReplCommand::Paths)
            .ok_or_else(|| "Usage: /paths <n> (n >= 1)".to_string()),
        "/enhanced" => match arg {
            None => Ok(ReplCommand::Enhanced(EnhancedChange::Toggle)),
            Some(a) => parse_switch(a)
                .map(EnhancedChange::Set)
                .or_else(|| a.parse::<Enhancement>().ok().map(EnhancedChange::Mode))
                .map(ReplCommand::Enhanced)
                .ok_or_else(|| "Usage: /enhanced [on|off|adaptive|standard]".to_string()),
        },
        "/vote" => match arg {
            None => Ok(ReplCommand::Vote(None)),
            Some(a) => parse_switch(a)
                .map(|on| ReplCommand::Vote(Some(on)))
                .ok_or_else(|| "Usage: /vote [on|off]".to_string()),
        },
        other => Err(format!(
            "Unknown command: {}\nType /help for available commands",
            other
        )),
    }
}

impl ReplCommand {
    /// New settings after a settings command, `None` for other commands
    pub fn apply(&self, config: &SessionConfig) -> Option<SessionConfig> {
        let config = config.clone();
        let changed = match *self {
            ReplCommand::Method(method) => config.with_method(method),
            ReplCommand::Words(limit) => config.with_word_limit(limit),
            ReplCommand::Paths(paths) => config.with_paths(paths),
            ReplCommand::Vote(on) => {
                let enabled = on.unwrap_or(!config.self_consistency.enabled);
                config.with_self_consistency(enabled)
            }
            ReplCommand::Enhanced(EnhancedChange::Toggle) => {
                let enabled = !config.enhanced_enabled;
                config.with_enhanced(enabled)
            }
            ReplCommand::Enhanced(EnhancedChange::Set(on)) => config.with_enhanced(on),
            ReplCommand::Enhanced(EnhancedChange::Mode(mode)) => {
                config.with_enhanced(true).with_enhancement(mode)
            }
            ReplCommand::Quit | ReplCommand::Help | ReplCommand::Settings | ReplCommand::Clear => {
                return None;
            }
        };
        Some(changed)
    }
}

fn parse_positive(arg: Option<&str>) -> Option<usize> {
    arg?.parse::<usize>().ok().filter(|&n| n > 0)
}

fn parse_switch(arg: &str) -> Option<bool> {
    match arg.to_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("/quit"), Ok(ReplCommand::Quit));
        assert_eq!(parse_command("/q"), Ok(ReplCommand::Quit));
        assert_eq!(parse_command("/?"), Ok(ReplCommand::Help));
        assert_eq!(parse_command("/settings"), Ok(ReplCommand::Settings));
        assert_eq!(parse_command("/clear"), Ok(ReplCommand::Clear));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(
            parse_command("/method cot"),
            Ok(ReplCommand::Method(ReasoningMethod::Cot))
        );
        assert!(parse_command("/method").is_err());
        assert!(parse_command("/method tree").is_err());
    }

    #[test]
    fn test_parse_numbers_must_be_positive() {
        assert_eq!(parse_command("/words 8"), Ok(ReplCommand::Words(8)));
        assert_eq!(parse_command("/paths 5"), Ok(ReplCommand::Paths(5)));
        assert!(parse_command("/words 0").is_err());
        assert!(parse_command("/paths -1").is_err());
        assert!(parse_command("/paths").is_err());
    }

    #[test]
    fn test_parse_switches() {
        assert_eq!(parse_command("/vote"), Ok(ReplCommand::Vote(None)));
        assert_eq!(parse_command("/vote off"), Ok(ReplCommand::Vote(Some(false))));
        assert_eq!(
            parse_command("/enhanced standard"),
            Ok(ReplCommand::Enhanced(EnhancedChange::Mode(Enhancement::Standard)))
        );
        assert_eq!(
            parse_command("/enhanced on"),
            Ok(ReplCommand::Enhanced(EnhancedChange::Set(true)))
        );
        assert!(parse_command("/vote maybe").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command("/models").unwrap_err();
        assert!(err.starts_with("Unknown command: /models"));
    }

    #[test]
    fn test_apply_toggles() {
        let config = SessionConfig::default();

        let voting = ReplCommand::Vote(None).apply(&config).unwrap();
        assert!(voting.voting_enabled());
        let back = ReplCommand::Vote(None).apply(&voting).unwrap();
        assert!(!back.voting_enabled());

        let enhanced = ReplCommand::Enhanced(EnhancedChange::Toggle)
            .apply(&config)
            .unwrap();
        assert!(enhanced.enhanced_enabled);
    }

    #[test]
    fn test_apply_mode_enables_enhanced() {
        let config = ReplCommand::Enhanced(EnhancedChange::Mode(Enhancement::Standard))
            .apply(&SessionConfig::default())
            .unwrap();
        assert!(config.enhanced_enabled);
        assert_eq!(config.enhancement, Enhancement::Standard);
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let config = SessionConfig::default();
        let changed = ReplCommand::Words(9).apply(&config).unwrap();
        assert_eq!(changed.word_limit, 9);
        assert_eq!(config.word_limit, 5);
        assert_eq!(ReplCommand::Help.apply(&config), None);
    }
}
