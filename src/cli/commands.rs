// Slash command handling for the chat REPL

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    History,
    Clear,
    Quit,
    Unknown(String),
}

/// Parse a slash command. Returns None for ordinary chat input.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let command = match trimmed {
        "/help" => Command::Help,
        "/history" => Command::History,
        "/clear" => Command::Clear,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    };
    Some(command)
}

pub fn help_text() -> &'static str {
    "/help     명령어 목록 보기\n\
     /history  이 세션의 대화 기록 보기\n\
     /clear    대화 기록 지우기\n\
     /quit     종료"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_input_is_not_a_command() {
        assert_eq!(parse_command("1번 제안이 뭐야?"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_known_commands() {
        assert_eq!(parse_command("/help"), Some(Command::Help));
        assert_eq!(parse_command("  /quit  "), Some(Command::Quit));
        assert_eq!(parse_command("/exit"), Some(Command::Quit));
        assert_eq!(parse_command("/clear"), Some(Command::Clear));
        assert_eq!(parse_command("/history"), Some(Command::History));
    }

    #[test]
    fn test_unknown_command_is_reported() {
        assert_eq!(
            parse_command("/frobnicate"),
            Some(Command::Unknown("/frobnicate".to_string()))
        );
    }
}
