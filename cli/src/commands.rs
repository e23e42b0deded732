use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    Upload,
    Status,
    Health,
    Dismiss,
    Help,
    Quit,
    /// Anything that is not a slash command. Left untrimmed; the session decides.
    Ask(String),
}

impl Command {
    /// Commands that go to the backend and therefore hold the loading flag.
    pub fn needs_backend(&self) -> bool {
        matches!(self, Command::Upload | Command::Ask(_))
    }
}

pub fn parse(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Command::Ask(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "open" if arg.is_empty() => Err("usage: /open <path-to-pdf>".to_string()),
        "open" => Ok(Command::Open(PathBuf::from(arg))),
        "upload" => Ok(Command::Upload),
        "status" => Ok(Command::Status),
        "health" => Ok(Command::Health),
        "dismiss" => Ok(Command::Dismiss),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command /{} (try /help)", other)),
    }
}

pub const HELP: &str = "\
Commands:
  /open <path>   pick a PDF
  /upload        send the picked PDF to the backend
  /status        show the backend's processing status for the document
  /health        check that the backend is up
  /dismiss       clear notifications
  /help          this text
  /quit          leave
Anything else is asked as a question once a PDF is loaded.";
