use std::path::{Path, PathBuf};

use url::Url;

/// One line of terminal input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AppendText(String),
    SubmitText,
    SelectFile(PathBuf),
    DropFile(PathBuf),
    SubmitFile,
    ClearResults,
    ResetForm,
    Copy,
    Help,
    Quit,
    Unknown(String),
}

/// Lines starting with ':' are commands. A line holding only an absolute path
/// to an existing file is what terminals paste on drag-and-drop, so it counts
/// as a drop. Everything else is email text.
pub fn parse_line(line: &str, is_file: impl Fn(&Path) -> bool) -> Command {
    if let Some(rest) = line.strip_prefix("::") {
        return Command::AppendText(format!(":{rest}"));
    }

    let trimmed = line.trim();
    if let Some(command) = trimmed.strip_prefix(':') {
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        return match (name, arg.is_empty()) {
            ("send", true) => Command::SubmitText,
            ("file", false) => {
                Command::SelectFile(dropped_path(arg).unwrap_or_else(|| PathBuf::from(arg)))
            }
            ("sendfile", true) => Command::SubmitFile,
            ("clear", true) => Command::ClearResults,
            ("reset", true) => Command::ResetForm,
            ("copy", true) => Command::Copy,
            ("help", true) | ("h", true) => Command::Help,
            ("quit", true) | ("q", true) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        };
    }

    if let Some(path) = dropped_path(trimmed) {
        if path.is_absolute() && is_file(&path) {
            return Command::DropFile(path);
        }
    }

    Command::AppendText(line.to_string())
}

/// Undo the quoting terminals and file managers apply to pasted paths.
pub fn dropped_path(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("file://") {
        return Url::parse(raw).ok()?.to_file_path().ok();
    }

    for quote in ['\'', '"'] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return Some(PathBuf::from(inner));
        }
    }
    Some(PathBuf::from(raw.replace("\\ ", " ")))
}

/// Appends a typed line to the text buffer.
pub fn append_line(buffer: &str, line: &str) -> String {
    if buffer.is_empty() {
        line.to_string()
    } else {
        format!("{buffer}\n{line}")
    }
}
