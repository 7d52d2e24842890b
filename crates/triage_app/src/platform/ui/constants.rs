/// Lines of the text buffer shown on screen; older lines scroll off.
pub const TEXT_TAIL_LINES: usize = 8;

/// When a command is offered in the command bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offered {
    Always,
    WithText,
    WithFile,
    WithResult,
}

/// Command bar entries in display order.
pub const COMMAND_BAR: [(&str, Offered); 8] = [
    (":send", Offered::WithText),
    (":file <path>", Offered::Always),
    (":sendfile", Offered::WithFile),
    (":clear", Offered::Always),
    (":reset", Offered::Always),
    (":copy", Offered::WithResult),
    (":help", Offered::Always),
    (":quit", Offered::Always),
];

pub const HELP_TEXT: &str = "\
Type or paste the email, one or more lines, then :send to analyze it.
Commands:
  :send          analyze the typed text
  :file <path>   select a .txt or .pdf file
  :sendfile      analyze the selected file
  :clear         clear the result
  :reset         clear the typed text and the selected file
  :copy          copy the suggested response to the clipboard
  :help          show this help
  :quit          exit
Dropping a .txt or .pdf file onto the terminal selects it.
Start a text line with '::' to enter a literal leading ':'.";
