use crate::dashboard::filters::Key;
use crate::utils::error::{DashboardError, DashboardResult};

/// A named UI action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Refresh control: reload statistics and the unfiltered event list
    Refresh,

    /// Apply-filters control
    ApplyFilters,

    /// Clear-filters control
    ClearFilters,

    /// Key press inside the source IP field
    IpFieldKey(Key),
}

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Run a command
    Command(Command),

    /// Choose a threat level in the selector (empty for all levels)
    SelectThreat(String),

    /// Type into the IP field and press Enter
    SubmitIp(String),

    /// Type into the limit field
    TypeLimit(String),

    Help,
    Quit,
}

/// Console usage text
pub const CONSOLE_HELP: &str = "\
Commands:
  r, refresh        reload statistics and events
  a, apply          apply the current filters
  c, clear          clear the filters and reload events
  t <level>         select threat level (High, Medium, Low; empty for all)
  i <ip>            type a source IP and press Enter
  l <limit>         set the result limit
  h, help           show this help
  q, quit           exit";

/// Parse one console line. Blank lines parse to `None`.
pub fn parse_console_line(line: &str) -> DashboardResult<Option<ConsoleInput>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word.to_lowercase().as_str() {
        "r" | "refresh" => ConsoleInput::Command(Command::Refresh),
        "a" | "apply" => ConsoleInput::Command(Command::ApplyFilters),
        "c" | "clear" => ConsoleInput::Command(Command::ClearFilters),
        "t" | "threat" => ConsoleInput::SelectThreat(rest.to_string()),
        "i" | "ip" => ConsoleInput::SubmitIp(rest.to_string()),
        "l" | "limit" => ConsoleInput::TypeLimit(rest.to_string()),
        "h" | "help" | "?" => ConsoleInput::Help,
        "q" | "quit" | "exit" => ConsoleInput::Quit,
        other => {
            return Err(DashboardError::Config(format!(
                "unknown command {:?} (type h for help)",
                other
            )))
        }
    };

    Ok(Some(input))
}
