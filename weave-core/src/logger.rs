//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("build"; "loaded {} partials", count);
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stderr, stdout};

/// Log a message with a colored `[module]` prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Write one log line. `error` goes to stderr, everything else to stdout.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);

    if module.eq_ignore_ascii_case("error") {
        writeln!(stderr().lock(), "{prefix} {message}").ok();
    } else {
        writeln!(stdout().lock(), "{prefix} {message}").ok();
    }
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "watch" => prefix.bright_green().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}
