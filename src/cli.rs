pub mod cli_examples;
pub mod cli_heat;
pub mod cli_main;
pub mod cli_md;
pub mod cli_poisson;
pub mod task_help;

use std::io::{self, Write};

/// Reads one line from stdin; an unreadable stdin counts as an empty answer.
pub(crate) fn get_user_input() -> String {
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        input.clear();
    }
    input
}

/// Prints a cyan prompt and returns the trimmed answer
pub(crate) fn prompt(text: &str) -> String {
    print!("\x1b[36m{}\x1b[0m", text);
    let _ = io::stdout().flush();
    get_user_input().trim().to_string()
}

pub(crate) fn confirm(text: &str) -> bool {
    let answer = prompt(text).to_lowercase();
    answer == "y" || answer == "yes"
}
