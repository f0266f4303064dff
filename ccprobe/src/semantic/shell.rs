// SPDX-License-Identifier: GPL-3.0-or-later

//! Shell-style tokenization of build command lines.
//!
//! Build logs carry command lines as single strings. Before the override
//! parser can interpret them, they have to be split into the argument
//! vector a POSIX-like shell would have passed to the process.

/// Splits a command line into argument tokens.
///
/// Whitespace separates tokens; single and double quotes group substrings
/// (the quotes themselves are consumed); backslash escapes work inside and
/// outside quotes. An empty input yields an empty vector.
///
/// Malformed quoting does not fail the split. The lines come from
/// developer-authored build files, where an unterminated quote is the
/// common defect; the remainder is treated as a terminated token so that
/// the rest of the line still contributes overrides.
pub fn tokenize(command_line: &str) -> Vec<String> {
    if let Ok(tokens) = shell_words::split(command_line) {
        return tokens;
    }
    // Unterminated quote. Close it and split again.
    for quote in ['"', '\''] {
        let mut patched = String::with_capacity(command_line.len() + 1);
        patched.push_str(command_line);
        patched.push(quote);
        if let Ok(tokens) = shell_words::split(&patched) {
            return tokens;
        }
    }
    command_line.split_whitespace().map(String::from).collect()
}
