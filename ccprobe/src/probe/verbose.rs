// SPDX-License-Identifier: GPL-3.0-or-later

//! Parser for the verbose preprocessor output of Clang-compatible compilers.
//!
//! Running `cc -E -v -dD` over an empty input makes the compiler dump its
//! include search directories and predefined macros. The dump is line
//! oriented: the search path listing opens with a `#include` header line
//! and lists one indented directory per line until the first non-indented
//! line; macros appear as `#define` directives. On macOS, framework
//! search directories carry a trailing marker that has to be stripped.

use crate::semantic::{CompileConfig, Define};

const INCLUDE_LIST_PREFIX: &str = "#include ";
const DEFINE_PREFIX: &str = "#define ";
const FRAMEWORK_SUFFIX: &str = " (framework directory)";

/// Scans one captured stream and accumulates include directories and
/// macro definitions into the configuration.
///
/// The caller runs this over stdout and stderr alike, merging into the
/// same configuration, because compilers route the dump to different
/// streams depending on build and platform.
pub fn parse_stream(text: &str, config: &mut CompileConfig) {
    let mut in_search_list = false;
    for line in text.lines() {
        if in_search_list {
            if line.starts_with(' ') {
                let trimmed = line.trim();
                let path = trimmed.strip_suffix(FRAMEWORK_SUFFIX).unwrap_or(trimmed);
                if !path.is_empty() {
                    config.add_include(path);
                }
                continue;
            }
            // A non-indented line ends the listing and is evaluated
            // against the directive rules below.
            in_search_list = false;
        }

        if line.starts_with(INCLUDE_LIST_PREFIX) {
            in_search_list = true;
        } else if let Some(rest) = line.strip_prefix(DEFINE_PREFIX) {
            config.add_define(Define::parse(rest.trim(), ' '));
        }
    }
}
