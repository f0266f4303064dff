// SPDX-License-Identifier: GPL-3.0-or-later

//! Extracts user-level configuration overrides from build command lines.
//!
//! A build log line for one source file carries the defines, include
//! directories and forced includes the build system layers on top of the
//! compiler's own configuration. Only those flags are interpreted here;
//! the rest of the command line is none of this module's business.

use super::shell;
use super::{CompileConfig, Define};

/// Applies the define, include and forced-include flags of a build
/// command line to the configuration, in place.
///
/// Recognized flags: `-D<name>[=<value>]` and `/D<name>[=<value>]` for
/// macro definitions, `-I<dir>` and `/I<dir>` for include directories,
/// and the family-specific `force_include_flag` whose path travels in the
/// following token. Everything else is skipped. The call is total: an
/// empty line is a no-op and malformed input degrades to fewer
/// recognized flags, never to an error.
pub fn apply_compiler_arguments(
    command_line: &str,
    force_include_flag: &str,
    config: &mut CompileConfig,
) {
    if command_line.is_empty() {
        return;
    }

    let tokens = shell::tokenize(command_line);
    let mut index = 0;
    while index < tokens.len() {
        let token = &tokens[index];
        index += 1;

        if token == force_include_flag {
            // The path travels in the next token. A flag at the end of
            // the line has nothing to consume and is dropped.
            if let Some(path) = tokens.get(index) {
                config.add_forced_include(path.clone());
                index += 1;
            }
            continue;
        }

        let bytes = token.as_bytes();
        if bytes.len() < 2 || !(bytes[0] == b'-' || bytes[0] == b'/') {
            continue;
        }
        let rest = &token[2..];
        match bytes[1] {
            b'D' if !rest.is_empty() => config.add_define(Define::parse(rest, '=')),
            b'I' if !rest.is_empty() => config.add_include(rest),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::{IntelliSenseMode, LanguageStandard};

    fn empty_config() -> CompileConfig {
        CompileConfig::new(IntelliSenseMode::ClangX64, LanguageStandard::Cpp17)
    }

    #[test]
    fn test_defines_includes_and_forced_includes() {
        let mut config = empty_config();

        apply_compiler_arguments(
            "-DFOO=bar -Ipath/to/inc -include force.h",
            "-include",
            &mut config,
        );

        assert_eq!(config.defines.get("FOO"), Some(&"bar".to_string()));
        assert!(config.includes.contains("path/to/inc"));
        assert!(config.forced_includes.contains("force.h"));
    }

    #[test]
    fn test_empty_command_line_is_a_no_op() {
        let mut config = empty_config();

        apply_compiler_arguments("", "-include", &mut config);

        assert!(config.defines.is_empty());
        assert!(config.includes.is_empty());
        assert!(config.forced_includes.is_empty());
    }

    #[test]
    fn test_define_without_value_defaults_to_one() {
        let mut config = empty_config();

        apply_compiler_arguments("-DNDEBUG", "-include", &mut config);

        assert_eq!(config.defines.get("NDEBUG"), Some(&"1".to_string()));
    }

    #[test]
    fn test_later_define_overwrites_earlier_one() {
        let mut config = empty_config();

        apply_compiler_arguments("-DFOO=1 -DFOO=2", "-include", &mut config);

        assert_eq!(config.defines.get("FOO"), Some(&"2".to_string()));
    }

    #[test]
    fn test_msvc_flag_spellings() {
        let mut config = empty_config();

        apply_compiler_arguments(r#"/DUNICODE '/Ic:\include' -FI stdafx.h"#, "-FI", &mut config);

        assert_eq!(config.defines.get("UNICODE"), Some(&"1".to_string()));
        assert!(config.includes.contains(r"c:\include"));
        assert!(config.forced_includes.contains("stdafx.h"));
    }

    #[test]
    fn test_trailing_force_include_flag_is_dropped() {
        let mut config = empty_config();

        apply_compiler_arguments("-DFOO -include", "-include", &mut config);

        assert_eq!(config.defines.get("FOO"), Some(&"1".to_string()));
        assert!(config.forced_includes.is_empty());
    }

    #[test]
    fn test_unrelated_flags_are_skipped() {
        let mut config = empty_config();

        apply_compiler_arguments(
            "gcc -Wall -O2 -std=c11 -c main.c -o main.o -I/usr/include",
            "-include",
            &mut config,
        );

        assert_eq!(config.includes.len(), 1);
        assert!(config.includes.contains("/usr/include"));
        assert!(config.defines.is_empty());
    }

    #[test]
    fn test_short_and_bare_tokens_are_skipped() {
        let mut config = empty_config();

        apply_compiler_arguments("- a -D -I main.c", "-include", &mut config);

        assert!(config.defines.is_empty());
        assert!(config.includes.is_empty());
    }

    #[test]
    fn test_quoted_define_value_with_spaces() {
        let mut config = empty_config();

        apply_compiler_arguments(r#"'-DGREETING="hello world"' main.c"#, "-include", &mut config);

        assert_eq!(
            config.defines.get("GREETING"),
            Some(&"\"hello world\"".to_string())
        );
    }

    #[test]
    fn test_include_order_does_not_matter() {
        let mut first = empty_config();
        let mut second = empty_config();

        apply_compiler_arguments("-Ia -Ib -include f.h", "-include", &mut first);
        apply_compiler_arguments("-Ib -include f.h -Ia", "-include", &mut second);

        assert_eq!(first.includes, second.includes);
        assert_eq!(first.forced_includes, second.forced_includes);
    }
}
