// SPDX-License-Identifier: GPL-3.0-or-later

//! Probing strategy for compilers with a Clang-compatible command line.
//!
//! The strategy learns the compiler's implicit configuration by running a
//! verbose preprocessing pass over an empty input and parsing the dump.

use super::executor::CommandRunner;
use super::{ProbeError, verbose};
use crate::config;
use crate::semantic::{CompileConfig, IntelliSenseMode, LanguageKind};
use std::path::Path;

/// Probes the compiler once and returns the immutable defaults for the
/// given source root and language kind.
pub(super) fn fetch(
    source_root: &Path,
    base_command: &[String],
    language: LanguageKind,
    build_config: &config::Main,
    runner: &dyn CommandRunner,
) -> Result<CompileConfig, ProbeError> {
    let command = effective_command(source_root, base_command, language, build_config);
    let (executable, fixed_arguments) = command.split_first().ok_or(ProbeError::EmptyCommand)?;
    let arguments = probe_arguments(fixed_arguments, language, build_config);

    let captured = runner.run(executable, &arguments)?;
    if !captured.success {
        // Several compilers exit non-zero on the `-` input even after a
        // complete dump; the empty-result check below is the real gate.
        log::debug!("Probe of '{}' exited with failure, parsing captured output anyway", executable);
    }

    let mut result = CompileConfig::new(IntelliSenseMode::ClangX64, language.default_standard());
    verbose::parse_stream(&captured.stdout, &mut result);
    verbose::parse_stream(&captured.stderr, &mut result);

    if result.includes.is_empty() || result.defines.is_empty() {
        log::error!("Probe of '{}' produced no include paths or macros", executable);
        return Err(ProbeError::EmptyResult { executable: executable.into() });
    }

    log::debug!(
        "Probe of '{}' found {} include paths and {} macros",
        executable,
        result.includes.len(),
        result.defines.len()
    );
    Ok(result)
}

/// Resolves the command the probe starts from: a configured override for
/// this (source root, language) pair wins over the base command.
fn effective_command(
    source_root: &Path,
    base_command: &[String],
    language: LanguageKind,
    build_config: &config::Main,
) -> Vec<String> {
    build_config
        .overrides
        .iter()
        .find(|entry| entry.language == language && entry.root.as_path() == source_root)
        .map(|entry| entry.command.clone())
        .unwrap_or_else(|| base_command.to_vec())
}

/// Appends the flags that turn a compiler invocation into a probe:
/// language standard selection, the optional macOS SDK root, and the
/// verbose preprocessing pass over the empty standard input.
fn probe_arguments(
    fixed_arguments: &[String],
    language: LanguageKind,
    build_config: &config::Main,
) -> Vec<String> {
    let mut arguments = fixed_arguments.to_vec();
    arguments.push(format!("-std={}", language.default_standard()));
    arguments.push("-x".to_string());
    arguments.push(language.as_language_flag().to_string());
    if cfg!(target_os = "macos") {
        if let Some(sysroot) = &build_config.sysroot {
            arguments.push("-isysroot".to_string());
            arguments.push(sysroot.to_string_lossy().into_owned());
        }
    }
    arguments.extend(["-E", "-v", "-dD", "-"].map(String::from));
    arguments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::executor::{CapturedOutput, ExecutorError};
    use std::cell::RefCell;

    /// Replays canned compiler output instead of launching a process.
    struct CannedRunner {
        output: CapturedOutput,
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl CannedRunner {
        fn new(stdout: &str, stderr: &str) -> Self {
            CannedRunner {
                output: CapturedOutput {
                    success: true,
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                },
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for CannedRunner {
        fn run(
            &self,
            executable: &str,
            arguments: &[String],
        ) -> Result<CapturedOutput, ExecutorError> {
            self.calls
                .borrow_mut()
                .push((executable.to_string(), arguments.to_vec()));
            Ok(self.output.clone())
        }
    }

    const VERBOSE_STDERR: &str = concat!(
        "clang -cc1 version 15.0.0 default target x86_64-unknown-linux-gnu\n",
        "#include \"...\" search starts here:\n",
        "#include <...> search starts here:\n",
        " /usr/local/include\n",
        " /usr/include\n",
        "End of search list.\n",
    );

    const MACRO_STDOUT: &str = concat!(
        "#define __STDC__ 1\n",
        "#define __clang__ 1\n",
    );

    fn build_config() -> config::Main {
        config::Main::default()
    }

    #[test]
    fn test_probe_merges_both_streams() {
        let runner = CannedRunner::new(MACRO_STDOUT, VERBOSE_STDERR);
        let command = vec!["clang".to_string()];

        let result = fetch(
            Path::new("/project"),
            &command,
            LanguageKind::C,
            &build_config(),
            &runner,
        )
        .unwrap();

        assert!(result.includes.contains("/usr/include"));
        assert!(result.includes.contains("/usr/local/include"));
        assert_eq!(result.defines.get("__clang__"), Some(&"1".to_string()));
        assert_eq!(result.intellisense_mode, IntelliSenseMode::ClangX64);
        assert_eq!(result.standard, crate::semantic::LanguageStandard::C11);
    }

    #[test]
    fn test_probe_appends_language_and_diagnostic_flags() {
        let runner = CannedRunner::new(MACRO_STDOUT, VERBOSE_STDERR);
        let command = vec!["clang++".to_string(), "--target=x86_64-linux-gnu".to_string()];

        fetch(
            Path::new("/project"),
            &command,
            LanguageKind::Cpp,
            &build_config(),
            &runner,
        )
        .unwrap();

        let calls = runner.calls.borrow();
        let (executable, arguments) = &calls[0];
        assert_eq!(executable, "clang++");
        assert_eq!(arguments[0], "--target=x86_64-linux-gnu");
        assert!(arguments.contains(&"-std=c++17".to_string()));
        assert!(arguments.contains(&"-x".to_string()));
        assert!(arguments.contains(&"c++".to_string()));
        assert_eq!(&arguments[arguments.len() - 4..], ["-E", "-v", "-dD", "-"]);
    }

    #[test]
    fn test_probe_uses_configured_override_command() {
        let runner = CannedRunner::new(MACRO_STDOUT, VERBOSE_STDERR);
        let mut config = build_config();
        config.overrides.push(config::CommandOverride {
            root: "/project".into(),
            language: LanguageKind::C,
            command: vec!["/opt/llvm/bin/clang".to_string()],
        });

        fetch(
            Path::new("/project"),
            &["cc".to_string()],
            LanguageKind::C,
            &config,
            &runner,
        )
        .unwrap();

        assert_eq!(runner.calls.borrow()[0].0, "/opt/llvm/bin/clang");
    }

    #[test]
    fn test_probe_ignores_override_for_other_root() {
        let runner = CannedRunner::new(MACRO_STDOUT, VERBOSE_STDERR);
        let mut config = build_config();
        config.overrides.push(config::CommandOverride {
            root: "/elsewhere".into(),
            language: LanguageKind::C,
            command: vec!["/opt/llvm/bin/clang".to_string()],
        });

        fetch(
            Path::new("/project"),
            &["cc".to_string()],
            LanguageKind::C,
            &config,
            &runner,
        )
        .unwrap();

        assert_eq!(runner.calls.borrow()[0].0, "cc");
    }

    #[test]
    fn test_probe_fails_on_empty_parse_result() {
        let runner = CannedRunner::new("", "clang: error: no input files\n");

        let result = fetch(
            Path::new("/project"),
            &["clang".to_string()],
            LanguageKind::C,
            &build_config(),
            &runner,
        );

        assert!(matches!(result, Err(ProbeError::EmptyResult { .. })));
    }

    #[test]
    fn test_probe_fails_on_missing_defines() {
        // A search list alone is not a usable probe result.
        let runner = CannedRunner::new("", VERBOSE_STDERR);

        let result = fetch(
            Path::new("/project"),
            &["clang".to_string()],
            LanguageKind::C,
            &build_config(),
            &runner,
        );

        assert!(matches!(result, Err(ProbeError::EmptyResult { .. })));
    }

    #[test]
    fn test_probe_fails_on_empty_command() {
        let runner = CannedRunner::new(MACRO_STDOUT, VERBOSE_STDERR);

        let result = fetch(
            Path::new("/project"),
            &[],
            LanguageKind::C,
            &build_config(),
            &runner,
        );

        assert!(matches!(result, Err(ProbeError::EmptyCommand)));
    }
}
