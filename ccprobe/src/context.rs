// SPDX-License-Identifier: GPL-3.0-or-later

use crate::environment;
use crate::semantic::{LanguageKind, shell};
use anyhow::{Context as AnyhowContext, Result};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Application context containing runtime environment information.
///
/// This struct captures the environmental state the application needs at
/// startup, which keeps the configuration and probing phases free of
/// additional I/O lookups.
#[derive(Debug, Clone)]
pub struct Context {
    /// Current working directory when the application was invoked
    pub current_directory: PathBuf,
    /// All environment variables at startup
    pub environment: HashMap<String, String>,
}

impl Context {
    /// Capture the current application context.
    ///
    /// This function performs I/O operations to gather system state and should
    /// be called early in the application lifecycle.
    pub fn capture() -> Result<Self> {
        let current_directory =
            env::current_dir().with_context(|| "Failed to get current working directory")?;

        let environment = env::vars().collect::<HashMap<String, String>>();

        Ok(Context { current_directory, environment })
    }

    /// Resolves the base compiler command for the language kind when the
    /// configuration does not name one: `CC`/`CXX` from the environment,
    /// falling back to the conventional `cc`/`c++` executable names.
    ///
    /// The environment value is a command line, not a bare path; wrapper
    /// prefixes like `ccache gcc` split into separate arguments.
    pub fn default_compiler_command(&self, language: LanguageKind) -> Vec<String> {
        let (key, fallback) = match language {
            LanguageKind::C => (environment::KEY_MAKE__C_COMPILER, "cc"),
            LanguageKind::Cpp => (environment::KEY_MAKE__CXX_COMPILER, "c++"),
        };
        match self.environment.get(key) {
            Some(value) if !value.trim().is_empty() => shell::tokenize(value),
            _ => vec![fallback.to_string()],
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Application Context:")?;
        writeln!(f, "Current Directory: {}", self.current_directory.display())?;
        writeln!(f, "Total Environment Variables: {} entries", self.environment.len())?;

        writeln!(f, "Relevant Environment Variables:")?;
        for (key, value) in &self.environment {
            if environment::relevant_env(key) {
                writeln!(f, "  {}={}", key, value)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with(environment: HashMap<String, String>) -> Context {
        Context { current_directory: PathBuf::from("/project"), environment }
    }

    #[test]
    fn test_context_capture() {
        let context = Context::capture();
        assert!(context.is_ok());

        let ctx = context.unwrap();
        assert!(ctx.current_directory.is_absolute());
    }

    #[test]
    fn test_compiler_command_from_environment() {
        let mut env = HashMap::new();
        env.insert("CC".to_string(), "ccache gcc".to_string());
        let context = context_with(env);

        assert_eq!(
            context.default_compiler_command(LanguageKind::C),
            vec!["ccache", "gcc"]
        );
        assert_eq!(context.default_compiler_command(LanguageKind::Cpp), vec!["c++"]);
    }

    #[test]
    fn test_compiler_command_fallback_names() {
        let context = context_with(HashMap::new());

        assert_eq!(context.default_compiler_command(LanguageKind::C), vec!["cc"]);
        assert_eq!(context.default_compiler_command(LanguageKind::Cpp), vec!["c++"]);
    }

    #[test]
    fn test_blank_environment_value_falls_back() {
        let mut env = HashMap::new();
        env.insert("CXX".to_string(), "   ".to_string());
        let context = context_with(env);

        assert_eq!(context.default_compiler_command(LanguageKind::Cpp), vec!["c++"]);
    }

    #[test]
    fn test_display_includes_relevant_env_vars() {
        let mut env = HashMap::new();
        env.insert("CC".to_string(), "gcc".to_string());
        env.insert("CFLAGS".to_string(), "-O2".to_string());
        env.insert("IRRELEVANT_VAR".to_string(), "value".to_string());
        let context = context_with(env);

        let display_output = format!("{}", context);

        assert!(display_output.contains("CC=gcc"));
        assert!(display_output.contains("CFLAGS=-O2"));
        assert!(!display_output.contains("IRRELEVANT_VAR=value"));
        assert!(display_output.contains("Total Environment Variables: 3 entries"));
    }
}
