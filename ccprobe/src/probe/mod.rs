// SPDX-License-Identifier: GPL-3.0-or-later

//! This module synthesizes compiler configurations for source roots.
//!
//! The factory reads the declared compiler family from the build
//! configuration and dispatches to the matching probe strategy: a
//! probing strategy that runs the real compiler binary and parses its
//! verbose output, or a static strategy that synthesizes minimal
//! defaults without touching a process.
//!
//! The main abstractions are:
//! - `CompilerFamily`: The closed set of recognized family identifiers.
//! - `CompilerConfiguration`: The product of the factory. Owns the
//!   immutable defaults of one (source root, language kind) pair and
//!   applies per-file overrides to clones of them.

pub mod executor;

mod clang;
mod preset;
mod verbose;

use crate::config;
use crate::semantic::{CompileConfig, IntelliSenseMode, LanguageKind, overrides};
use executor::CommandRunner;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// The closed set of compiler families the factory recognizes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CompilerFamily {
    /// Compilers with a Clang-compatible command line; probed for real.
    Clang,
    /// GCC-style toolchains configured statically.
    Gcc,
    /// MSVC-style toolchains configured statically.
    Msvc,
}

impl FromStr for CompilerFamily {
    type Err = ProbeError;

    fn from_str(identifier: &str) -> Result<Self, Self::Err> {
        match identifier {
            "clang" => Ok(CompilerFamily::Clang),
            "gcc" => Ok(CompilerFamily::Gcc),
            "msvc" => Ok(CompilerFamily::Msvc),
            _ => Err(ProbeError::UnknownCompilerType(identifier.to_string())),
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompilerFamily::Clang => "clang",
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Msvc => "msvc",
        };
        write!(f, "{}", name)
    }
}

impl CompilerFamily {
    /// The forced-include flag spelling of the family.
    pub fn force_include_flag(&self) -> &'static str {
        match self {
            CompilerFamily::Clang | CompilerFamily::Gcc => "-include",
            CompilerFamily::Msvc => "-FI",
        }
    }
}

/// A ready-to-use compiler configuration for one source root and language.
///
/// The defaults are constructed once, by the probe strategy, and never
/// mutated afterwards. Every read hands out a copy: per-file
/// configurations are deep clones with the file's own command line
/// applied on top, so concurrent callers share no mutable state.
#[derive(Clone, Debug)]
pub struct CompilerConfiguration {
    family: CompilerFamily,
    defaults: CompileConfig,
}

impl CompilerConfiguration {
    /// The family this configuration was built for.
    pub fn family(&self) -> CompilerFamily {
        self.family
    }

    /// Returns a deep clone of the immutable defaults.
    pub fn default_configuration(&self) -> CompileConfig {
        self.defaults.clone()
    }

    /// Returns a copy of the probed include directories.
    pub fn include_paths(&self) -> BTreeSet<String> {
        self.defaults.includes.clone()
    }

    /// Applies the define, include and forced-include flags of a per-file
    /// build command line, with the family's forced-include spelling
    /// bound in. Total over its input; never fails.
    pub fn apply_arguments(&self, command_line: &str, config: &mut CompileConfig) {
        overrides::apply_compiler_arguments(command_line, self.family.force_include_flag(), config);
    }
}

/// Creates the compiler configuration for one (source root, language) pair.
///
/// Reads the declared family from the build configuration and dispatches
/// to the matching strategy. A missing or unrecognized family identifier
/// fails before any process is launched; a failed probe propagates as is,
/// never as a half-populated configuration.
pub fn create(
    source_root: &Path,
    base_command: &[String],
    language: LanguageKind,
    build_config: &config::Main,
    runner: &dyn CommandRunner,
) -> Result<CompilerConfiguration, ProbeError> {
    let identifier = build_config
        .compiler
        .family
        .as_deref()
        .ok_or(ProbeError::MissingCompilerType)?;
    let family = CompilerFamily::from_str(identifier)?;

    let defaults = match family {
        CompilerFamily::Clang => {
            clang::fetch(source_root, base_command, language, build_config, runner)?
        }
        CompilerFamily::Gcc => preset::fetch(language, IntelliSenseMode::GccX64),
        CompilerFamily::Msvc => preset::fetch(language, IntelliSenseMode::MsvcX64),
    };

    log::info!(
        "Compiler configuration ready: {} for {} ({})",
        family,
        source_root.display(),
        language
    );
    Ok(CompilerConfiguration { family, defaults })
}

/// Errors that can occur while synthesizing a compiler configuration.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Missing compiler type in the build configuration")]
    MissingCompilerType,
    #[error("Unknown compiler type: '{0}'")]
    UnknownCompilerType(String),
    #[error("The probe command is empty")]
    EmptyCommand,
    #[error(transparent)]
    Executor(#[from] executor::ExecutorError),
    #[error("Probe of '{executable}' produced no include paths or macros", executable = executable.display())]
    EmptyResult { executable: PathBuf },
}
