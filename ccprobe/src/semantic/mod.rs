// SPDX-License-Identifier: GPL-3.0-or-later

//! This module provides the semantic model of a compiler configuration.
//!
//! A configuration describes what a compiler implicitly knows about a
//! translation unit: the include search directories, the predefined
//! preprocessor macros, the forced includes, the language standard and
//! the ABI dialect the unit is interpreted under.
//!
//! The main abstractions are:
//! - `CompileConfig`: The aggregate holding one complete configuration.
//!   Probed instances act as immutable defaults; per-file configurations
//!   are deep clones with overrides applied on top.
//! - `Define`: A single preprocessor macro definition, parsed from either
//!   a command line flag or a preprocessor output line.
//! - `LanguageKind`, `LanguageStandard`, `IntelliSenseMode`: Closed enums
//!   tagging the language, standard version and ABI dialect.

pub mod overrides;
pub mod shell;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single preprocessor macro definition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Define {
    pub name: String,
    pub value: String,
}

impl Define {
    /// Parses a macro definition from raw text.
    ///
    /// The splitter separates the macro name from its value: `=` for
    /// command line flags (`-DFOO=1`), a single space for preprocessor
    /// output lines (`#define FOO 1`). The split happens at the first
    /// occurrence only. Text without a splitter defines the macro with
    /// the value `"1"`.
    pub fn parse(text: &str, splitter: char) -> Self {
        match text.split_once(splitter) {
            Some((name, value)) => Define {
                name: name.to_string(),
                value: value.to_string(),
            },
            None => Define {
                name: text.to_string(),
                value: "1".to_string(),
            },
        }
    }
}

/// The language of a translation unit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum LanguageKind {
    #[serde(rename = "c")]
    C,
    #[serde(rename = "c++", alias = "cpp")]
    Cpp,
}

impl LanguageKind {
    /// The `-x` language selector the compiler expects for this kind.
    pub fn as_language_flag(&self) -> &'static str {
        match self {
            LanguageKind::C => "c",
            LanguageKind::Cpp => "c++",
        }
    }

    /// The standard version a configuration starts from for this kind.
    pub fn default_standard(&self) -> LanguageStandard {
        match self {
            LanguageKind::C => LanguageStandard::C11,
            LanguageKind::Cpp => LanguageStandard::Cpp17,
        }
    }
}

impl fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_language_flag())
    }
}

/// Recognized C and C++ language standard versions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum LanguageStandard {
    #[serde(rename = "c89")]
    C89,
    #[serde(rename = "c99")]
    C99,
    #[serde(rename = "c11")]
    C11,
    #[serde(rename = "c17")]
    C17,
    #[serde(rename = "c++98")]
    Cpp98,
    #[serde(rename = "c++03")]
    Cpp03,
    #[serde(rename = "c++11")]
    Cpp11,
    #[serde(rename = "c++14")]
    Cpp14,
    #[serde(rename = "c++17")]
    Cpp17,
}

impl LanguageStandard {
    /// The spelling used with the compiler's `-std=` flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageStandard::C89 => "c89",
            LanguageStandard::C99 => "c99",
            LanguageStandard::C11 => "c11",
            LanguageStandard::C17 => "c17",
            LanguageStandard::Cpp98 => "c++98",
            LanguageStandard::Cpp03 => "c++03",
            LanguageStandard::Cpp11 => "c++11",
            LanguageStandard::Cpp14 => "c++14",
            LanguageStandard::Cpp17 => "c++17",
        }
    }
}

impl fmt::Display for LanguageStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The ABI and builtin-macro dialect a configuration is interpreted under.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum IntelliSenseMode {
    #[serde(rename = "msvc-x64")]
    MsvcX64,
    #[serde(rename = "gcc-x64")]
    GccX64,
    #[serde(rename = "clang-x64")]
    ClangX64,
}

impl fmt::Display for IntelliSenseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntelliSenseMode::MsvcX64 => "msvc-x64",
            IntelliSenseMode::GccX64 => "gcc-x64",
            IntelliSenseMode::ClangX64 => "clang-x64",
        };
        write!(f, "{}", name)
    }
}

/// One complete compiler configuration.
///
/// The containers enforce the aggregate invariants: include directories
/// and forced includes are sets, macro definitions form a map where the
/// latest insertion for a name wins. All fields are owned values, so the
/// derived `Clone` produces a genuine deep copy. Probed instances are
/// treated as immutable defaults; overrides are applied to clones only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompileConfig {
    pub includes: BTreeSet<String>,
    pub defines: BTreeMap<String, String>,
    pub forced_includes: BTreeSet<String>,
    pub intellisense_mode: IntelliSenseMode,
    pub standard: LanguageStandard,
}

impl CompileConfig {
    /// Creates an empty configuration for the given dialect and standard.
    pub fn new(mode: IntelliSenseMode, standard: LanguageStandard) -> Self {
        CompileConfig {
            includes: BTreeSet::new(),
            defines: BTreeMap::new(),
            forced_includes: BTreeSet::new(),
            intellisense_mode: mode,
            standard,
        }
    }

    /// Inserts a macro definition, overwriting a previous one of the same name.
    pub fn add_define(&mut self, define: Define) {
        self.defines.insert(define.name, define.value);
    }

    /// Adds an include search directory.
    pub fn add_include(&mut self, path: impl Into<String>) {
        self.includes.insert(path.into());
    }

    /// Adds a file to inject before the translation unit's own text.
    pub fn add_forced_include(&mut self, path: impl Into<String>) {
        self.forced_includes.insert(path.into());
    }
}
