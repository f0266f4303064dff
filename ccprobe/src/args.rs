// SPDX-License-Identifier: GPL-3.0-or-later

//! This module contains the command line interface of the application.
//!
//! The command line parsing is implemented using the `clap` library.
//! The module is defining types to represent a structured form of the
//! program invocation.

use crate::semantic::LanguageKind;
use clap::{Command, arg, command};
use std::path::PathBuf;

/// Common constants used in the module.
const DEFAULT_SOURCE_ROOT: &str = ".";
const DEFAULT_LANGUAGE: &str = "c++";
const STANDARD_OUTPUT: &str = "-";

/// Represents the command line arguments of the application.
#[derive(Debug, PartialEq)]
pub struct Arguments {
    // The path of the configuration file.
    pub config: Option<String>,
    // The source root the configuration is synthesized for.
    pub source_root: PathBuf,
    // The language kind of the translation units.
    pub language: LanguageKind,
    // The per-file build command line to layer on top of the defaults.
    pub command_line: Option<String>,
    // The path of the result file; `-` means standard output.
    pub output: String,
}

impl TryFrom<clap::ArgMatches> for Arguments {
    type Error = anyhow::Error;

    fn try_from(matches: clap::ArgMatches) -> Result<Self, Self::Error> {
        let config = matches.get_one::<String>("config").map(String::to_string);
        let source_root = matches
            .get_one::<String>("root")
            .map(PathBuf::from)
            .expect("root is defaulted");
        let language = match matches.get_one::<String>("language").map(String::as_str) {
            Some("c") => LanguageKind::C,
            _ => LanguageKind::Cpp,
        };
        let command_line = matches.get_one::<String>("command").map(String::to_string);
        let output = matches
            .get_one::<String>("output")
            .map(String::to_string)
            .expect("output is defaulted");

        Ok(Arguments { config, source_root, language, command_line, output })
    }
}

/// Represents the command line interface of the application.
///
/// One invocation synthesizes the configuration of a single source root
/// and language kind, optionally layering a per-file build command line
/// on top of the probed defaults.
pub fn cli() -> Command {
    command!().args(&[
        arg!(-c --config <FILE> "Path of the config file"),
        arg!(--root <DIR> "Source root directory the configuration is probed for")
            .default_value(DEFAULT_SOURCE_ROOT),
        arg!(--language <LANG> "Language kind of the translation units")
            .value_parser(["c", "c++"])
            .default_value(DEFAULT_LANGUAGE),
        arg!(--command <LINE> "Per-file build command line to layer on top of the defaults"),
        arg!(-o --output <FILE> "Path of the result file ('-' for standard output)")
            .default_value(STANDARD_OUTPUT),
    ])
}
