// SPDX-License-Identifier: GPL-3.0-or-later

//! This module writes configuration snapshots for editor tooling.
//!
//! The snapshot is a single JSON object shaped the way configuration
//! providers consume it: macro definitions flattened to `NAME=VALUE`
//! strings, paths as sorted arrays, and the standard and ABI dialect as
//! their tag spellings.

use crate::semantic::{CompileConfig, IntelliSenseMode, LanguageStandard};
use serde::Serialize;
use std::io;

/// The serialized form of one compiler configuration.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub include_path: Vec<String>,
    pub defines: Vec<String>,
    pub forced_include: Vec<String>,
    pub standard: LanguageStandard,
    pub intelli_sense_mode: IntelliSenseMode,
}

impl From<&CompileConfig> for Snapshot {
    fn from(config: &CompileConfig) -> Self {
        Snapshot {
            include_path: config.includes.iter().cloned().collect(),
            defines: config
                .defines
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect(),
            forced_include: config.forced_includes.iter().cloned().collect(),
            standard: config.standard,
            intelli_sense_mode: config.intellisense_mode,
        }
    }
}

/// Serializes the configuration as pretty-printed JSON.
pub fn write_snapshot<W: io::Write>(
    writer: W,
    config: &CompileConfig,
) -> Result<(), serde_json::Error> {
    let snapshot = Snapshot::from(config);
    serde_json::to_writer_pretty(writer, &snapshot)
}
