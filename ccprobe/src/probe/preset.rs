// SPDX-License-Identifier: GPL-3.0-or-later

//! Static strategy for toolchains that publish their configuration
//! through other channels than a preprocessor dump.
//!
//! MSVC-style toolchains expose include paths and predefined macros via
//! the IDE installation rather than a diagnostic flag, so there is
//! nothing to probe. The defaults start empty and every include or macro
//! arrives through per-file override parsing.

use crate::semantic::{CompileConfig, IntelliSenseMode, LanguageKind};

/// Synthesizes the defaults for a statically configured family.
///
/// No process is executed and the empty defaults are a valid result.
pub(super) fn fetch(language: LanguageKind, mode: IntelliSenseMode) -> CompileConfig {
    log::debug!("Using static defaults for {} ({})", mode, language);
    CompileConfig::new(mode, language.default_standard())
}
