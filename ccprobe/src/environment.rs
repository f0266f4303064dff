// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashSet;

// https://www.gnu.org/software/make/manual/html_node/Implicit-Variables.html
pub const KEY_MAKE__C_COMPILER: &str = "CC";
pub const KEY_MAKE__CXX_COMPILER: &str = "CXX";
pub const KEY_MAKE__C_FLAGS: &str = "CFLAGS";
pub const KEY_MAKE__CXX_FLAGS: &str = "CXXFLAGS";
pub const KEY_MAKE__C_PREPROCESSOR_FLAGS: &str = "CPPFLAGS";

// https://gcc.gnu.org/onlinedocs/cpp/Environment-Variables.html
pub const KEY_GCC__C_INCLUDE_1: &str = "CPATH";
pub const KEY_GCC__C_INCLUDE_2: &str = "C_INCLUDE_PATH";
pub const KEY_GCC__C_INCLUDE_3: &str = "CPLUS_INCLUDE_PATH";

// man page for `xcrun` (macOS SDK selection)
pub const KEY_APPLE__SDKROOT: &str = "SDKROOT";

static COMPILER_KEYS: std::sync::LazyLock<HashSet<&'static str>> =
    std::sync::LazyLock::new(|| {
        [
            KEY_MAKE__C_COMPILER,
            KEY_MAKE__CXX_COMPILER,
            KEY_MAKE__C_FLAGS,
            KEY_MAKE__CXX_FLAGS,
            KEY_MAKE__C_PREPROCESSOR_FLAGS,
        ]
        .iter()
        .cloned()
        .collect()
    });

static INCLUDE_KEYS: std::sync::LazyLock<HashSet<&'static str>> = std::sync::LazyLock::new(|| {
    [
        KEY_GCC__C_INCLUDE_1,
        KEY_GCC__C_INCLUDE_2,
        KEY_GCC__C_INCLUDE_3,
    ]
    .iter()
    .cloned()
    .collect()
});

/// Whether the environment variable influences the synthesized
/// configuration, directly or through the probed compiler.
pub fn relevant_env(key: &str) -> bool {
    key == KEY_APPLE__SDKROOT || COMPILER_KEYS.contains(key) || INCLUDE_KEYS.contains(key)
}
