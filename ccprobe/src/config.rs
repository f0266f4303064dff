// SPDX-License-Identifier: GPL-3.0-or-later

//! This module defines the build configuration of the application.
//!
//! The configuration is either loaded from a file or used with default
//! values, which are defined in the code. It names the compiler family
//! to synthesize configurations for, the base compiler command, and the
//! per-(source root, language) command overrides.
//!
//! The configuration file syntax is based on the YAML format.
//! The default configuration file name is `ccprobe.yml`.
//!
//! The configuration file location is searched in the following order:
//! 1. The current working directory
//! 2. The local configuration directory of the user
//! 3. The configuration directory of the user
//! 4. The local configuration directory of the application
//! 5. The configuration directory of the application
//!
//! ```yaml
//! schema: "1.0"
//!
//! compiler:
//!   family: clang
//!   command: [/usr/bin/clang]
//!
//! overrides:
//!   - root: /opt/project/firmware
//!     language: c
//!     command: [/opt/arm/bin/clang, --target=armv7em-none-eabi]
//!
//! sysroot: /Library/Developer/CommandLineTools/SDKs/MacOSX.sdk
//! ```

// Re-Export the types and the loader module content.
pub use loader::{ConfigError, Loader};
pub use types::*;
pub use validation::Validator;

mod types {
    use crate::semantic::LanguageKind;
    use serde::Deserialize;
    use std::fmt;
    use std::path::PathBuf;

    /// Represents the application configuration.
    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    pub struct Main {
        #[serde(deserialize_with = "validate_schema_version")]
        pub schema: String,
        #[serde(default)]
        pub compiler: Compiler,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub overrides: Vec<CommandOverride>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub sysroot: Option<PathBuf>,
    }

    impl Default for Main {
        fn default() -> Self {
            Self {
                schema: String::from(SUPPORTED_SCHEMA_VERSION),
                compiler: Compiler::default(),
                overrides: vec![],
                sysroot: None,
            }
        }
    }

    impl fmt::Display for Main {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            writeln!(f, "Configuration:")?;
            match serde_yml::to_string(self) {
                Ok(yaml_string) => {
                    for line in yaml_string.lines() {
                        writeln!(f, "{}", line)?;
                    }
                    Ok(())
                }
                Err(_) => {
                    panic!("configuration can't be serialized")
                }
            }
        }
    }

    /// The compiler the configurations are synthesized for.
    ///
    /// The `family` is the declared compiler family identifier, consumed
    /// by the factory dispatch. The `command` is the base invocation the
    /// probe starts from (executable plus fixed arguments); when empty,
    /// the caller resolves one from the environment.
    #[derive(Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
    pub struct Compiler {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub family: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub command: Vec<String>,
    }

    /// Replaces the base command for one (source root, language) pair.
    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    pub struct CommandOverride {
        pub root: PathBuf,
        pub language: LanguageKind,
        pub command: Vec<String>,
    }

    pub(super) const SUPPORTED_SCHEMA_VERSION: &str = "1.0";

    // Custom deserialization function to validate the schema version
    fn validate_schema_version<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let schema: String = Deserialize::deserialize(deserializer)?;
        if schema != SUPPORTED_SCHEMA_VERSION {
            use serde::de::Error;
            Err(Error::custom(format!(
                "Unsupported schema version: {schema}. Expected: {SUPPORTED_SCHEMA_VERSION}"
            )))
        } else {
            Ok(schema)
        }
    }
}

pub mod validation {

    use super::types::*;
    use thiserror::Error;

    /// Trait for validating configuration objects
    pub trait Validator<T> {
        type Error: std::error::Error;

        fn validate(config: &T) -> Result<(), Self::Error>;
    }

    /// Validation errors for configuration
    #[derive(Debug, Error)]
    pub enum ValidationError {
        #[error("Empty string value for field '{field}'")]
        EmptyString { field: &'static str },
        #[error("Empty command for override entry at: {idx}")]
        EmptyOverrideCommand { idx: usize },
        #[error("Empty root path for override entry at: {idx}")]
        EmptyOverrideRoot { idx: usize },
    }

    impl Validator<Main> for Main {
        type Error = ValidationError;

        fn validate(config: &Main) -> Result<(), Self::Error> {
            if let Some(family) = &config.compiler.family {
                if family.is_empty() {
                    return Err(ValidationError::EmptyString { field: "compiler.family" });
                }
            }
            if config.compiler.command.iter().any(String::is_empty) {
                return Err(ValidationError::EmptyString { field: "compiler.command" });
            }
            for (idx, entry) in config.overrides.iter().enumerate() {
                if entry.root.as_os_str().is_empty() {
                    return Err(ValidationError::EmptyOverrideRoot { idx });
                }
                if entry.command.is_empty() {
                    return Err(ValidationError::EmptyOverrideCommand { idx });
                }
            }
            Ok(())
        }
    }

}

pub mod loader {
    use super::{Main, Validator};
    use directories::{BaseDirs, ProjectDirs};
    use log::{debug, info};
    use std::fs::OpenOptions;
    use std::path::{Path, PathBuf};
    use thiserror::Error;

    const CONFIG_FILE_NAME: &str = "ccprobe.yml";

    pub struct Loader {}

    impl Loader {
        /// Loads the configuration from the specified file or the default locations.
        ///
        /// If the configuration file is specified, it will be used. Otherwise, the default locations
        /// will be searched for the configuration file. If the configuration file is not found, the
        /// default configuration will be returned.
        pub fn load(
            context: &crate::context::Context,
            filename: &Option<String>,
        ) -> Result<Main, ConfigError> {
            if let Some(path) = filename {
                // If the configuration file is specified, use it.
                Self::from_file(Path::new(path))
            } else {
                // Otherwise, try to find the configuration file in the default locations.
                let locations = Self::file_locations(context);
                for location in locations {
                    debug!("Checking configuration file: {}", location.display());
                    if location.exists() {
                        return Self::from_file(location.as_path());
                    }
                }
                // If the configuration file is not found, return the default configuration.
                debug!("Configuration file not found. Using the default configuration.");
                Ok(Main::default())
            }
        }

        /// The default locations where the configuration file can be found.
        fn file_locations(context: &crate::context::Context) -> Vec<PathBuf> {
            let mut locations = Vec::new();

            locations.push(context.current_directory.clone());
            if let Some(base_dirs) = BaseDirs::new() {
                locations.push(base_dirs.config_local_dir().to_path_buf());
                locations.push(base_dirs.config_dir().to_path_buf());
            }

            if let Some(proj_dirs) = ProjectDirs::from("com.github", "ccprobe", "ccprobe") {
                locations.push(proj_dirs.config_local_dir().to_path_buf());
                locations.push(proj_dirs.config_dir().to_path_buf());
            }
            // filter out duplicate elements from the list
            locations.dedup();
            // append the default configuration file name to the locations
            locations.iter().map(|p| p.join(CONFIG_FILE_NAME)).collect()
        }

        /// Loads the configuration from the specified file.
        pub fn from_file(path: &Path) -> Result<Main, ConfigError> {
            info!("Loading configuration file: {}", path.display());

            let reader = OpenOptions::new()
                .read(true)
                .open(path)
                .map_err(|source| ConfigError::FileAccess { path: path.to_path_buf(), source })?;

            let content: Main = Self::from_reader(reader)
                .map_err(|source| ConfigError::ParseError { path: path.to_path_buf(), source })?;

            // Validate the loaded configuration
            Main::validate(&content)
                .map_err(|source| ConfigError::ValidationError { path: path.to_path_buf(), source })?;

            Ok(content)
        }

        /// Define the deserialization format of the config file.
        fn from_reader<R, T>(rdr: R) -> serde_yml::Result<T>
        where
            R: std::io::Read,
            T: serde::de::DeserializeOwned + 'static,
        {
            serde_yml::from_reader(rdr)
        }
    }

    /// Represents all possible configuration-related errors.
    #[derive(Debug, Error)]
    pub enum ConfigError {
        /// Error when opening or reading a configuration file.
        #[error("Failed to access configuration file '{path}': {source}")]
        FileAccess {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        /// Error when parsing the configuration file format.
        #[error("Failed to parse configuration from file '{path}': {source}")]
        ParseError {
            path: PathBuf,
            #[source]
            source: serde_yml::Error,
        },
        /// Error when configuration validation fails.
        #[error("Configuration validation failed: {source}")]
        ValidationError {
            path: PathBuf,
            #[source]
            source: crate::config::validation::ValidationError,
        },
    }

}
