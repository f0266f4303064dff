// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context as AnyhowContext;
use ccprobe::{args, config, context, output, probe};
use std::fs::File;
use std::io;
use std::process::ExitCode;

/// Driver function of the application.
fn main() -> anyhow::Result<ExitCode> {
    // Initialize the logging system.
    env_logger::init();
    // Get the package name and version from Cargo
    let pkg_name = env!("CARGO_PKG_NAME");
    let pkg_version = env!("CARGO_PKG_VERSION");
    log::info!("{pkg_name} v{pkg_version}");

    // Capture application context.
    let context = context::Context::capture()?;
    log::info!("{context}");
    // Parse the command line arguments.
    let matches = args::cli().get_matches();
    let arguments = args::Arguments::try_from(matches)?;
    log::info!("{arguments:?}");
    // Load the configuration.
    let configuration = config::Loader::load(&context, &arguments.config)?;
    log::info!("{configuration}");

    // Resolve the base command the probe starts from.
    let base_command = if configuration.compiler.command.is_empty() {
        context.default_compiler_command(arguments.language)
    } else {
        configuration.compiler.command.clone()
    };

    // Synthesize the configuration for the source root.
    let runner = probe::executor::ProcessRunner;
    let compiler = probe::create(
        &arguments.source_root,
        &base_command,
        arguments.language,
        &configuration,
        &runner,
    )?;

    // Layer the per-file command line on top of a clone of the defaults.
    let mut result = compiler.default_configuration();
    if let Some(command_line) = &arguments.command_line {
        compiler.apply_arguments(command_line, &mut result);
    }

    match arguments.output.as_str() {
        "-" => output::write_snapshot(io::stdout().lock(), &result)?,
        path => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {path}"))?;
            output::write_snapshot(file, &result)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
