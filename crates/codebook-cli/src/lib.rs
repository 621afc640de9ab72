//! CLI logic for the codebook generator.
//!
//! Resolves the effective run parameters from command-line arguments and the
//! optional configuration file, then hands off to [`codebook::run`].

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::PathBuf;

use log::info;

use codebook::{CodebookError, CodebookSelector, DirectorySource, RunConfig, RunParameters};

/// Run the codebook CLI application
///
/// Resolves run parameters (arguments win over the configuration file, which
/// wins over the built-in defaults) and generates the selected codebooks from
/// the workspace directory.
///
/// # Errors
///
/// Returns `CodebookError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - A missing settings file or net dump
/// - An unknown codebook type
/// - A caption overwrite file for a different protocol
pub fn run(args: &Args) -> Result<(), CodebookError> {
    info!(
        workspace = args.workspace,
        protocol = args.protocol;
        "Generating codebooks"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let params = resolve_parameters(args, &app_config)?;

    let source = DirectorySource::new(&args.workspace);
    codebook::run(&params, &source)
}

/// Arguments beat the configuration file; the configuration file beats the
/// defaults (`PALGA` into `out/`, inline options).
fn resolve_parameters(args: &Args, config: &RunConfig) -> Result<RunParameters, CodebookError> {
    let selector_text = args
        .codebook_type
        .as_deref()
        .or(config.codebook_type.as_deref())
        .unwrap_or("PALGA");
    let selector: CodebookSelector = selector_text.parse()?;

    let output_dir = args
        .output
        .as_deref()
        .or(config.output_dir.as_deref())
        .unwrap_or("out");
    let overwrite_file = args
        .overwrite_file
        .as_deref()
        .or(config.overwrite_file.as_deref())
        .map(PathBuf::from);

    Ok(RunParameters {
        protocol_prefix: args.protocol.clone(),
        nets: args.nets.clone(),
        overwrite_file,
        output_dir: PathBuf::from(output_dir),
        selector,
        separate_sheets: args.separate_sheets || config.separate_sheets.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> Args {
        Args {
            workspace: "workspace".to_string(),
            protocol: "LPROCtest_".to_string(),
            output: None,
            codebook_type: None,
            separate_sheets: false,
            overwrite_file: None,
            nets: None,
            config: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn defaults_are_palga_into_out() {
        let params =
            resolve_parameters(&bare_args(), &RunConfig::default()).expect("resolve");
        assert_eq!(params.selector, CodebookSelector::Palga);
        assert_eq!(params.output_dir, PathBuf::from("out"));
        assert!(!params.separate_sheets);
        assert!(params.overwrite_file.is_none());
    }

    #[test]
    fn arguments_beat_the_configuration_file() {
        let mut args = bare_args();
        args.codebook_type = Some("DEBUG".to_string());
        args.output = Some("delivery".to_string());
        let config = RunConfig {
            codebook_type: Some("NKI".to_string()),
            output_dir: Some("elsewhere".to_string()),
            separate_sheets: Some(true),
            overwrite_file: None,
        };
        let params = resolve_parameters(&args, &config).expect("resolve");
        assert_eq!(params.selector, CodebookSelector::Debug);
        assert_eq!(params.output_dir, PathBuf::from("delivery"));
        assert!(params.separate_sheets);
    }

    #[test]
    fn unknown_types_fail_resolution() {
        let mut args = bare_args();
        args.codebook_type = Some("XLSX".to_string());
        assert!(matches!(
            resolve_parameters(&args, &RunConfig::default()),
            Err(CodebookError::UnknownCodebookType(_))
        ));
    }
}
