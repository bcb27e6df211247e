//! Command-line adapter producing mappings from argument tokens.

use clap::Parser;
use serde_json::{Map, Value, json};

use crate::{CfgResult, CfgResultExt};

/// Turns raw argument tokens into an ordered list of mappings.
///
/// The store merges the mappings in the order they are returned.
pub trait CommandLineAdapter {
    /// Translate `args` (without the program name) into mappings.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the arguments cannot be parsed.
    fn create_dicts(&self, args: &[String]) -> CfgResult<Vec<Map<String, Value>>>;
}

/// Standard command-line options understood by the store.
///
/// Each option that is present yields its own mapping:
///
/// | option | mapping |
/// |---|---|
/// | `-f/--config-file` | `configuration.deprecated.config_file` |
/// | `-j/--json` (repeatable) | `configuration.json` |
/// | `-m/--modules-directory` | `global.modules.directories` |
/// | `-c/--create-makefile-dependencies` | `actions.create_makefile_dependencies` |
/// | positional arguments | `general.command_line_arguments` |
#[derive(Clone, Debug, Default, Parser)]
#[command(name = "cfgtree")]
pub struct CmdLineParams {
    /// Legacy configuration file to convert.
    #[arg(short = 'f', long = "config-file", value_name = "PATH")]
    pub config_file: Option<String>,

    /// Further configuration source (`json:<text>` or `file:<path>`).
    #[arg(short = 'j', long = "json", value_name = "SOURCE")]
    pub json: Vec<String>,

    /// Directory holding the modules.
    #[arg(short = 'm', long = "modules-directory", value_name = "DIR")]
    pub modules_directory: Option<String>,

    /// Write makefile dependencies to this file.
    #[arg(short = 'c', long = "create-makefile-dependencies", value_name = "FILE")]
    pub create_makefile_dependencies: Option<String>,

    /// Remaining arguments, passed through untouched.
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

impl CmdLineParams {
    /// Convert the parsed options into mappings, one per option present.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgtree::source::CmdLineParams;
    /// use serde_json::json;
    ///
    /// let params = CmdLineParams {
    ///     json: vec!["json:{}".into()],
    ///     ..CmdLineParams::default()
    /// };
    /// let dicts = params.into_dicts();
    /// assert_eq!(dicts.len(), 1);
    /// assert_eq!(dicts[0]["configuration"], json!({"json": ["json:{}"]}));
    /// ```
    #[must_use]
    pub fn into_dicts(self) -> Vec<Map<String, Value>> {
        let candidates = [
            self.config_file
                .map(|path| json!({"configuration": {"deprecated": {"config_file": path}}})),
            (!self.json.is_empty()).then(|| json!({"configuration": {"json": self.json}})),
            self.modules_directory
                .map(|dir| json!({"global": {"modules": {"directories": [dir]}}})),
            self.create_makefile_dependencies
                .map(|file| json!({"actions": {"create_makefile_dependencies": file}})),
            (!self.args.is_empty())
                .then(|| json!({"general": {"command_line_arguments": self.args}})),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter_map(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect()
    }
}

impl CommandLineAdapter for CmdLineParams {
    fn create_dicts(&self, args: &[String]) -> CfgResult<Vec<Map<String, Value>>> {
        let program = std::iter::once("cfgtree");
        let parsed = Self::try_parse_from(program.chain(args.iter().map(String::as_str))).into_cfg()?;
        Ok(parsed.into_dicts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use rstest::rstest;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| (*t).to_owned()).collect()
    }

    #[test]
    fn no_arguments_yield_no_mappings() -> Result<()> {
        let dicts = CmdLineParams::default().create_dicts(&[])?;
        ensure!(dicts.is_empty());
        Ok(())
    }

    #[test]
    fn options_map_to_well_known_keys_in_order() -> Result<()> {
        let dicts = CmdLineParams::default().create_dicts(&args(&[
            "-j",
            "json:{}",
            "--config-file",
            "old.cfg",
            "-j",
            "file:more.json",
            "-m",
            "mods",
            "extra",
        ]))?;
        let values: Vec<Value> = dicts.into_iter().map(Value::Object).collect();
        ensure!(
            values
                == vec![
                    json!({"configuration": {"deprecated": {"config_file": "old.cfg"}}}),
                    json!({"configuration": {"json": ["json:{}", "file:more.json"]}}),
                    json!({"global": {"modules": {"directories": ["mods"]}}}),
                    json!({"general": {"command_line_arguments": ["extra"]}}),
                ],
            "unexpected mappings {values:?}"
        );
        Ok(())
    }

    #[rstest]
    #[case(&["--no-such-flag"])]
    #[case(&["-f"])]
    fn parse_failures_surface_as_command_line_errors(#[case] tokens: &[&str]) {
        let err = CmdLineParams::default().create_dicts(&args(tokens)).err();
        assert!(matches!(err.as_deref(), Some(crate::CfgError::CommandLine(_))));
    }
}
