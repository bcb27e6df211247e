//! Unit tests for error classification and rendering.

use std::error::Error as _;
use std::io;
use std::path::Path;

use rstest::rstest;

use super::CfgError;
use crate::KeyPath;

#[rstest]
#[case(CfgError::key_not_found(&KeyPath::from("a.b"), "a"), true)]
#[case(CfgError::not_a_mapping(&KeyPath::from("a.b"), "a"), true)]
#[case(CfgError::not_a_sequence(&KeyPath::from("a.b")), false)]
#[case(CfgError::malformed("json:[]", "no mapping"), false)]
fn classifies_missing_values(#[case] err: std::sync::Arc<CfgError>, #[case] missing: bool) {
    assert_eq!(err.is_missing(), missing, "unexpected classification for {err}");
}

#[test]
fn messages_carry_the_dotted_key() {
    let err = CfgError::key_not_found(&KeyPath::parse("outer.inner"), "inner");
    let rendered = err.to_string();
    assert!(rendered.contains("outer.inner"), "message was {rendered}");
    assert!(rendered.contains("'inner'"), "message was {rendered}");
}

#[test]
fn unavailable_keeps_the_io_error_as_source() {
    let err = CfgError::unavailable(
        Path::new("/nowhere/cfg.json"),
        io::Error::new(io::ErrorKind::NotFound, "gone"),
    );
    let source = err
        .source()
        .and_then(|s| s.downcast_ref::<io::Error>())
        .map(io::Error::kind);
    assert_eq!(source, Some(io::ErrorKind::NotFound));
}

#[test]
fn clap_errors_convert_into_command_line_variant() {
    let clap_err = clap::Command::new("demo").error(clap::error::ErrorKind::UnknownArgument, "boom");
    let err = CfgError::from(clap_err);
    assert!(matches!(err, CfgError::CommandLine(_)));
}
