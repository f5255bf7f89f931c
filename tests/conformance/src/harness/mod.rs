//! Idiom Conformance Harness
//!
//! This module provides the infrastructure for checking fresh conversions
//! against stored masters:
//!
//! - [`IdiomLoader`]: Locating idiom sources and masters, pairing them by id
//! - [`Converter`]: Producing a fresh document from a source
//! - [`ConversionOptions`]: Immutable settings passed to each conversion
//! - [`VerifyConfig`]: TOML run configuration
//! - [`IdiomContext`]: Running and reporting one case
//! - [`Diagnostic`]: Mismatch details with inline and unified diffs
//! - [`TestLogger`]: Human and JSON report output
//! - [`IdiomRunner`]: Executing the suite


pub use comparison::{inline_diff, unified_diff, Diagnostic};
pub use config::{ConfigError, ConfigResult, ConverterCommand, VerifyConfig};
pub use context::IdiomContext;
pub use converter::{CommandConverter, ConvertError, ConvertResult, Converter, StoredConverter};
pub use fixtures::{
    find_dir, list_with_extension, load_json_file, FixtureError, FixtureResult, IdiomCase,
    IdiomLoader, MASTER_DIR_PREFIX, SOURCE_DIR_NAME,
};
pub use logging::{LogLevel, OutputFormat, TestLogger};
pub use options::{
    check_name, parse_checks, ConversionOptions, ConversionPolicy, ConverterLogLevel, CHECK_CODES,
    DEFAULT_VALIDATOR_ARGS,
};
pub use result::TestResult;
pub use runner::{IdiomRunner, TestRunResult, TestSummary};
