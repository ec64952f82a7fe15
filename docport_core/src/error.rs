use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DocportError {
	#[error(transparent)]
	#[diagnostic(code(docport::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read `{}`: {source}", path.display())]
	#[diagnostic(
		code(docport::read_source),
		help("check that the source file exists and is readable UTF-8 text")
	)]
	ReadSource {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("failed to write `{}`: {source}", path.display())]
	#[diagnostic(
		code(docport::write_destination),
		help("check that the destination directory is writable")
	)]
	WriteDestination {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(docport::config_parse),
		help(
			"check that docport.toml is valid TOML with `skip`, `categories` and `[[mappings]]` \
			 entries"
		)
	)]
	ConfigParse(String),

	#[error("invalid rule `{name}`: {reason}")]
	#[diagnostic(code(docport::invalid_rule))]
	InvalidRule { name: String, reason: String },

	#[error("rule `{earlier}` runs before `{later}` and matches the construct `{later}` rewrites")]
	#[diagnostic(
		code(docport::rule_order),
		help(
			"reorder the table so that `{later}` runs before `{earlier}`, or narrow the pattern \
			 of `{earlier}`"
		)
	)]
	RuleOrder { earlier: String, later: String },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(docport::symlink_cycle),
		help("remove the circular symlink or add its name to the skip set")
	)]
	SymlinkCycle { path: String },
}

pub type DocportResult<T> = Result<T, DocportError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
