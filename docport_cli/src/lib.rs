use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Migrate a Mintlify documentation tree to Docusaurus.",
	long_about = "docport converts a Mintlify documentation tree into a Docusaurus docs \
	              tree.\n\nComponent tags such as <Note>, <Tabs> and <CardGroup> become \
	              admonitions, headings and link lists, frontmatter is reduced to title, \
	              description and sidebar_position, and every walked file receives a sidebar \
	              position from its place among its siblings.\n\nQuick start:\n  docport \
	              --dry-run   Preview which files would be written\n  docport             \
	              Write the converted tree"
)]
pub struct DocportCli {
	/// Path to the Mintlify docs root. Defaults to the current directory.
	#[arg(long, short)]
	pub path: Option<PathBuf>,

	/// Destination docs directory. Defaults to `<path>/docusaurus/docs`.
	#[arg(long, short)]
	pub out: Option<PathBuf>,

	/// Preview the migration without writing files. Prints every planned
	/// source and destination along with its sidebar position.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// With `--dry-run`, show a line diff between each source file and its
	/// converted content.
	#[arg(long, default_value_t = false, requires = "dry_run")]
	pub diff: bool,

	/// Output format for the migration report.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption. Lists every planned or
	/// written entry with its source, destination and sidebar position.
	Json,
}

/// Directory, relative to the source root, that receives the converted tree
/// when `--out` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "docusaurus/docs";
