//! Migration settings: the skip set, content categories and explicit root
//! mappings, with built-in defaults and an optional `docport.toml` override.

use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DocportError;
use crate::DocportResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["docport.toml", ".docport.toml"];

/// Names that are never visited during a directory walk.
pub const DEFAULT_SKIP: [&str; 9] = [
	"mint.json",
	"docusaurus",
	"logo",
	"favicon.svg",
	"reports",
	"archive",
	"DOCUMENTATION_ORGANIZATION.md",
	"Taskfile.yaml",
	".iam-policies.md",
];

/// Directories walked recursively into the destination subtree of the same
/// name.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["services", "features", "guides"];

pub const DEFAULT_CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

pub const DEFAULT_TARGET_EXTENSION: &str = "md";

/// Root-level files moved to explicit destinations before any walk.
pub const DEFAULT_MAPPINGS: [(&str, &str); 9] = [
	("introduction.mdx", "introduction.md"),
	("installation.mdx", "installation.md"),
	("QUICKSTART.md", "quickstart.md"),
	("ARCHITECTURE.md", "architecture.md"),
	("CLEAN_ARCHITECTURE.md", "advanced/clean-architecture.md"),
	("DEVELOPMENT.md", "advanced/development.md"),
	("DEPLOYMENT_GUIDE.md", "advanced/deployment.md"),
	("SERVICES_GUIDE.md", "guides/services-overview.md"),
	("PROMETHEUS_QUERIES.md", "features/prometheus-queries.md"),
];

/// An explicit root-level file mapping.
///
/// ```toml
/// [[mappings]]
/// source = "QUICKSTART.md"
/// destination = "quickstart.md"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PathMapping {
	/// Path relative to the source root.
	pub source: PathBuf,
	/// Path relative to the destination root.
	pub destination: PathBuf,
}

impl PathMapping {
	pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
		Self {
			source: source.into(),
			destination: destination.into(),
		}
	}
}

/// The immutable tables that steer a migration run.
///
/// Every field falls back to the built-in Mintlify layout, so a
/// `docport.toml` only needs the tables it wants to replace:
///
/// ```toml
/// skip = ["mint.json", "drafts"]
/// categories = ["services", "guides"]
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationConfig {
	/// Entry names skipped while walking, matched exactly.
	pub skip: BTreeSet<String>,
	/// Extensions (without the dot) treated as content files.
	pub content_extensions: Vec<String>,
	/// Extension given to every migrated file.
	pub target_extension: String,
	/// Directories under the source root walked recursively, in order.
	pub categories: Vec<String>,
	/// Explicit root-level mappings, resolved in order before any walk.
	pub mappings: Vec<PathMapping>,
}

impl Default for MigrationConfig {
	fn default() -> Self {
		Self {
			skip: DEFAULT_SKIP.iter().map(ToString::to_string).collect(),
			content_extensions: DEFAULT_CONTENT_EXTENSIONS
				.iter()
				.map(ToString::to_string)
				.collect(),
			target_extension: DEFAULT_TARGET_EXTENSION.to_string(),
			categories: DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect(),
			mappings: DEFAULT_MAPPINGS
				.iter()
				.map(|&(source, destination)| PathMapping::new(source, destination))
				.collect(),
		}
	}
}

impl MigrationConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> DocportResult<Option<MigrationConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: MigrationConfig =
			toml::from_str(&content).map_err(|e| DocportError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}

	/// Like [`MigrationConfig::load`], falling back to the built-in tables.
	pub fn load_or_default(root: &Path) -> DocportResult<MigrationConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	pub fn is_skipped(&self, name: &str) -> bool {
		self.skip.contains(name)
	}

	/// Whether `path` carries one of the content extensions.
	pub fn is_content_file(&self, path: &Path) -> bool {
		path.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| self.content_extensions.iter().any(|known| known == ext))
	}

	/// `guide.mdx` becomes `guide.md` under the default target extension.
	pub fn target_file_name(&self, path: &Path) -> Option<PathBuf> {
		let mut name = path.file_stem()?.to_os_string();
		name.push(".");
		name.push(&self.target_extension);
		Some(PathBuf::from(name))
	}
}
