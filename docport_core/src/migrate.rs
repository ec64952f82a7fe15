//! Tree migration: map a Mintlify source tree onto a Docusaurus docs tree.
//!
//! A run happens in two steps. [`plan_migration`] walks the source tree and
//! decides, without reading any file contents, which files go where and which
//! sidebar position each one receives. [`run_migration`] then converts and
//! writes the planned files one at a time. The first I/O failure aborts the
//! run, and files written before it stay on disk.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::DocportError;
use crate::DocportResult;
use crate::config::MigrationConfig;
use crate::frontmatter::rewrite_frontmatter;
use crate::rules::RuleTable;
use crate::transform::normalize_line_endings;
use crate::transform::transform;

/// One file to migrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationEntry {
	pub source: PathBuf,
	pub destination: PathBuf,
	/// Injected as `sidebar_position` when the file does not declare one.
	/// Explicitly mapped root files carry no hint.
	pub sidebar_position: Option<usize>,
}

/// Every file a run will write, in the order they are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationPlan {
	pub entries: Vec<MigrationEntry>,
}

impl MigrationPlan {
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// The files a run actually wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
	pub migrated: Vec<MigrationEntry>,
}

/// A converted file that has not been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
	pub entry: MigrationEntry,
	pub original: String,
	pub converted: String,
}

/// Work out which files a migration from `source_root` to `destination_root`
/// writes.
///
/// Explicit root-level mappings come first, in table order, followed by each
/// content category. Missing mapped files and missing category directories
/// are skipped without error.
pub fn plan_migration(
	config: &MigrationConfig,
	source_root: &Path,
	destination_root: &Path,
) -> DocportResult<MigrationPlan> {
	let mut plan = MigrationPlan::default();

	for mapping in &config.mappings {
		let source = source_root.join(&mapping.source);
		if !source.is_file() {
			tracing::debug!(source = %source.display(), "mapped file not found, skipping");
			continue;
		}

		plan.entries.push(MigrationEntry {
			source,
			destination: destination_root.join(&mapping.destination),
			sidebar_position: None,
		});
	}

	let mut ancestors = HashSet::new();
	for category in &config.categories {
		let source_dir = source_root.join(category);
		if !source_dir.is_dir() {
			tracing::debug!(category = %category, "category directory not found, skipping");
			continue;
		}

		plan_directory(
			config,
			&source_dir,
			&destination_root.join(category),
			&mut plan.entries,
			&mut ancestors,
		)?;
	}

	Ok(plan)
}

fn plan_directory(
	config: &MigrationConfig,
	source_dir: &Path,
	destination_dir: &Path,
	entries: &mut Vec<MigrationEntry>,
	ancestors: &mut HashSet<PathBuf>,
) -> DocportResult<()> {
	// Only a directory that contains itself is a cycle. The same directory
	// reached through two unrelated paths is planned under both.
	let canonical = source_dir
		.canonicalize()
		.unwrap_or_else(|_| source_dir.to_path_buf());
	if !ancestors.insert(canonical.clone()) {
		return Err(DocportError::SymlinkCycle {
			path: source_dir.display().to_string(),
		});
	}

	let result = plan_entries(config, source_dir, destination_dir, entries, ancestors);
	ancestors.remove(&canonical);

	result
}

fn plan_entries(
	config: &MigrationConfig,
	source_dir: &Path,
	destination_dir: &Path,
	entries: &mut Vec<MigrationEntry>,
	ancestors: &mut HashSet<PathBuf>,
) -> DocportResult<()> {
	let mut paths = read_dir_sorted(source_dir)?;
	paths.retain(|path| {
		let skipped = path
			.file_name()
			.and_then(|name| name.to_str())
			.is_some_and(|name| config.is_skipped(name));
		if skipped {
			tracing::debug!(path = %path.display(), "skipping excluded entry");
		}
		!skipped
	});

	// Directories and content files share one sibling ordering.
	let mut position = 0;
	for path in paths {
		if path.is_dir() {
			let Some(name) = path.file_name() else {
				continue;
			};
			position += 1;
			plan_directory(
				config,
				&path,
				&destination_dir.join(name),
				entries,
				ancestors,
			)?;
		} else if path.is_file() && config.is_content_file(&path) {
			let Some(file_name) = config.target_file_name(&path) else {
				continue;
			};
			position += 1;
			entries.push(MigrationEntry {
				destination: destination_dir.join(file_name),
				source: path,
				sidebar_position: Some(position),
			});
		}
	}

	Ok(())
}

/// The entries of `dir`, sorted by file name.
fn read_dir_sorted(dir: &Path) -> DocportResult<Vec<PathBuf>> {
	let read_error = |source| {
		DocportError::ReadSource {
			path: dir.to_path_buf(),
			source,
		}
	};

	let mut paths = std::fs::read_dir(dir)
		.map_err(read_error)?
		.map(|entry| entry.map(|entry| entry.path()))
		.collect::<Result<Vec<_>, _>>()
		.map_err(read_error)?;
	paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

	Ok(paths)
}

/// Convert one Mintlify document to Docusaurus Markdown.
///
/// The component syntax is rewritten first so that the frontmatter rewrite
/// sees the final text; `hint` becomes the sidebar position when the
/// document does not declare one.
pub fn convert_document(table: &RuleTable, text: &str, hint: Option<usize>) -> String {
	let content = normalize_line_endings(text);
	let transformed = transform(&content, table);
	rewrite_frontmatter(&transformed, table.policy(), hint)
}

/// Read `source`, convert it and write the result to `destination`, creating
/// parent directories as needed. An existing destination is overwritten.
pub fn migrate_file(
	table: &RuleTable,
	source: &Path,
	destination: &Path,
	hint: Option<usize>,
) -> DocportResult<()> {
	let content = read_source(source)?;
	let converted = convert_document(table, &content, hint);

	let write_error = |error| {
		DocportError::WriteDestination {
			path: destination.to_path_buf(),
			source: error,
		}
	};
	if let Some(parent) = destination.parent() {
		std::fs::create_dir_all(parent).map_err(write_error)?;
	}
	std::fs::write(destination, converted).map_err(write_error)?;

	tracing::debug!(
		source = %source.display(),
		destination = %destination.display(),
		sidebar_position = ?hint,
		"migrated file"
	);

	Ok(())
}

/// Write every planned entry in order, calling `on_migrated` after each one.
pub fn run_migration(
	table: &RuleTable,
	plan: &MigrationPlan,
	mut on_migrated: impl FnMut(&MigrationEntry),
) -> DocportResult<MigrationReport> {
	let mut report = MigrationReport::default();

	for entry in &plan.entries {
		migrate_file(
			table,
			&entry.source,
			&entry.destination,
			entry.sidebar_position,
		)?;
		on_migrated(entry);
		report.migrated.push(entry.clone());
	}

	Ok(report)
}

/// Plan and run a migration in one call.
pub fn migrate_tree(
	config: &MigrationConfig,
	table: &RuleTable,
	source_root: &Path,
	destination_root: &Path,
) -> DocportResult<MigrationReport> {
	let plan = plan_migration(config, source_root, destination_root)?;
	run_migration(table, &plan, |_| {})
}

/// Convert a planned entry without writing it.
pub fn preview_entry(table: &RuleTable, entry: &MigrationEntry) -> DocportResult<Preview> {
	let original = read_source(&entry.source)?;
	let converted = convert_document(table, &original, entry.sidebar_position);

	Ok(Preview {
		entry: entry.clone(),
		original,
		converted,
	})
}

fn read_source(path: &Path) -> DocportResult<String> {
	std::fs::read_to_string(path).map_err(|source| {
		DocportError::ReadSource {
			path: path.to_path_buf(),
			source,
		}
	})
}
