use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use docport_cli::DEFAULT_OUTPUT_DIR;
use docport_cli::DocportCli;
use docport_cli::OutputFormat;
use docport_core::MigrationConfig;
use docport_core::RuleTable;
use docport_core::migrate::MigrationEntry;
use docport_core::migrate::MigrationPlan;
use docport_core::migrate::plan_migration;
use docport_core::migrate::preview_entry;
use docport_core::migrate::run_migration;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = DocportCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if let Err(e) = run(&args) {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<docport_core::DocportError>() {
			Ok(docport_err) => {
				let report: miette::Report = (*docport_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init()
		.ok();
}

fn resolve_root(args: &DocportCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn resolve_destination(args: &DocportCli, root: &Path) -> PathBuf {
	args.out
		.clone()
		.unwrap_or_else(|| root.join(DEFAULT_OUTPUT_DIR))
}

fn run(args: &DocportCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let destination = resolve_destination(args, &root);
	let config = MigrationConfig::load_or_default(&root)?;
	let rules = RuleTable::standard()?;
	let plan = plan_migration(&config, &root, &destination)?;

	if args.dry_run {
		run_dry(args, &rules, &plan, &root, &destination)
	} else {
		run_write(args, &rules, &plan, &root, &destination)
	}
}

fn run_write(
	args: &DocportCli,
	rules: &RuleTable,
	plan: &MigrationPlan,
	root: &Path,
	destination: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
	let text = args.format == OutputFormat::Text;
	if text {
		println!(
			"{}",
			colored!("Starting Mintlify to Docusaurus migration...", bold)
		);
	}

	let report = run_migration(rules, plan, |entry| {
		if text {
			println!(
				"Migrating: {} -> {}",
				make_relative(&entry.source, root),
				make_relative(&entry.destination, destination)
			);
		}
	})?;

	match args.format {
		OutputFormat::Text => {
			println!(
				"{} {} file(s) written to {}",
				colored!("Migration complete:", green),
				report.migrated.len(),
				destination.display()
			);
		}
		OutputFormat::Json => {
			let output = JsonReport::new(false, &report.migrated, root, destination);
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
	}

	Ok(())
}

fn run_dry(
	args: &DocportCli,
	rules: &RuleTable,
	plan: &MigrationPlan,
	root: &Path,
	destination: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
	if args.format == OutputFormat::Json {
		let output = JsonReport::new(true, &plan.entries, root, destination);
		println!("{}", serde_json::to_string_pretty(&output)?);
		return Ok(());
	}

	if plan.is_empty() {
		println!("Dry run: no files to migrate.");
		return Ok(());
	}

	println!("Dry run: would migrate {} file(s):", plan.len());
	for entry in &plan.entries {
		let position = entry
			.sidebar_position
			.map(|position| format!(" (sidebar_position: {position})"))
			.unwrap_or_default();
		println!(
			"  {} -> {}{position}",
			make_relative(&entry.source, root),
			make_relative(&entry.destination, destination)
		);

		if args.diff {
			let preview = preview_entry(rules, entry)?;
			print_diff(&preview.original, &preview.converted);
		}
	}

	Ok(())
}

#[derive(Serialize)]
struct JsonReport {
	dry_run: bool,
	destination: String,
	entries: Vec<JsonEntry>,
}

#[derive(Serialize)]
struct JsonEntry {
	source: String,
	destination: String,
	sidebar_position: Option<usize>,
}

impl JsonReport {
	fn new(dry_run: bool, entries: &[MigrationEntry], root: &Path, destination: &Path) -> Self {
		Self {
			dry_run,
			destination: destination.display().to_string(),
			entries: entries
				.iter()
				.map(|entry| {
					JsonEntry {
						source: make_relative(&entry.source, root),
						destination: make_relative(&entry.destination, destination),
						sidebar_position: entry.sidebar_position,
					}
				})
				.collect(),
		}
	}
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("    {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("    {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("     {change}");
			}
		}
	}
	println!();
}

/// Make a path relative to root for display purposes, always with forward
/// slashes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
		.replace('\\', "/")
}
