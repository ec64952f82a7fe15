use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn docport_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("docport"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}

/// A small Mintlify tree with one root mapping and one category.
pub fn mintlify_tree(root: &Path) -> std::io::Result<()> {
	write_file(
		root,
		"introduction.mdx",
		"---\ntitle: Intro\nicon: \"rocket\"\n---\n\n<Note>Read this first.</Note>\n",
	)?;
	write_file(
		root,
		"guides/setup.mdx",
		"---\ntitle: Setup\nmode: wide\n---\n\nSee [install](./install.mdx).\n",
	)?;
	write_file(
		root,
		"guides/usage.md",
		"---\ntitle: Usage\nsidebar_position: 9\n---\n\n<Tip>Be quick.</Tip>\n",
	)?;
	write_file(root, "guides/diagram.png", "not markdown")?;
	Ok(())
}
