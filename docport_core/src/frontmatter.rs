//! Frontmatter rewriting.
//!
//! Only flat `key: value` lines are understood. Anything the parser cannot
//! place, including a block that is never closed, leaves the document as it
//! was.

use crate::rules::FieldPolicy;

/// Delimiter for frontmatter sections
pub const FRONTMATTER_DELIMITER: &str = "---";

/// One top-level `key: value` line of a metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
	pub key: &'a str,
	/// The full line, without its line ending.
	pub line: &'a str,
}

/// A document split into its metadata block and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter<'a> {
	/// Parsed fields in their original order.
	pub fields: Vec<Field<'a>>,
	/// Everything after the closing delimiter line.
	pub body: &'a str,
}

impl Frontmatter<'_> {
	pub fn has_key(&self, key: &str) -> bool {
		self.fields.iter().any(|field| field.key == key)
	}
}

/// Split `text` into frontmatter and body.
///
/// Returns `None` when the first line is not `---` or when no closing `---`
/// line follows it.
pub fn parse_frontmatter(text: &str) -> Option<Frontmatter<'_>> {
	let mut lines = text.split_inclusive('\n');
	let opening = lines.next()?;
	if !is_delimiter(opening) {
		return None;
	}

	let mut offset = opening.len();
	let mut fields = Vec::new();

	for line in lines {
		offset += line.len();

		if is_delimiter(line) {
			return Some(Frontmatter {
				fields,
				body: &text[offset..],
			});
		}

		if let Some(field) = parse_field(line) {
			fields.push(field);
		}
	}

	None
}

/// Rewrite the metadata block of `text` according to `policy`.
///
/// Keys outside the allow-list are dropped. When the block has no ordering
/// key and `hint` is set, `<order_key>: <hint>` is appended as the last line.
/// The body follows after exactly one blank line.
pub fn rewrite_frontmatter(text: &str, policy: &FieldPolicy, hint: Option<usize>) -> String {
	let Some(frontmatter) = parse_frontmatter(text) else {
		return text.to_string();
	};

	let mut output = String::with_capacity(text.len());
	output.push_str(FRONTMATTER_DELIMITER);
	output.push('\n');

	for field in frontmatter
		.fields
		.iter()
		.filter(|field| policy.allows(field.key))
	{
		output.push_str(field.line);
		output.push('\n');
	}

	let has_order = policy.allows(policy.order_key) && frontmatter.has_key(policy.order_key);
	if let Some(hint) = hint.filter(|_| !has_order) {
		output.push_str(&format!("{}: {hint}\n", policy.order_key));
	}

	output.push_str(FRONTMATTER_DELIMITER);
	output.push_str("\n\n");
	output.push_str(frontmatter.body.trim_start_matches(['\r', '\n']));

	output
}

fn is_delimiter(line: &str) -> bool {
	line.trim_end() == FRONTMATTER_DELIMITER
}

fn parse_field(line: &str) -> Option<Field<'_>> {
	let line = line.trim_end_matches(['\r', '\n']);

	// Indented lines belong to a nested value, not to a top-level key.
	if line.starts_with(char::is_whitespace) {
		return None;
	}

	let (key, _) = line.split_once(':')?;
	let key = key.trim_end();
	if key.is_empty() {
		return None;
	}

	Some(Field { key, line })
}
