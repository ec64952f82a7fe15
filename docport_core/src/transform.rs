//! The syntax transformer: the rule table applied to one document.

use std::borrow::Cow;

use crate::rules::RuleTable;

/// Rewrite Mintlify component syntax in `text` into Docusaurus Markdown.
///
/// Pattern rules run first, in table order, each over the whole document so
/// constructs spanning several lines are matched. Literal rewrites follow as a
/// separate pass, and the result has its blank-line runs collapsed.
///
/// Tags that no rule recognizes, or that are missing a required attribute,
/// are left in place as literal text.
pub fn transform(text: &str, table: &RuleTable) -> String {
	let mut result = text.to_string();

	for rule in table.rules() {
		let Cow::Owned(rewritten) = rule.apply(&result) else {
			continue;
		};
		tracing::trace!(rule = rule.name(), "applied rule");
		result = rewritten;
	}

	for literal in table.literals() {
		result = literal.apply(&result).into_owned();
	}

	table.collapse_blank_lines(&result).into_owned()
}

/// Normalize CRLF line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
	if content.contains('\r') {
		content.replace("\r\n", "\n").replace('\r', "\n")
	} else {
		content.to_string()
	}
}
