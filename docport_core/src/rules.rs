//! The ordered rule table that drives the syntax transformer.
//!
//! Rules are plain data ([`RuleSpec`]) until [`RuleTable::compile`] turns them
//! into regular expressions. Order matters: every rule sees the output of the
//! rules before it, so wrapper tags (`<CardGroup>`, `<Tabs>`) must be reduced
//! before the leaf tags they contain (`<Card>`, `<Tab>`).

use std::borrow::Cow;

use regex::NoExpand;
use regex::Regex;

use crate::DocportError;
use crate::DocportResult;

/// Runs of three or more line breaks collapse to a single blank line.
pub const BLANK_LINE_RUN: &str = r"\n{3,}";

/// What a rule does to the construct it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
	/// Removes a marker, leaving at most a line break behind.
	Strip,
	/// Swaps a tag for a fixed piece of destination syntax.
	Rename,
	/// Builds the replacement from captured attributes (`$1`, `${title}`).
	Restructure,
}

/// A single pattern rule in its uncompiled form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec {
	/// Short identifier used in logs and ordering errors.
	pub name: &'static str,
	pub kind: RuleKind,
	/// Regular expression source, matched against the whole document.
	pub pattern: &'static str,
	/// Replacement text. Only [`RuleKind::Restructure`] expands capture
	/// references; every other kind inserts it verbatim.
	pub replacement: &'static str,
	/// A minimal sample of the construct this rule targets. The pattern must
	/// match it, and no earlier rule may.
	pub probe: &'static str,
}

impl RuleSpec {
	const fn new(
		name: &'static str,
		kind: RuleKind,
		pattern: &'static str,
		replacement: &'static str,
		probe: &'static str,
	) -> Self {
		Self {
			name,
			kind,
			pattern,
			replacement,
			probe,
		}
	}
}

/// A verbatim substring substitution applied after every pattern rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralRewrite {
	pub from: &'static str,
	pub to: &'static str,
}

impl LiteralRewrite {
	pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
		if text.contains(self.from) {
			Cow::Owned(text.replace(self.from, self.to))
		} else {
			Cow::Borrowed(text)
		}
	}
}

/// Which frontmatter keys survive the rewrite and which key carries the
/// sidebar ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
	pub allowed: &'static [&'static str],
	pub order_key: &'static str,
}

impl FieldPolicy {
	pub const STANDARD: Self = Self {
		allowed: &["title", "description", "sidebar_position"],
		order_key: "sidebar_position",
	};

	pub fn allows(&self, key: &str) -> bool {
		self.allowed.contains(&key)
	}
}

impl Default for FieldPolicy {
	fn default() -> Self {
		Self::STANDARD
	}
}

/// The Mintlify to Docusaurus rules, in application order.
pub const STANDARD_RULES: &[RuleSpec] = &[
	RuleSpec::new(
		"icon-field",
		RuleKind::Strip,
		r#"(?m)^icon:\s*['"]?[\w-]+['"]?\s*\n"#,
		"",
		"icon: 'book'\n",
	),
	RuleSpec::new(
		"code-group-open",
		RuleKind::Strip,
		r"<CodeGroup>\s*",
		"",
		"<CodeGroup>",
	),
	RuleSpec::new(
		"code-group-close",
		RuleKind::Strip,
		r"</CodeGroup>\s*",
		"",
		"</CodeGroup>",
	),
	RuleSpec::new("tabs-open", RuleKind::Strip, r"<Tabs>\s*", "", "<Tabs>"),
	RuleSpec::new("tabs-close", RuleKind::Strip, r"</Tabs>\s*", "", "</Tabs>"),
	RuleSpec::new(
		"tab-open",
		RuleKind::Restructure,
		r#"<Tab title="([^"]+)">\s*"#,
		"**${1}:**\n\n",
		r#"<Tab title="Shell">"#,
	),
	RuleSpec::new("tab-close", RuleKind::Rename, r"</Tab>\s*", "\n", "</Tab>"),
	RuleSpec::new(
		"warning-open",
		RuleKind::Rename,
		r"<Warning>\s*",
		":::warning\n\n",
		"<Warning>",
	),
	RuleSpec::new(
		"warning-close",
		RuleKind::Rename,
		r"</Warning>\s*",
		"\n:::\n\n",
		"</Warning>",
	),
	RuleSpec::new(
		"note-open",
		RuleKind::Rename,
		r"<Note>\s*",
		":::note\n\n",
		"<Note>",
	),
	RuleSpec::new(
		"note-close",
		RuleKind::Rename,
		r"</Note>\s*",
		"\n:::\n\n",
		"</Note>",
	),
	RuleSpec::new("tip-open", RuleKind::Rename, r"<Tip>\s*", ":::tip\n\n", "<Tip>"),
	RuleSpec::new(
		"tip-close",
		RuleKind::Rename,
		r"</Tip>\s*",
		"\n:::\n\n",
		"</Tip>",
	),
	RuleSpec::new(
		"info-open",
		RuleKind::Rename,
		r"<Info>\s*",
		":::info\n\n",
		"<Info>",
	),
	RuleSpec::new(
		"info-close",
		RuleKind::Rename,
		r"</Info>\s*",
		"\n:::\n\n",
		"</Info>",
	),
	RuleSpec::new(
		"param-field-open",
		RuleKind::Strip,
		r"<ParamField[^>]*>\s*",
		"",
		r#"<ParamField path="name" type="string">"#,
	),
	RuleSpec::new(
		"param-field-close",
		RuleKind::Strip,
		r"</ParamField>\s*",
		"\n",
		"</ParamField>",
	),
	RuleSpec::new(
		"expandable-open",
		RuleKind::Strip,
		r"<Expandable[^>]*>\s*",
		"",
		r#"<Expandable title="properties">"#,
	),
	RuleSpec::new(
		"expandable-close",
		RuleKind::Strip,
		r"</Expandable>\s*",
		"",
		"</Expandable>",
	),
	RuleSpec::new(
		"response-field-open",
		RuleKind::Strip,
		r"<ResponseField[^>]*>\s*",
		"",
		r#"<ResponseField name="status" type="string">"#,
	),
	RuleSpec::new(
		"response-field-close",
		RuleKind::Strip,
		r"</ResponseField>\s*",
		"\n",
		"</ResponseField>",
	),
	RuleSpec::new(
		"accordion-group-open",
		RuleKind::Strip,
		r"<AccordionGroup>\s*",
		"",
		"<AccordionGroup>",
	),
	RuleSpec::new(
		"accordion-group-close",
		RuleKind::Strip,
		r"</AccordionGroup>\s*",
		"",
		"</AccordionGroup>",
	),
	RuleSpec::new(
		"accordion-open",
		RuleKind::Restructure,
		r#"<Accordion title="([^"]+)">\s*"#,
		"### ${1}\n\n",
		r#"<Accordion title="Why?">"#,
	),
	RuleSpec::new(
		"accordion-close",
		RuleKind::Rename,
		r"</Accordion>\s*",
		"\n",
		"</Accordion>",
	),
	RuleSpec::new(
		"card-group-open",
		RuleKind::Strip,
		r"<CardGroup[^>]*>\s*",
		"",
		"<CardGroup cols={2}>",
	),
	RuleSpec::new(
		"card-group-close",
		RuleKind::Strip,
		r"</CardGroup>\s*",
		"",
		"</CardGroup>",
	),
	RuleSpec::new(
		"card-link",
		RuleKind::Restructure,
		r#"<Card\s+title="([^"]+)"[^>]*href="([^"]*)"[^>]*>\s*[^<]*</Card>"#,
		"- [${1}](${2})",
		r#"<Card title="VPC" href="/services/vpc">Networking</Card>"#,
	),
	RuleSpec::new(
		"card-open",
		RuleKind::Strip,
		r"<Card[^>]*>\s*",
		"",
		r#"<Card title="VPC" icon="network">"#,
	),
	RuleSpec::new(
		"card-close",
		RuleKind::Strip,
		r"</Card>\s*",
		"\n",
		"</Card>",
	),
];

/// Fixed identifier and extension renames, applied in order.
pub const STANDARD_LITERALS: &[LiteralRewrite] = &[
	LiteralRewrite {
		from: "infra.operator.aws.io",
		to: "aws-infra-operator.runner.codes",
	},
	LiteralRewrite {
		from: ".mdx)",
		to: ".md)",
	},
	LiteralRewrite {
		from: ".mdx]",
		to: ".md]",
	},
];

/// A compiled [`RuleSpec`].
#[derive(Debug, Clone)]
pub struct Rule {
	spec: RuleSpec,
	regex: Regex,
}

impl Rule {
	pub fn compile(spec: RuleSpec) -> DocportResult<Self> {
		let regex = Regex::new(spec.pattern).map_err(|e| {
			DocportError::InvalidRule {
				name: spec.name.to_string(),
				reason: e.to_string(),
			}
		})?;

		if !regex.is_match(spec.probe) {
			return Err(DocportError::InvalidRule {
				name: spec.name.to_string(),
				reason: format!("pattern does not match its probe `{}`", spec.probe),
			});
		}

		Ok(Self { spec, regex })
	}

	pub fn spec(&self) -> &RuleSpec {
		&self.spec
	}

	pub fn name(&self) -> &'static str {
		self.spec.name
	}

	pub fn is_match(&self, text: &str) -> bool {
		self.regex.is_match(text)
	}

	/// Rewrite every match in `text`. Returns the input untouched when the
	/// construct is absent.
	pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
		match self.spec.kind {
			RuleKind::Restructure => self.regex.replace_all(text, self.spec.replacement),
			RuleKind::Strip | RuleKind::Rename => {
				self.regex.replace_all(text, NoExpand(self.spec.replacement))
			}
		}
	}
}

/// The compiled, order-checked rule table plus the frontmatter policy.
#[derive(Debug, Clone)]
pub struct RuleTable {
	rules: Vec<Rule>,
	literals: Vec<LiteralRewrite>,
	policy: FieldPolicy,
	blank_lines: Regex,
}

impl RuleTable {
	/// Compile the built-in Mintlify to Docusaurus table.
	pub fn standard() -> DocportResult<Self> {
		Self::compile(STANDARD_RULES, STANDARD_LITERALS, FieldPolicy::STANDARD)
	}

	/// Compile a table and verify its ordering with [`RuleTable::check_order`].
	pub fn compile(
		specs: &[RuleSpec],
		literals: &[LiteralRewrite],
		policy: FieldPolicy,
	) -> DocportResult<Self> {
		let rules = specs
			.iter()
			.copied()
			.map(Rule::compile)
			.collect::<DocportResult<Vec<_>>>()?;
		let blank_lines = Regex::new(BLANK_LINE_RUN).map_err(|e| {
			DocportError::InvalidRule {
				name: "blank-lines".to_string(),
				reason: e.to_string(),
			}
		})?;

		let table = Self {
			rules,
			literals: literals.to_vec(),
			policy,
			blank_lines,
		};
		table.check_order()?;

		Ok(table)
	}

	/// Reject a table where an earlier rule matches the probe of a later one.
	///
	/// Such a pair means the earlier rule would eat the later rule's tags
	/// before it ever runs, e.g. a generic `<Card ...>` strip placed ahead of
	/// the `<CardGroup ...>` strip.
	pub fn check_order(&self) -> DocportResult<()> {
		for (index, later) in self.rules.iter().enumerate() {
			let shadowing = self.rules[..index]
				.iter()
				.find(|earlier| earlier.is_match(later.spec.probe));

			if let Some(earlier) = shadowing {
				return Err(DocportError::RuleOrder {
					earlier: earlier.name().to_string(),
					later: later.name().to_string(),
				});
			}
		}

		Ok(())
	}

	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn literals(&self) -> &[LiteralRewrite] {
		&self.literals
	}

	pub fn policy(&self) -> &FieldPolicy {
		&self.policy
	}

	/// Collapse every run of three or more line breaks to exactly two.
	pub fn collapse_blank_lines<'a>(&self, text: &'a str) -> Cow<'a, str> {
		self.blank_lines.replace_all(text, "\n\n")
	}
}
