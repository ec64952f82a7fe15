//! `docport_core` converts a Mintlify documentation tree into a Docusaurus
//! docs tree. Component tags become standard Markdown or `:::kind`
//! admonitions, frontmatter is reduced to the keys Docusaurus understands, and
//! every walked file receives a sidebar position from its place among its
//! siblings.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source tree
//!   → Tree migrator (explicit root mappings, then each content category)
//!   → Syntax transformer (ordered rule table, literal rewrites, blank-line collapse)
//!   → Frontmatter rewriter (allow-list + injected sidebar_position)
//!   → Destination tree
//! ```
//!
//! ## Modules
//!
//! - [`rules`]: The ordered rule table and the frontmatter field policy.
//! - [`config`]: The skip set, explicit mappings and content categories, optionally loaded from `docport.toml`.
//! - [`migrate`]: Planning and running a migration over a directory tree.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docport_core::MigrationConfig;
//! use docport_core::RuleTable;
//! use docport_core::migrate::migrate_tree;
//! use std::path::Path;
//!
//! let config = MigrationConfig::load_or_default(Path::new("docs")).unwrap();
//! let rules = RuleTable::standard().unwrap();
//! let report = migrate_tree(
//! 	&config,
//! 	&rules,
//! 	Path::new("docs"),
//! 	Path::new("docs/docusaurus/docs"),
//! )
//! .unwrap();
//! println!("{} file(s) migrated", report.migrated.len());
//! ```

pub use config::*;
pub use error::*;
pub use frontmatter::*;
pub use migrate::*;
pub use rules::*;
pub use transform::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod frontmatter;
pub mod migrate;
pub mod rules;
mod transform;
