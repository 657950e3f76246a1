//! Blog schema used across integration tests.
//!
//! Tables:
//!
//! - `authors` has many `posts`, has one `profile`, and has and belongs to
//!   many `books` through `authors_books`
//! - `posts` belongs to an `author` and has many `comments`
//! - `comments` belongs to a `post`
//! - `books` has and belongs to many `authors` through `authors_books`
//! - `vehicles` uses single table inheritance through `type`

#![allow(dead_code)]

use std::path::Path;

use reinhardt_fixtures::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// Builds the blog store with no rows.
pub fn empty_blog_store() -> MemoryStore {
	let store = MemoryStore::new();
	store.create_table(
		TableSchema::new("authors")
			.column("name")
			.has_many("posts", "posts", "author_id")
			.has_one("profile", "profiles", "author_id")
			.has_and_belongs_to_many("books", "books", "authors_books", "author_id", "book_id"),
	);
	store.create_table(
		TableSchema::new("posts")
			.column("title")
			.column("author_id")
			.belongs_to("author", "authors", "author_id")
			.has_many("comments", "comments", "post_id"),
	);
	store.create_table(
		TableSchema::new("comments")
			.column("body")
			.column("post_id")
			.belongs_to("post", "posts", "post_id"),
	);
	store.create_table(TableSchema::new("profiles").column("bio").column("author_id"));
	store.create_table(
		TableSchema::new("books")
			.column("title")
			.has_and_belongs_to_many("authors", "authors", "authors_books", "book_id", "author_id"),
	);
	store.create_table(
		TableSchema::new("vehicles")
			.column("name")
			.column_with_default("wheels", json!(4))
			.column("type"),
	);
	store
}

/// Builds the blog store with the shared rows.
///
/// - authors 1 (Ada) and 2 (Grace)
/// - posts 1 and 2 by Ada, post 3 by Grace
/// - comments 1 and 2 on post 1, comment 3 on post 3
/// - profile 1 for Ada
/// - books 1 and 2, three `authors_books` rows
pub fn blog_store() -> MemoryStore {
	let store = empty_blog_store();
	for name in ["Ada", "Grace"] {
		store.create("authors", [("name", json!(name))]).unwrap();
	}
	for (title, author) in [("Engines", 1), ("Notes", 1), ("Compilers", 2)] {
		store
			.create("posts", [("title", json!(title)), ("author_id", json!(author))])
			.unwrap();
	}
	for (body, post) in [("First", 1), ("Second", 1), ("Third", 3)] {
		store
			.create("comments", [("body", json!(body)), ("post_id", json!(post))])
			.unwrap();
	}
	store
		.create("profiles", [("bio", json!("Analyst")), ("author_id", json!(1))])
		.unwrap();
	for title in ["Sketch", "Manual"] {
		store.create("books", [("title", json!(title))]).unwrap();
	}
	for (author, book) in [(1, 1), (1, 2), (2, 2)] {
		store
			.insert_join_row(
				"authors_books",
				[("author_id", json!(author)), ("book_id", json!(book))],
			)
			.unwrap();
	}
	store
}

/// Creates a temporary project with `db/` and `test/fixtures/` directories.
pub fn project_dir() -> TempDir {
	let dir = tempfile::tempdir().unwrap();
	std::fs::create_dir_all(dir.path().join("db")).unwrap();
	std::fs::create_dir_all(dir.path().join("test/fixtures")).unwrap();
	dir
}

/// Reads a fixture file written under `test/fixtures/`.
pub fn read_fixture(root: &Path, table: &str) -> FixtureTable {
	FixtureParser::new()
		.parse_table_file(&root.join("test/fixtures").join(format!("{}.yml", table)))
		.unwrap()
		.unwrap_or_default()
}
