//! Fixture file integration tests: merging into existing files, skeletons
//! and configured directories.

use helpers::blog_store::{blog_store, project_dir, read_fixture};
use reinhardt_fixtures::prelude::*;
use rstest::*;
use serde_json::json;

#[path = "helpers.rs"]
mod helpers;

#[rstest]
fn test_keep_current_fixtures_preserves_hand_written_entries() {
	// Arrange
	let dir = project_dir();
	let config = FixtureConfig::new(dir.path());
	let store = blog_store();
	std::fs::write(
		dir.path().join("test/fixtures/posts.yml"),
		"draft:\n  id: 900\n  title: Draft\n  author_id: 2\npost_00001:\n  id: 1\n  title: Outdated\n",
	)
	.unwrap();

	// Act
	store
		.fixtures("authors", &config)
		.to_fixture(
			ToFixtureOptions::new()
				.with_condition("name", json!("Ada"))
				.with_include("posts")
				.with_keep_current_fixtures(true),
		)
		.unwrap();

	// Assert
	let posts = read_fixture(dir.path(), "posts");
	assert_eq!(
		posts.keys().collect::<Vec<_>>(),
		vec!["draft", "post_00001", "post_00002"]
	);
	assert_eq!(posts["post_00001"]["title"], json!("Engines"));
	assert_eq!(posts["draft"]["title"], json!("Draft"));
}

#[rstest]
fn test_keep_current_fixtures_resolves_merge_keys() {
	// Arrange
	let dir = project_dir();
	let config = FixtureConfig::new(dir.path());
	let store = blog_store();
	std::fs::write(
		dir.path().join("test/fixtures/authors.yml"),
		"guest: &guest\n  id: 50\n  name: Guest\nsecond_guest:\n  <<: *guest\n  id: 51\n",
	)
	.unwrap();

	// Act
	store
		.fixtures("authors", &config)
		.to_fixture(ToFixtureOptions::new().with_limit(1).with_keep_current_fixtures(true))
		.unwrap();

	// Assert
	let authors = read_fixture(dir.path(), "authors");
	assert_eq!(authors.len(), 3);
	assert!(!authors["second_guest"].contains_key("<<"));
	assert_eq!(authors["second_guest"]["name"], json!("Guest"));
	assert_eq!(authors["second_guest"]["id"], json!(51));
}

#[rstest]
fn test_merge_accumulates_across_exports() {
	// Arrange
	let dir = project_dir();
	let config = FixtureConfig::new(dir.path());
	let store = blog_store();
	let table = store.fixtures("authors", &config);

	// Act
	for name in ["Ada", "Grace"] {
		table
			.to_fixture(
				ToFixtureOptions::new()
					.with_condition("name", json!(name))
					.with_keep_current_fixtures(true),
			)
			.unwrap();
	}

	// Assert
	assert_eq!(read_fixture(dir.path(), "authors").len(), 2);
}

#[rstest]
fn test_join_tables_are_not_merged() {
	// Arrange
	let dir = project_dir();
	let config = FixtureConfig::new(dir.path());
	let store = blog_store();
	std::fs::write(
		dir.path().join("test/fixtures/authors_books.yml"),
		"join_00009:\n  author_id: 9\n  book_id: 9\n",
	)
	.unwrap();

	// Act
	store
		.fixtures("authors", &config)
		.to_fixture(ToFixtureOptions::new().with_keep_current_fixtures(true))
		.unwrap();

	// Assert
	let join = read_fixture(dir.path(), "authors_books");
	assert_eq!(join.len(), 3);
	assert!(!join.contains_key("join_00009"));
}

#[rstest]
fn test_skeleton_lists_columns_with_defaults() {
	// Arrange
	let dir = project_dir();
	let config = FixtureConfig::new(dir.path());
	let store = blog_store();

	// Act
	let path = store.fixtures("vehicles", &config).to_skeleton().unwrap();

	// Assert
	assert_eq!(
		std::fs::read_to_string(path).unwrap(),
		"record_1:\n  name: null\n  type: null\n  wheels: 4\nrecord_2:\n  name: null\n  type: null\n  wheels: 4\n"
	);
}

#[rstest]
fn test_configured_directories_from_toml() {
	// Arrange
	let dir = tempfile::tempdir().unwrap();
	std::fs::create_dir_all(dir.path().join("spec/fixtures")).unwrap();
	std::fs::create_dir_all(dir.path().join("data")).unwrap();
	let config_path = dir.path().join("fixtures.toml");
	std::fs::write(
		&config_path,
		"project_root = \".\"\nfixtures_dir = \"spec/fixtures\"\ndata_dir = \"data\"\n",
	)
	.unwrap();
	let config = FixtureConfig::from_file(&config_path).unwrap();
	let store = blog_store();

	// Act
	let table = store.fixtures("books", &config);
	let dump = table.dump_to_file(None, None).unwrap();
	let skeleton = table.to_skeleton().unwrap();

	// Assert
	assert_eq!(dump.path, dir.path().join("data/books.yml"));
	assert_eq!(skeleton, dir.path().join("spec/fixtures/books.yml"));
}

#[rstest]
fn test_missing_fixture_directory_fails() {
	let dir = tempfile::tempdir().unwrap();
	let config = FixtureConfig::new(dir.path());
	let store = blog_store();

	let result = store.fixtures("books", &config).to_skeleton();

	assert!(matches!(result, Err(FixtureError::Io(_))));
}
