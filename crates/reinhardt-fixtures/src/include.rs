//! Association include specifications.
//!
//! An [`IncludeSpec`] describes which associated records are pulled into a
//! fixture export alongside the root records:
//!
//! ```yaml
//! # follow `posts`, then collect the `comments` of every post,
//! # and collect the `books` of the root record as well
//! - posts: comments
//! - books
//! ```

use std::fmt;

use serde::Deserialize;

use crate::error::{FixtureError, FixtureResult};

/// Which associations to follow when exporting fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_yaml::Value")]
pub enum IncludeSpec {
	/// Collect the records of a single association.
	Leaf(String),

	/// Apply every element to the same starting records.
	Sequence(Vec<IncludeSpec>),

	/// Collect the records of `association`, then apply `nested` starting from them.
	FollowThen {
		/// Association to follow.
		association: String,
		/// Specification applied to the followed records.
		nested: Box<IncludeSpec>,
	},
}

impl IncludeSpec {
	/// Creates a leaf specification.
	pub fn leaf(association: impl Into<String>) -> Self {
		Self::Leaf(association.into())
	}

	/// Creates a sequence of sibling specifications.
	pub fn sequence<I, S>(specs: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<IncludeSpec>,
	{
		Self::Sequence(specs.into_iter().map(Into::into).collect())
	}

	/// Creates a follow-then-recurse specification.
	pub fn follow(association: impl Into<String>, nested: impl Into<IncludeSpec>) -> Self {
		Self::FollowThen {
			association: association.into(),
			nested: Box::new(nested.into()),
		}
	}

	/// Parses a specification from a YAML value.
	///
	/// Strings become leaves, sequences become [`IncludeSpec::Sequence`], and
	/// a mapping becomes one [`IncludeSpec::FollowThen`] per key, wrapped in a
	/// sequence when the mapping has more than one key. Any other shape is an
	/// [`FixtureError::InvalidSpecification`].
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_fixtures::include::IncludeSpec;
	/// let value: serde_yaml::Value = serde_yaml::from_str("posts: comments").unwrap();
	/// assert_eq!(
	///     IncludeSpec::from_yaml(&value).unwrap(),
	///     IncludeSpec::follow("posts", "comments")
	/// );
	/// ```
	pub fn from_yaml(value: &serde_yaml::Value) -> FixtureResult<Self> {
		use serde_yaml::Value;

		match value {
			Value::String(name) => Ok(Self::leaf(name.as_str())),
			Value::Sequence(items) => items
				.iter()
				.map(Self::from_yaml)
				.collect::<FixtureResult<Vec<_>>>()
				.map(Self::Sequence),
			Value::Mapping(mapping) => {
				let mut follows = mapping
					.iter()
					.map(|(key, nested)| -> FixtureResult<Self> {
						let association = key.as_str().ok_or_else(|| {
							FixtureError::InvalidSpecification(format!(
								"association name must be a string, got {}",
								describe_yaml(key)
							))
						})?;
						Ok(Self::follow(association, Self::from_yaml(nested)?))
					})
					.collect::<FixtureResult<Vec<_>>>()?;
				if follows.len() == 1 {
					Ok(follows.remove(0))
				} else {
					Ok(Self::Sequence(follows))
				}
			}
			Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
			other => Err(FixtureError::InvalidSpecification(describe_yaml(other))),
		}
	}

	/// Parses a specification from a JSON value.
	///
	/// Follows the same rules as [`IncludeSpec::from_yaml`]. JSON objects are
	/// visited in key order.
	pub fn from_json(value: &serde_json::Value) -> FixtureResult<Self> {
		use serde_json::Value;

		match value {
			Value::String(name) => Ok(Self::leaf(name.as_str())),
			Value::Array(items) => items
				.iter()
				.map(Self::from_json)
				.collect::<FixtureResult<Vec<_>>>()
				.map(Self::Sequence),
			Value::Object(object) => {
				let mut follows = object
					.iter()
					.map(|(association, nested)| -> FixtureResult<Self> {
						Ok(Self::follow(association.as_str(), Self::from_json(nested)?))
					})
					.collect::<FixtureResult<Vec<_>>>()?;
				if follows.len() == 1 {
					Ok(follows.remove(0))
				} else {
					Ok(Self::Sequence(follows))
				}
			}
			other => Err(FixtureError::InvalidSpecification(other.to_string())),
		}
	}

	/// Parses a specification from YAML text.
	pub fn parse(content: &str) -> FixtureResult<Self> {
		let value: serde_yaml::Value = serde_yaml::from_str(content)?;
		Self::from_yaml(&value)
	}

	/// Returns every association name mentioned in the specification.
	pub fn associations(&self) -> Vec<&str> {
		let mut names = Vec::new();
		self.collect_associations(&mut names);
		names
	}

	fn collect_associations<'a>(&'a self, names: &mut Vec<&'a str>) {
		match self {
			Self::Leaf(name) => names.push(name),
			Self::Sequence(specs) => {
				for spec in specs {
					spec.collect_associations(names);
				}
			}
			Self::FollowThen {
				association,
				nested,
			} => {
				names.push(association);
				nested.collect_associations(names);
			}
		}
	}
}

fn describe_yaml(value: &serde_yaml::Value) -> String {
	use serde_yaml::Value;

	match value {
		Value::Null => "null".to_string(),
		Value::Bool(b) => format!("boolean {}", b),
		Value::Number(n) => format!("number {}", n),
		Value::String(s) => format!("string {:?}", s),
		Value::Sequence(_) => "sequence".to_string(),
		Value::Mapping(_) => "mapping".to_string(),
		Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
	}
}

impl TryFrom<serde_yaml::Value> for IncludeSpec {
	type Error = FixtureError;

	fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
		Self::from_yaml(&value)
	}
}

impl TryFrom<serde_json::Value> for IncludeSpec {
	type Error = FixtureError;

	fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
		Self::from_json(&value)
	}
}

impl From<&str> for IncludeSpec {
	fn from(association: &str) -> Self {
		Self::leaf(association)
	}
}

impl From<String> for IncludeSpec {
	fn from(association: String) -> Self {
		Self::Leaf(association)
	}
}

impl<S: Into<IncludeSpec>> From<Vec<S>> for IncludeSpec {
	fn from(specs: Vec<S>) -> Self {
		Self::sequence(specs)
	}
}

impl fmt::Display for IncludeSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Leaf(name) => write!(f, "{}", name),
			Self::Sequence(specs) => {
				write!(f, "[")?;
				for (idx, spec) in specs.iter().enumerate() {
					if idx > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}", spec)?;
				}
				write!(f, "]")
			}
			Self::FollowThen {
				association,
				nested,
			} => write!(f, "{{{}: {}}}", association, nested),
		}
	}
}
