//! Template expansion applied to fixture files before YAML decoding.
//!
//! Fixture files may contain Tera expressions, evaluated once when the file
//! is read:
//!
//! ```yaml
//! - id: 1
//!   name: "{{ admin_name }}"
//!   score: {{ 40 + 2 }}
//! ```

use std::borrow::Cow;

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::FixtureResult;

const TEMPLATE_DELIMITERS: [&str; 3] = ["{{", "{%", "{#"];

/// Expands Tera templates with a caller supplied context.
#[derive(Debug, Clone, Default)]
pub struct TemplateExpander {
	context: Context,
}

impl TemplateExpander {
	/// Creates an expander with an empty context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a variable to the template context.
	pub fn with_var<T: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
		self.context.insert(name, value);
		self
	}

	/// Adds a variable to the template context in place.
	pub fn insert<T: Serialize + ?Sized>(&mut self, name: impl Into<String>, value: &T) {
		self.context.insert(name, value);
	}

	/// Renders `content`. Output is not HTML-escaped.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_fixtures::template::TemplateExpander;
	/// let expander = TemplateExpander::new().with_var("name", "Ada");
	/// assert_eq!(expander.expand("name: {{ name }}").unwrap(), "name: Ada");
	/// ```
	pub fn expand(&self, content: &str) -> FixtureResult<String> {
		Ok(Tera::one_off(content, &self.context, false)?)
	}

	/// Protects `content` so that [`TemplateExpander::expand`] returns it
	/// unchanged.
	///
	/// Content without template delimiters is returned as is. Otherwise it is
	/// wrapped in a `raw` block, and every `{%` inside is emitted through an
	/// expression so the data cannot close the block early.
	///
	/// # Example
	///
	/// ```
	/// # use reinhardt_fixtures::template::TemplateExpander;
	/// let data = "body: Use {{ title }} here\n";
	/// let escaped = TemplateExpander::escape(data);
	/// assert_eq!(TemplateExpander::new().expand(&escaped).unwrap(), data);
	/// ```
	pub fn escape(content: &str) -> Cow<'_, str> {
		if !TEMPLATE_DELIMITERS
			.iter()
			.any(|delimiter| content.contains(delimiter))
		{
			return Cow::Borrowed(content);
		}
		let body = content.replace("{%", "{% endraw %}{{ \"{%\" }}{% raw %}");
		Cow::Owned(format!("{{% raw %}}{}{{% endraw %}}", body))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FixtureError;
	use rstest::rstest;

	#[rstest]
	fn test_plain_content_unchanged() {
		let content = "- id: 1\n  name: Ada\n";
		assert_eq!(TemplateExpander::new().expand(content).unwrap(), content);
	}

	#[rstest]
	fn test_expressions() {
		let expander = TemplateExpander::new().with_var("count", &3);
		let output = expander
			.expand("total: {{ count * 2 }}\n{% for i in range(end=count) %}- {{ i }}\n{% endfor %}")
			.unwrap();
		assert_eq!(output, "total: 6\n- 0\n- 1\n- 2\n");
	}

	#[rstest]
	fn test_no_html_escaping() {
		let expander = TemplateExpander::new().with_var("body", "<b>&</b>");
		assert_eq!(expander.expand("{{ body }}").unwrap(), "<b>&</b>");
	}

	#[rstest]
	fn test_undefined_variable_fails() {
		let result = TemplateExpander::new().expand("{{ missing }}");
		assert!(matches!(result, Err(FixtureError::Template(_))));
	}

	#[rstest]
	fn test_escape_leaves_plain_content() {
		let content = "- id: 1\n  name: Ada\n";
		assert!(matches!(TemplateExpander::escape(content), Cow::Borrowed(_)));
	}

	#[rstest]
	#[case("body: Use {{ title }} in your layout\n")]
	#[case("body: '{% if admin %}yes{% endif %}'\n")]
	#[case("note: '{# draft #}'\n")]
	#[case("tag: '{% endraw %}'\nother: '{%- endraw -%}'\n")]
	fn test_escaped_content_expands_unchanged(#[case] content: &str) {
		let expander = TemplateExpander::new().with_var("title", "ignored");
		let escaped = TemplateExpander::escape(content);
		assert_eq!(expander.expand(&escaped).unwrap(), content);
	}

	#[rstest]
	fn test_insert_in_place() {
		let mut expander = TemplateExpander::new();
		expander.insert("name", "Grace");
		assert_eq!(expander.expand("{{ name }}").unwrap(), "Grace");
	}
}
