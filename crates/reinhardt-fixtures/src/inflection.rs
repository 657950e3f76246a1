//! English noun inflection for table names.
//!
//! Only singularization is needed: fixture entries are named after the
//! singular form of their table (`authors` → `author_00007`).

/// Words with identical singular and plural forms.
const UNCOUNTABLE: &[&str] = &[
	"equipment",
	"fish",
	"information",
	"jeans",
	"money",
	"news",
	"police",
	"rice",
	"series",
	"sheep",
	"species",
];

/// Plural → singular pairs that no suffix rule covers.
const IRREGULAR: &[(&str, &str)] = &[
	("children", "child"),
	("feet", "foot"),
	("geese", "goose"),
	("men", "man"),
	("mice", "mouse"),
	("moves", "move"),
	("people", "person"),
	("sexes", "sex"),
	("teeth", "tooth"),
	("women", "woman"),
];

/// Suffix rules, tried in order. The first matching suffix is replaced.
const SUFFIX_RULES: &[(&str, &str)] = &[
	("octopuses", "octopus"),
	("octopi", "octopus"),
	("viruses", "virus"),
	("virii", "virus"),
	("databases", "database"),
	("quizzes", "quiz"),
	("matrices", "matrix"),
	("vertices", "vertex"),
	("indices", "index"),
	("aliases", "alias"),
	("statuses", "status"),
	("buses", "bus"),
	("oxen", "ox"),
	("analyses", "analysis"),
	("theses", "thesis"),
	("crises", "crisis"),
	("movies", "movie"),
	("ies", "y"),
	("xes", "x"),
	("ches", "ch"),
	("shes", "sh"),
	("sses", "ss"),
	("hives", "hive"),
	("tives", "tive"),
	("lves", "lf"),
	("rves", "rf"),
	("knives", "knife"),
	("wives", "wife"),
	("eaves", "eaf"),
	("ives", "ive"),
	("ves", "ve"),
	("ss", "ss"),
	("us", "us"),
	("is", "is"),
	("s", ""),
];

/// Returns the singular form of a table name.
///
/// Multi-word `snake_case` names only inflect their last word
/// (`blog_posts` → `blog_post`). Names already singular are returned unchanged.
///
/// Rules cover regular English plurals and a fixed list of irregular ones.
/// Plurals outside those lists (`curves` gives `curf`) fall through to the
/// nearest suffix rule.
///
/// # Example
///
/// ```
/// # use reinhardt_fixtures::inflection::singularize;
/// assert_eq!(singularize("authors"), "author");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("blog_people"), "blog_person");
/// ```
pub fn singularize(word: &str) -> String {
	match word.rsplit_once('_') {
		Some((head, last)) if !last.is_empty() => format!("{}_{}", head, singularize_word(last)),
		_ => singularize_word(word),
	}
}

fn singularize_word(word: &str) -> String {
	if !word.is_ascii() {
		return word.to_string();
	}
	let lower = word.to_ascii_lowercase();

	if UNCOUNTABLE.contains(&lower.as_str()) {
		return word.to_string();
	}

	if let Some((plural, singular)) = IRREGULAR.iter().find(|(plural, _)| lower.ends_with(plural)) {
		let prefix_len = lower.len() - plural.len();
		return format!("{}{}", &word[..prefix_len], singular);
	}

	for (suffix, replacement) in SUFFIX_RULES {
		if lower.ends_with(suffix) && (lower.len() > suffix.len() || !replacement.is_empty()) {
			let prefix_len = lower.len() - suffix.len();
			return format!("{}{}", &word[..prefix_len], replacement);
		}
	}

	word.to_string()
}
