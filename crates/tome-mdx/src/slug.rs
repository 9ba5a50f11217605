//! Slugs for routes and heading anchors.

use std::collections::HashMap;

/// Lowercase `text` and collapse every run of non-alphanumeric characters
/// into a single `-`, trimming dashes at both ends.
///
/// ```
/// use tome_mdx::slug::slugify;
///
/// assert_eq!(slugify("Form Controls"), "form-controls");
/// assert_eq!(slugify("  Date / Time  "), "date-time");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Derive a document route from its menu path.
///
/// Segments are slugified independently and joined with `/`; segments that
/// slugify to nothing are dropped.
pub fn route_from_menu<S: AsRef<str>>(menu: &[S]) -> String {
    menu.iter()
        .map(|segment| slugify(segment.as_ref()))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Generates GitHub-style heading anchors, suffixing repeats with `-1`, `-2`...
#[derive(Debug, Default)]
pub struct AnchorSlugger {
    seen: HashMap<String, usize>,
}

impl AnchorSlugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, text: &str) -> String {
        let base = github_slug(text);
        match self.seen.get_mut(&base) {
            Some(count) => {
                *count += 1;
                format!("{}-{}", base, count)
            }
            None => {
                self.seen.insert(base.clone(), 0);
                base
            }
        }
    }
}

/// GitHub anchor rules: lowercase, keep alphanumerics, `-` and `_`, turn
/// spaces into `-`, strip everything else.
fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            slug.push(c);
        } else if c == ' ' {
            slug.push('-');
        }
    }
    slug
}
