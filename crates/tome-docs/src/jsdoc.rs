/// A tag that has no dedicated field, e.g. `@default` or `@see`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsDocTag {
    pub tag: String,
    pub type_hint: Option<String>,
    pub description: Option<String>,
}

/// Structured representation of a parsed JSDoc comment.
#[derive(Debug, Default, Clone)]
pub struct ParsedJsDoc {
    /// Summary text before any tags.
    pub summary: Option<String>,
    /// Deprecated message from `@deprecated`.
    pub deprecated: Option<String>,
    /// Example snippets collected from `@example`.
    pub examples: Vec<String>,
    /// Arbitrary tags that were not converted into typed fields.
    pub tags: Vec<JsDocTag>,
    /// Whether the comment contained `@internal`.
    pub is_internal: bool,
}

impl ParsedJsDoc {
    /// Value of the `@default` (or `@defaultValue`) tag, if present.
    pub fn default_value(&self) -> Option<String> {
        self.tags
            .iter()
            .find(|tag| tag.tag == "default" || tag.tag == "defaultValue")
            .and_then(|tag| tag.description.clone().or_else(|| tag.type_hint.clone()))
    }
}

/// Parse a JSDoc block (without comment delimiters) into structured data.
///
/// The parser handles the tags prop documentation uses and keeps everything
/// else as generic tags.
pub fn parse_jsdoc(raw: &str) -> ParsedJsDoc {
    let mut summary_lines = Vec::new();
    let mut deprecated = None;
    let mut examples = Vec::new();
    let mut tags = Vec::new();
    let mut is_internal = false;

    let lines = normalize_lines(raw);
    let mut idx = 0;
    while idx < lines.len() {
        let line = &lines[idx];

        if let Some(rest) = line.strip_prefix('@') {
            let (tag, payload) = split_tag_payload(rest);
            match tag {
                "deprecated" => {
                    let value = payload.trim();
                    deprecated = Some(if value.is_empty() {
                        "Deprecated".to_string()
                    } else {
                        value.to_string()
                    });
                }
                "example" => {
                    let mut example_lines = Vec::new();
                    if !payload.trim().is_empty() {
                        example_lines.push(payload.trim().to_string());
                    }
                    while idx + 1 < lines.len() && !lines[idx + 1].starts_with('@') {
                        idx += 1;
                        let peek = &lines[idx];
                        if !peek.is_empty() || !example_lines.is_empty() {
                            example_lines.push(peek.to_string());
                        }
                    }
                    let example = example_lines.join("\n").trim().to_string();
                    if !example.is_empty() {
                        examples.push(example);
                    }
                }
                "internal" => {
                    is_internal = true;
                }
                other => tags.push(parse_generic_tag(other, payload)),
            }
        } else {
            summary_lines.push(line.to_string());
        }

        idx += 1;
    }

    ParsedJsDoc {
        summary: compose_summary(summary_lines),
        deprecated,
        examples,
        tags,
        is_internal,
    }
}

fn parse_generic_tag(tag: &str, payload: &str) -> JsDocTag {
    let mut parsed = JsDocTag {
        tag: tag.to_string(),
        type_hint: None,
        description: None,
    };
    let payload = payload.trim();
    if let Some(rest) = payload.strip_prefix('{') {
        // `{type}` prefix
        if let Some((ty, rest)) = rest.split_once('}') {
            if !ty.trim().is_empty() {
                parsed.type_hint = Some(ty.trim().to_string());
            }
            if !rest.trim().is_empty() {
                parsed.description = Some(rest.trim().to_string());
            }
            return parsed;
        }
    }
    if !payload.is_empty() {
        parsed.description = Some(payload.to_string());
    }
    parsed
}

fn normalize_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim().to_string()
        })
        .collect()
}

fn compose_summary(lines: Vec<String>) -> Option<String> {
    let summary = lines
        .into_iter()
        .skip_while(|line| line.trim().is_empty())
        .collect::<Vec<_>>();
    let joined = summary.join(" ").trim().to_string();
    (!joined.is_empty()).then_some(joined)
}

fn split_tag_payload(input: &str) -> (&str, &str) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let tag = parts.next().unwrap_or("");
    let payload = parts.next().unwrap_or("").trim();
    (tag, payload)
}
