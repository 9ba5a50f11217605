//! Route manifest: categories, flat routes and per-category navigation.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tome_mdx::{DEFAULT_ORDER, ParsedDocument, slugify};

use crate::error::BuildError;

/// Category for documents without a menu.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    #[schemars(length(min = 1))]
    pub path: String,
    pub id: String,
    pub title: String,
    /// Id of the owning category
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Artifact stem under `routes/`
    #[schemars(length(min = 1))]
    pub chunk: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[schemars(length(min = 1))]
    pub id: String,
    pub name: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub path: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSection {
    pub name: String,
    pub order: u32,
    pub routes: Vec<NavigationItem>,
}

/// The `routes.json` artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteManifest {
    pub routes: Vec<RouteEntry>,
    pub categories: Vec<Category>,
    /// Category id to its ordered route list
    pub navigation: IndexMap<String, NavigationSection>,
}

/// Artifact stem for a route: `components/inputs/button` -> `components__inputs__button`.
pub fn chunk_name(route: &str) -> String {
    route.replace('/', "__")
}

impl RouteManifest {
    /// Aggregate documents into a manifest.
    ///
    /// Categories appear in first-seen order, one per distinct name. Names
    /// sharing a slug share a navigation section and are reported by
    /// [`RouteManifest::validate`]. Routes keep input order; navigation lists
    /// are ordered by document `order`, then title.
    pub fn generate<'a>(documents: impl IntoIterator<Item = &'a ParsedDocument>) -> Self {
        let mut manifest = RouteManifest::default();
        let mut orders: IndexMap<String, Vec<(u32, String, NavigationItem)>> = IndexMap::new();

        for doc in documents {
            let name = doc.category().unwrap_or(UNCATEGORIZED);
            let category_id = slugify(name);

            if !manifest.categories.iter().any(|c| c.name == name) {
                manifest.categories.push(Category {
                    id: category_id.clone(),
                    name: name.to_string(),
                    order: DEFAULT_ORDER,
                });
            }
            if !manifest.navigation.contains_key(&category_id) {
                manifest.navigation.insert(
                    category_id.clone(),
                    NavigationSection {
                        name: name.to_string(),
                        order: DEFAULT_ORDER,
                        routes: Vec::new(),
                    },
                );
            }

            manifest.routes.push(RouteEntry {
                path: doc.meta.route.clone(),
                id: doc.meta.id.clone(),
                title: doc.meta.title.clone(),
                category: category_id.clone(),
                tags: doc.meta.tags.clone().unwrap_or_default(),
                chunk: chunk_name(&doc.meta.route),
            });

            orders.entry(category_id).or_default().push((
                doc.meta.order,
                doc.meta.title.clone(),
                NavigationItem {
                    path: doc.meta.route.clone(),
                    title: doc.meta.title.clone(),
                },
            ));
        }

        for (category_id, mut items) in orders {
            items.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
            if let Some(section) = manifest.navigation.get_mut(&category_id) {
                section.routes = items.into_iter().map(|(_, _, item)| item).collect();
            }
        }

        manifest
    }

    /// Check the manifest against its schema, route uniqueness and category references.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::ManifestInvalid` listing every failure.
    pub fn validate(&self) -> Result<(), BuildError> {
        let schema = serde_json::to_value(schemars::schema_for!(RouteManifest)).map_err(|e| {
            BuildError::Schema {
                name: "RouteManifest".to_string(),
                message: e.to_string(),
            }
        })?;
        let validator = jsonschema::validator_for(&schema).map_err(|e| BuildError::Schema {
            name: "RouteManifest".to_string(),
            message: e.to_string(),
        })?;
        let instance = serde_json::to_value(self).map_err(|e| BuildError::ManifestInvalid {
            details: e.to_string(),
        })?;

        let mut failures: Vec<String> = validator
            .iter_errors(&instance)
            .map(|e| format!("  - {}", e))
            .collect();

        let mut ids: HashMap<&str, &str> = HashMap::new();
        for category in &self.categories {
            if category.id.is_empty() {
                failures.push(format!(
                    "  - Menu category '{}' has no letters or digits to build an id from",
                    category.name
                ));
                continue;
            }
            if let Some(first) = ids.insert(category.id.as_str(), category.name.as_str()) {
                failures.push(format!(
                    "  - Menu categories '{}' and '{}' both map to id '{}'",
                    first, category.name, category.id
                ));
            }
        }

        let mut seen = HashSet::new();
        for route in &self.routes {
            if !seen.insert(route.path.as_str()) {
                failures.push(format!("  - Duplicate route '{}' (id: {})", route.path, route.id));
            }
            if !self.navigation.contains_key(&route.category) {
                failures.push(format!(
                    "  - Route '{}' references unknown category '{}'",
                    route.path, route.category
                ));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(BuildError::ManifestInvalid {
                details: failures.join("\n"),
            })
        }
    }
}
