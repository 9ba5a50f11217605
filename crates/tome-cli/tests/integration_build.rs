//! Integration tests for batch builds.
//!
//! These tests run the full pipeline against a temporary monorepo.

mod common;

use common::Monorepo;
use std::fs;
use tome_cli::pipeline::Pipeline;
use tome_cli::{BuildError, CliError};

const BUTTON_ARTIFACT: &str = "routes/components__inputs__button.json";
const INTRO_ARTIFACT: &str = "routes/getting-started__introduction.json";

#[tokio::test]
async fn test_build_writes_all_artifacts() {
    let repo = Monorepo::new();
    let pipeline = Pipeline::new(repo.paths()).unwrap();

    let report = pipeline.build(false).await.unwrap();
    assert_eq!(report.summary.documents, 2);
    assert_eq!(report.summary.parsed, 2);
    assert_eq!(report.summary.reused, 0);
    assert_eq!(report.summary.components, 1);

    let button = repo.read_json(&repo.out(BUTTON_ARTIFACT));
    assert_eq!(button["meta"]["route"], "components/inputs/button");
    assert_eq!(button["meta"]["packageName"], "@acme/docs");
    assert_eq!(button["meta"]["path"], "packages/docs/content/button.mdx");
    let hrefs: Vec<_> = button["meta"]["toc"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["href"].as_str().unwrap())
        .collect();
    assert_eq!(hrefs, vec!["#usage", "#with-icon", "#accessibility"]);

    let docs = repo.read_json(&repo.out("docs.json"));
    assert!(docs.get("packages/docs/content/button.mdx").is_some());
    assert!(docs.get("packages/docs/content/introduction.mdx").is_some());

    let manifest = repo.read_json(&repo.out("routes.json"));
    let categories: Vec<_> = manifest["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["Components", "Getting Started"]);
    assert_eq!(manifest["navigation"]["components"]["routes"][0]["title"], "Button");

    let types = repo.read_json(&repo.out("component-types.json"));
    let button_type = &types["components"][0];
    assert_eq!(button_type["displayName"], "Button");
    assert_eq!(button_type["props"]["variant"]["defaultValue"], "\"solid\"");
    assert_eq!(button_type["supportsStyleProps"], true);

    assert!(repo.path(".tome/build-cache.json").exists());
}

#[tokio::test]
async fn test_second_build_reuses_cached_documents() {
    let repo = Monorepo::new();
    Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();

    let report = Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();
    assert_eq!(report.summary.parsed, 0);
    assert_eq!(report.summary.reused, 2);
    assert_eq!(report.summary.documents, 2);

    // The aggregate is still complete
    let docs = repo.read_json(&repo.out("docs.json"));
    assert_eq!(docs.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_changed_document_is_reparsed() {
    let repo = Monorepo::new();
    Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();

    repo.write(
        "packages/docs/content/introduction.mdx",
        &common::INTRO_DOC.replace("Welcome", "Hello"),
    );
    let report = Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();
    assert_eq!(report.summary.parsed, 1);
    assert_eq!(report.summary.reused, 1);

    let intro = repo.read_json(&repo.out(INTRO_ARTIFACT));
    assert!(intro["mdx"].as_str().unwrap().starts_with("Hello"));
}

#[tokio::test]
async fn test_deleted_output_forces_rebuild() {
    let repo = Monorepo::new();
    Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();

    fs::remove_file(repo.out(BUTTON_ARTIFACT)).unwrap();
    let report = Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();

    assert_eq!(report.summary.parsed, 1);
    assert_eq!(report.summary.reused, 1);
    assert!(repo.out(BUTTON_ARTIFACT).exists());
}

#[tokio::test]
async fn test_skip_cache_parses_everything() {
    let repo = Monorepo::new();
    Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();

    let report = Pipeline::new(repo.paths()).unwrap().build(true).await.unwrap();
    assert_eq!(report.summary.parsed, 2);
    assert_eq!(report.summary.reused, 0);
}

#[tokio::test]
async fn test_removed_source_is_pruned() {
    let repo = Monorepo::new();
    Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();
    assert!(repo.out(INTRO_ARTIFACT).exists());

    fs::remove_file(repo.doc("introduction.mdx")).unwrap();
    let report = Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();
    assert_eq!(report.summary.documents, 1);

    let docs = repo.read_json(&repo.out("docs.json"));
    assert!(docs.get("packages/docs/content/introduction.mdx").is_none());
    assert!(!repo.out(INTRO_ARTIFACT).exists());

    let cache = repo.read_json(&repo.path(".tome/build-cache.json"));
    assert!(cache["files"].get("packages/docs/content/introduction.mdx").is_none());
    assert!(cache["files"].get("packages/docs/content/button.mdx").is_some());
}

#[tokio::test]
async fn test_missing_id_fails_the_build() {
    let repo = Monorepo::new();
    repo.write(
        "packages/docs/content/broken.mdx",
        "---\ntitle: Broken\nmenu: [Guides, Broken]\n---\nBody\n",
    );

    let result = Pipeline::new(repo.paths()).unwrap().build(false).await;
    match result {
        Err(CliError::Build(BuildError::ValidationFailed { errors })) => assert!(errors >= 1),
        other => panic!("expected ValidationFailed, got {:?}", other.map(|r| r.summary)),
    }

    // Nothing was written
    assert!(!repo.out("docs.json").exists());
    assert!(!repo.out("routes.json").exists());
}

#[tokio::test]
async fn test_duplicate_routes_fail_the_build() {
    let repo = Monorepo::new();
    repo.write(
        "packages/docs/content/button-copy.mdx",
        &common::BUTTON_DOC.replace("id: button", "id: button-copy"),
    );

    let result = Pipeline::new(repo.paths()).unwrap().build(false).await;
    assert!(matches!(
        result,
        Err(CliError::Build(BuildError::ManifestInvalid { .. }))
    ));
    assert!(!repo.out("routes.json").exists());
}

#[tokio::test]
async fn test_type_extraction_failure_is_reported_after_outputs() {
    let repo = Monorepo::new();
    repo.write("packages/ui/src/button.tsx", "export function Button( {\n");

    let report = Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();
    assert!(matches!(report.types_error, Some(BuildError::TypeExtraction(_))));
    assert_eq!(report.summary.components, 0);
    assert_eq!(report.summary.documents, 2);
    assert!(!repo.out("component-types.json").exists());
    assert!(repo.out("routes.json").exists());
    assert!(repo.path(".tome/build-cache.json").exists());
}

#[tokio::test]
async fn test_unparseable_edit_keeps_last_good_output() {
    let repo = Monorepo::new();
    Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();

    repo.write("packages/docs/content/button.mdx", "---\nid: [unclosed\n---\n");
    let report = Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.summary.kept, 1);
    assert_eq!(report.summary.documents, 2);

    assert!(repo.out(BUTTON_ARTIFACT).exists());
    let docs = repo.read_json(&repo.out("docs.json"));
    assert_eq!(docs["packages/docs/content/button.mdx"]["meta"]["title"], "Button");
    let cache = repo.read_json(&repo.path(".tome/build-cache.json"));
    assert!(cache["files"].get("packages/docs/content/button.mdx").is_some());

    // Fixing the source parses it again
    repo.write(
        "packages/docs/content/button.mdx",
        &common::BUTTON_DOC.replace("title: Button", "title: Button Fixed"),
    );
    let report = Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();
    assert_eq!(report.summary.parsed, 1);
    assert_eq!(report.summary.kept, 0);
    let artifact = repo.read_json(&repo.out(BUTTON_ARTIFACT));
    assert_eq!(artifact["meta"]["title"], "Button Fixed");
}

#[tokio::test]
async fn test_route_collision_leaves_existing_artifact_alone() {
    let repo = Monorepo::new();
    Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();

    let copy = common::BUTTON_DOC.replace("id: button", "id: button-v2");
    repo.write("packages/docs/content/button-v2.mdx", &copy);
    let result = Pipeline::new(repo.paths()).unwrap().build(false).await;
    assert!(matches!(
        result,
        Err(CliError::Build(BuildError::ManifestInvalid { .. }))
    ));
    let artifact = repo.read_json(&repo.out(BUTTON_ARTIFACT));
    assert_eq!(artifact["meta"]["path"], "packages/docs/content/button.mdx");

    repo.write(
        "packages/docs/content/button-v2.mdx",
        &copy.replace("  - Button\n", "  - Button v2\n"),
    );
    let report = Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();
    assert_eq!(report.summary.documents, 3);

    let docs = repo.read_json(&repo.out("docs.json"));
    assert_eq!(docs["packages/docs/content/button.mdx"]["meta"]["id"], "button");
    assert_eq!(docs["packages/docs/content/button-v2.mdx"]["meta"]["id"], "button-v2");
}

#[tokio::test]
async fn test_artifact_of_another_document_is_not_restored() {
    let repo = Monorepo::new();
    Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();

    fs::copy(repo.out(INTRO_ARTIFACT), repo.out(BUTTON_ARTIFACT)).unwrap();
    let report = Pipeline::new(repo.paths()).unwrap().build(false).await.unwrap();
    assert_eq!(report.summary.parsed, 1);
    assert_eq!(report.summary.reused, 1);

    let docs = repo.read_json(&repo.out("docs.json"));
    assert_eq!(docs.as_object().unwrap().len(), 2);
    let artifact = repo.read_json(&repo.out(BUTTON_ARTIFACT));
    assert_eq!(artifact["meta"]["path"], "packages/docs/content/button.mdx");
}

#[tokio::test]
async fn test_documents_outside_content_dir_are_ignored() {
    let repo = Monorepo::new();
    repo.write("packages/docs/content/node_modules/pkg/readme.mdx", common::INTRO_DOC);
    repo.write("packages/docs/README.mdx", common::INTRO_DOC);

    let pipeline = Pipeline::new(repo.paths()).unwrap();
    assert_eq!(pipeline.enumerate_documents().len(), 2);
}
