//! Watch command implementation.

use crate::cli::WatchArgs;
use crate::commands::load_project;
use crate::config::ConfigOverrides;
use crate::dev::{FileWatcher, WatchSession};
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::ui;

/// Execute the watch command.
///
/// Runs an initial build, then processes file changes until Ctrl+C. Build
/// failures are reported but never stop the session.
pub async fn execute(args: WatchArgs) -> Result<()> {
    let overrides = ConfigOverrides::from(&args.project).with_debounce(args.debounce_ms);
    let paths = load_project(&overrides)?;
    let pipeline = Pipeline::new(paths)?;

    match pipeline.build(false).await {
        Ok(report) => {
            if !report.issues.is_empty() {
                ui::print_issues(&report.issues);
            }
            ui::success(&format!(
                "Initial build: {} documents",
                report.summary.documents
            ));
            if let Some(e) = report.types_error {
                ui::warning(&format!("Component types not extracted: {}", e));
            }
        }
        Err(e) => ui::error(&format!("Initial build failed: {}", e)),
    }

    let paths = pipeline.paths();
    let (watcher, events) = FileWatcher::new(paths.root.clone(), paths.ignore.clone())?;
    ui::info(&format!(
        "Watching {} (Ctrl+C to stop)",
        watcher.root().display()
    ));

    let mut session = WatchSession::new(pipeline);
    session
        .run(events, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    ui::success(&format!(
        "Stopped after {} aggregate write(s)",
        session.write_count()
    ));
    Ok(())
}
