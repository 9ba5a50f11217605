//! Build command implementation.

use crate::cli::BuildArgs;
use crate::commands::load_project;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::ui;
use std::time::Instant;

/// Execute the build command.
///
/// # Build Process
///
/// 1. Load and validate configuration (CLI > Env > File > Defaults)
/// 2. Run the batch pipeline
/// 3. Display warnings and the build summary
///
/// # Errors
///
/// Returns errors for invalid configuration, content validation failures,
/// an invalid route manifest and artifact write failures. A type extraction
/// failure is returned after the documentation artifacts are written.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    let paths = load_project(&ConfigOverrides::from(&args.project))?;
    ui::info(&format!("Building docs from {}", paths.content_dir.display()));

    let pipeline = Pipeline::new(paths)?;
    let report = pipeline.build(args.skip_cache).await?;

    if !report.issues.is_empty() {
        ui::print_issues(&report.issues);
    }
    ui::print_build_summary(&report.summary);

    if let Some(error) = report.types_error {
        ui::error("Component types were not extracted; documentation artifacts were written");
        return Err(error.into());
    }

    ui::success(&format!(
        "Build completed in {}",
        ui::format_duration(start_time.elapsed())
    ));
    Ok(())
}
