use anyhow::Result;
use weave_core::{BuildReport, build_site, log};

use crate::config::WeaveConfig;

pub fn execute(config: &WeaveConfig) -> Result<()> {
    let report = build_site(&config.build)?;
    summarize(&report);

    Ok(())
}

/// Print the end-of-pass summary shared by one-shot and watch builds.
pub fn summarize(report: &BuildReport) {
    let warnings = report.diagnostics.len();
    if warnings == 0 {
        log!("build"; "{} partials loaded, {} pages written", report.partials.len(), report.pages.len());
    } else {
        log!(
            "build";
            "{} partials loaded, {} pages written, {} warnings",
            report.partials.len(),
            report.pages.len(),
            warnings
        );
    }
}
