use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::sync::mpsc::Receiver;
use weave_core::{BuildConfig, build_site, log};

use crate::cmd::build::summarize;
use crate::config::WeaveConfig;

pub async fn execute(config: &WeaveConfig) -> Result<()> {
    // The first pass fails hard, e.g. on a missing source directory
    let report = build_site(&config.build)?;
    summarize(&report);

    watch_source_files(config).await
}

async fn watch_source_files(config: &WeaveConfig) -> Result<()> {
    let source_dir = config.build.source.canonicalize()?;

    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut debouncer = new_debouncer(
        Duration::from_millis(config.watch.debounce_ms),
        move |res: DebounceEventResult| match res {
            Ok(events) => {
                for event in events {
                    let _ = tx.blocking_send(event.path);
                }
            }
            Err(e) => log!("error"; "watch error: {e}"),
        },
    )?;

    debouncer
        .watcher()
        .watch(&source_dir, RecursiveMode::Recursive)?;
    log!("watch"; "watching {} for changes...", source_dir.display());

    // One consumer, so builds never overlap. Whatever queued up while a
    // build was running is handled by a single trailing rebuild.
    while let Some(path) = rx.recv().await {
        let changed: Vec<PathBuf> = drain_burst(path, &mut rx)
            .into_iter()
            .filter(|p| is_page_change(p, &config.build))
            .collect();

        let Some(first) = changed.first() else {
            continue;
        };
        match changed.len() {
            1 => log!("watch"; "file changed: {}", first.display()),
            n => log!("watch"; "{n} files changed, starting with {}", first.display()),
        }

        match build_site(&config.build) {
            Ok(report) => summarize(&report),
            Err(e) => log!("error"; "build failed: {e}"),
        }
    }

    Ok(())
}

/// Collect `first` plus every path already waiting in the channel.
fn drain_burst(first: PathBuf, rx: &mut Receiver<PathBuf>) -> Vec<PathBuf> {
    let mut paths = vec![first];
    while let Ok(path) = rx.try_recv() {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// A page-extension file under the source root, outside the output tree
/// when the output tree lives inside the source root.
fn is_page_change(path: &Path, build: &BuildConfig) -> bool {
    let is_page = path
        .extension()
        .is_some_and(|ext| ext == build.extension.as_str());
    if !is_page {
        return false;
    }

    let path = canonical(path);
    let source = canonical(&build.source);
    let output = canonical(&build.output);

    let in_nested_output = output != source && output.starts_with(&source) && path.starts_with(&output);
    path.starts_with(&source) && !in_nested_output
}

/// Canonical form of `path`, falling back to the parent for removed files.
fn canonical(path: &Path) -> PathBuf {
    if let Ok(abs) = path.canonicalize() {
        return abs;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
