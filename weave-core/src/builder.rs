use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::BuildConfig;
use crate::expand::{Diagnostic, Expander};
use crate::log;
use crate::partials::{PartialError, PartialStore, has_extension};
use crate::rewrite::{NavRewriter, Rewriter};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("source directory not found: {}", .0.display())]
    MissingSourceDir(PathBuf),
    #[error(transparent)]
    Partials(#[from] PartialError),
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("failed to read page {}: {source}", .path.display())]
    ReadPage {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    WritePage {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A diagnostic together with the page that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDiagnostic {
    pub page: PathBuf,
    pub diagnostic: Diagnostic,
}

/// Outcome of one build pass.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Partial names, sorted
    pub partials: Vec<String>,
    /// Written pages relative to the output root, in walk order
    pub pages: Vec<PathBuf>,
    pub diagnostics: Vec<PageDiagnostic>,
}

pub struct SiteBuilder<R = NavRewriter> {
    config: BuildConfig,
    rewriter: R,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self::from_config(BuildConfig::default())
    }

    pub fn from_config(config: BuildConfig) -> Self {
        Self {
            config,
            rewriter: NavRewriter,
        }
    }
}

impl<R: Rewriter> SiteBuilder<R> {
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.source = path.as_ref().to_path_buf();
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.output = path.as_ref().to_path_buf();
        self
    }

    /// Name of the partials directory inside the source root.
    pub fn partials_dir<S: Into<String>>(mut self, name: S) -> Self {
        self.config.partials = name.into();
        self
    }

    pub fn extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.config.extension = extension.into();
        self
    }

    /// Swap the post-processing applied to inlined partials.
    pub fn rewriter<T: Rewriter>(self, rewriter: T) -> SiteBuilder<T> {
        SiteBuilder {
            config: self.config,
            rewriter,
        }
    }

    /// Run a full pass: load partials, expand every page, write the output tree.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let source = &self.config.source;
        if !source.is_dir() {
            return Err(BuildError::MissingSourceDir(source.clone()));
        }

        let partials = PartialStore::load(self.config.partials_dir(), &self.config.extension)?;
        let names: Vec<String> = partials.names().map(str::to_string).collect();
        log!("build"; "loaded {} partials: {}", names.len(), names.join(", "));

        let pages = self.scan_pages()?;
        log!("build"; "found {} pages to process", pages.len());

        let expander = Expander::new(&partials, &self.rewriter);
        let mut diagnostics = Vec::new();

        for page in &pages {
            let src_path = source.join(page);
            let out_path = self.config.output.join(page);

            let content = std::fs::read_to_string(&src_path).map_err(|source| BuildError::ReadPage {
                path: src_path.clone(),
                source,
            })?;

            let expansion = expander.expand(&content);
            for diagnostic in expansion.diagnostics {
                log!("warn"; "{}: {diagnostic}", page.display());
                diagnostics.push(PageDiagnostic {
                    page: page.clone(),
                    diagnostic,
                });
            }

            write_page(&out_path, &expansion.text)?;
            log!("build"; "✓ {}", page.display());
        }

        Ok(BuildReport {
            partials: names,
            pages,
            diagnostics,
        })
    }

    /// Pages under the source root, relative to it, sorted by file name.
    ///
    /// Every directory named like the partials directory is skipped, and so
    /// is the output root when it lives inside the source root.
    pub fn scan_pages(&self) -> Result<Vec<PathBuf>, BuildError> {
        let source = &self.config.source;
        let nested_output = self.nested_output();
        let mut pages = Vec::new();

        let walker = WalkDir::new(source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                entry.file_name().to_string_lossy() != self.config.partials
                    && nested_output.as_deref() != Some(entry.path())
            });

        for entry in walker {
            let entry = entry.map_err(|err| BuildError::Walk {
                path: err.path().unwrap_or(source.as_path()).to_path_buf(),
                source: err,
            })?;

            if !entry.file_type().is_file() || !has_extension(entry.path(), &self.config.extension) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(source)
                .unwrap_or(entry.path())
                .to_path_buf();
            pages.push(relative);
        }

        Ok(pages)
    }

    /// The output root spelled as a path under the source root, when the
    /// output tree is nested in the source tree.
    fn nested_output(&self) -> Option<PathBuf> {
        let source = self.config.source.canonicalize().ok()?;
        let output = self.config.output.canonicalize().ok()?;
        if output == source {
            return None;
        }
        let relative = output.strip_prefix(&source).ok()?;
        Some(self.config.source.join(relative))
    }
}

fn write_page(path: &Path, html: &str) -> Result<(), BuildError> {
    let err = |source: std::io::Error| BuildError::WritePage {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(err)?;
    }
    std::fs::write(path, html).map_err(err)
}

/// Build with the stock navigation rewriter.
pub fn build_site(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    let report = SiteBuilder::from_config(config.clone()).build()?;
    log!("build"; "build complete! {} files generated", report.pages.len());
    Ok(report)
}
