pub mod builder;
pub mod config;
pub mod expand;
pub mod logger;
pub mod params;
pub mod partials;
pub mod rewrite;

// Re-export main types
pub use builder::{BuildError, BuildReport, PageDiagnostic, SiteBuilder, build_site};
pub use config::BuildConfig;
pub use expand::{Diagnostic, Expander, Expansion};
pub use params::{Params, parse_params};
pub use partials::{PartialError, PartialStore};
pub use rewrite::{NavRewriter, Rewriter};
