use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;
use weave_core::{BuildConfig, Diagnostic, PageDiagnostic, build_site};

const NAV: &str = r#"<header>
    <nav class="nav">
        <a class="nav__link" href="/">Home</a>
        <a class="nav__link" href="/results/">Results</a>
    </nav>
    <div class="mobile-menu">
        <a href="/" class="nav__link">Home</a>
        <a href="/results/" class="nav__link">Results</a>
    </div>
</header>
"#;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

fn setup() -> (TempDir, BuildConfig) {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    write(&src, "partials/nav.html", NAV);
    write(&src, "partials/footer.html", "<footer>fade-in</footer>");
    write(&src, "partials/orphan.html", "<p>only a fragment</p>");
    write(
        &src,
        "index.html",
        "<body>\n{{> nav activeNav=\"home\" }}\n<main class=\"fade-in\"></main>\n{{> footer }}\n</body>\n",
    );
    write(&src, "results/index.html", "{{> nav activeNav=\"results\" }}");
    write(&src, "sub/dir/page.html", "{{> nav activeNav=\"unknownvalue\" }}");
    write(&src, "plain.html", "<p class=\"nav__link--active open\">{ untouched }</p>\n");
    write(&src, "broken.html", "before {{> missing activeNav=\"home\" }} after");
    write(&src, "assets/site.css", ".nav__link {}");

    let config = BuildConfig {
        source: src,
        output: tmp.path().join("public"),
        ..BuildConfig::default()
    };
    (tmp, config)
}

fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, std::fs::read(e.path()).unwrap())
        })
        .collect()
}

fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn builds_mirrored_tree() {
    let (_tmp, config) = setup();
    let report = build_site(&config).unwrap();

    assert_eq!(report.partials, vec!["footer", "nav", "orphan"]);
    assert_eq!(
        report.pages,
        vec![
            PathBuf::from("broken.html"),
            PathBuf::from("index.html"),
            PathBuf::from("plain.html"),
            PathBuf::from("results/index.html"),
            PathBuf::from("sub/dir/page.html"),
        ]
    );
    assert!(config.output.join("sub/dir/page.html").is_file());
    assert!(!config.output.join("partials").exists());
    assert!(!config.output.join("orphan.html").exists());
    assert!(!config.output.join("assets/site.css").exists());
}

#[test]
fn active_nav_marks_desktop_and_mobile_links() {
    let (_tmp, config) = setup();
    build_site(&config).unwrap();

    let index = read(&config.output, "index.html");
    assert!(index.contains(r#"<a class="nav__link nav__link--active" href="/">Home</a>"#));
    assert!(index.contains(r#"<a href="/" class="nav__link nav__link--active">Home</a>"#));
    assert!(index.contains(r#"<a class="nav__link" href="/results/">Results</a>"#));
    assert!(index.contains(r#"<a href="/results/" class="nav__link">Results</a>"#));
    assert!(index.contains("<main class=\"fade-in\"></main>\n<footer>fade-in</footer>\n</body>\n"));

    let results = read(&config.output, "results/index.html");
    assert_eq!(results.matches("nav__link nav__link--active").count(), 2);
    assert!(results.contains(r#"<a class="nav__link" href="/">Home</a>"#));
}

#[test]
fn unknown_active_nav_inlines_partial_verbatim() {
    let (_tmp, config) = setup();
    build_site(&config).unwrap();

    assert_eq!(read(&config.output, "sub/dir/page.html"), NAV);
}

#[test]
fn page_without_placeholders_is_copied_verbatim() {
    let (_tmp, config) = setup();
    build_site(&config).unwrap();

    assert_eq!(
        read(&config.output, "plain.html"),
        read(&config.source, "plain.html")
    );
}

#[test]
fn missing_partial_keeps_placeholder_and_reports() {
    let (_tmp, config) = setup();
    let report = build_site(&config).unwrap();

    assert_eq!(
        read(&config.output, "broken.html"),
        "before {{> missing activeNav=\"home\" }} after"
    );
    assert_eq!(
        report.diagnostics,
        vec![PageDiagnostic {
            page: PathBuf::from("broken.html"),
            diagnostic: Diagnostic::PartialNotFound {
                name: "missing".to_string()
            },
        }]
    );
}

#[test]
fn rebuilding_is_idempotent() {
    let (_tmp, config) = setup();
    build_site(&config).unwrap();
    let first = snapshot(&config.output);

    build_site(&config).unwrap();
    let second = snapshot(&config.output);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn stale_output_is_overwritten() {
    let (_tmp, config) = setup();
    write(&config.output, "plain.html", "stale and much longer than the real page");
    build_site(&config).unwrap();

    assert_eq!(
        read(&config.output, "plain.html"),
        read(&config.source, "plain.html")
    );
}

#[test]
fn builds_without_partials_directory() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    write(&src, "index.html", "{{> nav }}");

    let config = BuildConfig {
        source: src,
        output: tmp.path().to_path_buf(),
        ..BuildConfig::default()
    };
    let report = build_site(&config).unwrap();

    assert!(report.partials.is_empty());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(read(tmp.path(), "index.html"), "{{> nav }}");
}

#[test]
fn missing_source_root_fails() {
    let tmp = TempDir::new().unwrap();
    let config = BuildConfig {
        source: tmp.path().join("src"),
        output: tmp.path().join("out"),
        ..BuildConfig::default()
    };

    let err = build_site(&config).unwrap_err();
    assert!(err.to_string().contains("source directory not found"));
    assert!(!config.output.exists());
}

#[test]
fn rebuilding_into_nested_output_is_idempotent() {
    let (_tmp, mut config) = setup();
    config.output = config.source.join("public");

    let first_report = build_site(&config).unwrap();
    let first = snapshot(&config.output);
    let second_report = build_site(&config).unwrap();
    let second = snapshot(&config.output);

    assert_eq!(first_report.pages, second_report.pages);
    assert_eq!(first, second);
    assert!(!config.output.join("public").exists());
}
