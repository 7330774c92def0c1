mod support;

use std::path::PathBuf;

use tempfile::TempDir;

use metaimport_core::Error;
use metaimport_core::doclink::{self, Provider};
use metaimport_core::git::{GitFetcher, RepoSpec, Snapshot};
use metaimport_core::resolver::UnitPath;
use metaimport_core::site::{BuildOptions, FsPageWriter, PageWriter, SiteBuilder};
use support::git::FixtureRepo;

const PREFIX: &str = "example.org/repo";
const REPO: &str = "https://github.com/user/repo";

fn snapshot(files: &[&str]) -> Snapshot {
    Snapshot {
        commit: "0".repeat(40),
        files: files.iter().map(|f| f.to_string()).collect(),
    }
}

/// Records pages in memory and optionally fails on a given unit.
#[derive(Default)]
struct RecordingWriter {
    pages: Vec<(String, String)>,
    fail_on: Option<String>,
}

impl PageWriter for RecordingWriter {
    fn write_page(
        &mut self,
        unit: &UnitPath,
        import_path: &str,
        contents: &str,
    ) -> metaimport_core::Result<PathBuf> {
        if self.fail_on.as_deref() == Some(unit.as_str()) {
            return Err(Error::Write {
                unit: unit.to_string(),
                path: PathBuf::from(import_path),
                source: std::io::Error::other("disk full"),
            });
        }
        self.pages
            .push((import_path.to_string(), contents.to_string()));
        Ok(PathBuf::from(import_path))
    }
}

#[test]
fn builds_one_page_per_package() {
    let temp = TempDir::new().unwrap();
    let mut writer = FsPageWriter::new(temp.path().join("html"));
    let builder = SiteBuilder::new(BuildOptions::new(PREFIX, REPO));

    let report = builder
        .build(
            &snapshot(&[
                "main.go",
                "sub/lib.go",
                "sub/testdata/fixture.go",
                "sub/_hidden.go",
            ]),
            &mut writer,
        )
        .unwrap();

    let units: Vec<&str> = report.pages.iter().map(|p| p.unit.as_str()).collect();
    assert_eq!(units, vec!["", "sub"]);
    assert_eq!(report.provider, None);

    let root_page = temp.path().join("html/example.org/repo/index.html");
    let sub_page = temp.path().join("html/example.org/repo/sub/index.html");
    assert!(root_page.exists());
    assert!(sub_page.exists());
    assert!(!temp.path().join("html/example.org/repo/sub/testdata").exists());

    let sub_html = std::fs::read_to_string(sub_page).unwrap();
    assert!(sub_html.contains(
        "<meta name=\"go-import\" content=\"example.org/repo git https://github.com/user/repo\">"
    ));
    assert!(sub_html.contains("https://godoc.org/example.org/repo/sub"));
    assert!(!sub_html.contains("go-source"));
}

#[test]
fn every_page_carries_root_import_prefix() {
    let mut writer = RecordingWriter::default();
    let builder = SiteBuilder::new(BuildOptions::new(PREFIX, REPO));

    builder
        .build(&snapshot(&["a/a.go", "a/b/b.go", "c/c.go"]), &mut writer)
        .unwrap();

    assert_eq!(writer.pages.len(), 3);
    for (import_path, html) in &writer.pages {
        assert!(import_path.starts_with("example.org/repo/"));
        assert!(html.contains("content=\"example.org/repo git "));
        assert!(!html.contains(&format!("content=\"{} git", import_path)));
    }
}

#[test]
fn doc_links_add_go_source_tags() {
    let mut writer = RecordingWriter::default();
    let strategy = doclink::select(REPO, Some("dev"), Some("main"));
    let builder = SiteBuilder::new(BuildOptions::new(PREFIX, REPO).with_redirect(false))
        .with_doc_links(strategy);

    let report = builder.build(&snapshot(&["main.go"]), &mut writer).unwrap();

    assert_eq!(report.provider, Some(Provider::GitHub));
    let html = &writer.pages[0].1;
    assert!(html.contains(
        "<meta name=\"go-source\" content=\"example.org/repo _ \
         https://github.com/user/repo/tree/dev{/dir} \
         https://github.com/user/repo/tree/dev{/dir}/{file}#L{line}\">"
    ));
    assert!(!html.contains("http-equiv"));
    assert!(html.contains("Repository: <a href=\"https://github.com/user/repo\">"));
}

#[test]
fn docs_base_url_is_configurable() {
    let mut writer = RecordingWriter::default();
    let builder = SiteBuilder::new(
        BuildOptions::new(PREFIX, REPO).with_docs_base_url("https://pkg.go.dev/"),
    );

    builder.build(&snapshot(&["x/x.go"]), &mut writer).unwrap();

    assert!(writer.pages[0]
        .1
        .contains("url='https://pkg.go.dev/example.org/repo/x'"));
}

#[test]
fn collision_is_rejected_before_writing() {
    let temp = TempDir::new().unwrap();
    let mut writer = FsPageWriter::new(temp.path().join("html"));
    let builder = SiteBuilder::new(BuildOptions::new(PREFIX, REPO));

    let err = builder
        .build(&snapshot(&["a/a.go", "a/index.html/b.go"]), &mut writer)
        .unwrap_err();

    assert!(matches!(err, Error::OutputCollision { .. }));
    assert!(!temp.path().join("html").exists());
}

#[test]
fn write_failure_aborts_the_build() {
    let mut writer = RecordingWriter {
        fail_on: Some("b".to_string()),
        ..RecordingWriter::default()
    };
    let builder = SiteBuilder::new(BuildOptions::new(PREFIX, REPO));

    let err = builder
        .build(&snapshot(&["a/a.go", "b/b.go", "c/c.go"]), &mut writer)
        .unwrap_err();

    match err {
        Error::Write { unit, .. } => assert_eq!(unit, "b"),
        other => panic!("unexpected error: {other}"),
    }
    // Units are processed in sorted order; nothing after the failure is written.
    assert_eq!(writer.pages.len(), 1);
    assert_eq!(writer.pages[0].0, "example.org/repo/a");
}

#[test]
fn listing_failure_aborts_the_build() {
    let mut writer = RecordingWriter::default();
    let builder = SiteBuilder::new(BuildOptions::new(PREFIX, REPO));
    let listing = vec![
        Ok("a.go".to_string()),
        Err(Error::snapshot_read("connection reset")),
    ];

    let err = builder.build_from_listing(listing, &mut writer).unwrap_err();

    assert!(matches!(err, Error::SnapshotRead(_)));
    assert!(writer.pages.is_empty());
}

#[test]
fn fetched_repository_end_to_end() {
    let fixture = FixtureRepo::new(&[
        ("main.go", "package main\n"),
        ("sub/lib.go", "package sub\n"),
        ("sub/testdata/fixture.go", "package fixture\n"),
        ("sub/_hidden.go", "package sub\n"),
        (".github/tool.go", "package tool\n"),
    ]);
    let temp = TempDir::new().unwrap();
    let fetcher = GitFetcher::new(temp.path().join("state"));
    let fetched = fetcher.fetch(&RepoSpec::new(fixture.url())).unwrap();

    let strategy = doclink::select(
        &fixture.url(),
        None,
        fetched.default_branch.as_deref(),
    );
    assert_eq!(strategy.provider(), Provider::Default);

    let mut writer = FsPageWriter::new(temp.path().join("html"));
    let report = SiteBuilder::new(BuildOptions::new(PREFIX, fixture.url()))
        .with_doc_links(strategy)
        .build(&fetched.snapshot, &mut writer)
        .unwrap();

    let units: Vec<&str> = report.pages.iter().map(|p| p.unit.as_str()).collect();
    assert_eq!(units, vec!["", "sub"]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["import_prefix"], PREFIX);
    assert_eq!(json["provider"], "default");
    assert_eq!(json["pages"][1]["import_path"], "example.org/repo/sub");
}
