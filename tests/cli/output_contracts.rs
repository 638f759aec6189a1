use std::fs;
use tempfile::TempDir;
use termfolio::config::TermfolioConfig;
use termfolio::error::ApiError;
use termfolio::tooling::cli::{CliContext, Commands, SourceArgs};
use termfolio::views::{ContentTrust, RenderMode};

fn context() -> CliContext {
    CliContext::from_config(TermfolioConfig::default())
}

fn site() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("Docs")).unwrap();
    fs::write(temp.path().join("Docs/resume"), "Hello").unwrap();
    fs::write(temp.path().join("readme"), "").unwrap();
    temp
}

fn build(site: &TempDir, out: &TempDir) -> std::path::PathBuf {
    let output = out.path().join("fileTree.json");
    context()
        .execute(&Commands::Build {
            source: site.path().to_path_buf(),
            output: output.clone(),
        })
        .unwrap();
    output
}

#[test]
fn build_reports_summary_and_writes_document() {
    let site = site();
    let out = TempDir::new().unwrap();
    let output = out.path().join("fileTree.json");
    let summary = context()
        .execute(&Commands::Build {
            source: site.path().to_path_buf(),
            output: output.clone(),
        })
        .unwrap();
    assert!(summary.contains("2 folders, 2 files"), "summary: {summary}");
    assert!(output.exists());
}

#[test]
fn check_prints_stats_as_json() {
    let site = site();
    let out = TempDir::new().unwrap();
    let tree = build(&site, &out);
    let json = context()
        .execute(&Commands::Check {
            tree,
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["folders"], 2);
    assert_eq!(value["files"], 2);
    assert_eq!(value["executables"], 0);
}

#[test]
fn check_rejects_unknown_format() {
    let site = site();
    let out = TempDir::new().unwrap();
    let tree = build(&site, &out);
    let err = context()
        .execute(&Commands::Check {
            tree,
            format: "yaml".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn exec_renders_plain_transcript() {
    let site = site();
    let out = TempDir::new().unwrap();
    let tree = build(&site, &out);
    let transcript = context()
        .execute(&Commands::Exec {
            origin: SourceArgs {
                tree: Some(tree),
                ..SourceArgs::default()
            },
            render: Some(RenderMode::Plain),
            content_trust: Some(ContentTrust::Trusted),
            lines: vec![
                "ls".to_string(),
                "cd Docs".to_string(),
                "cat resume".to_string(),
            ],
        })
        .unwrap();
    assert_eq!(
        transcript,
        "/Home$ ls\nreadme  Docs/\n/Home$ cd Docs\n/Home/Docs$ cat resume\nHello"
    );
}

#[test]
fn exec_stops_at_exit() {
    let site = site();
    let transcript = context()
        .execute(&Commands::Exec {
            origin: SourceArgs {
                source: Some(site.path().to_path_buf()),
                ..SourceArgs::default()
            },
            render: Some(RenderMode::Plain),
            content_trust: None,
            lines: vec!["help".to_string(), "exit".to_string(), "ls".to_string()],
        })
        .unwrap();
    assert!(transcript.contains("Commands:"));
    assert!(!transcript.contains("$ ls"));
}

#[test]
fn exec_against_missing_document_reports_per_command() {
    let out = TempDir::new().unwrap();
    let transcript = context()
        .execute(&Commands::Exec {
            origin: SourceArgs {
                tree: Some(out.path().join("absent.json")),
                ..SourceArgs::default()
            },
            render: Some(RenderMode::Plain),
            content_trust: None,
            lines: vec!["ls".to_string()],
        })
        .unwrap();
    assert!(transcript.contains("Error: File system unavailable"), "{transcript}");
}

#[test]
fn exec_html_escapes_echoed_command() {
    let site = site();
    let transcript = context()
        .execute(&Commands::Exec {
            origin: SourceArgs {
                source: Some(site.path().to_path_buf()),
                ..SourceArgs::default()
            },
            render: Some(RenderMode::Html),
            content_trust: None,
            lines: vec!["<script>".to_string()],
        })
        .unwrap();
    assert!(transcript.contains("&lt;script&gt;"));
    assert!(transcript.contains("<span class=\"error\">Error: Command not found: <script></span>"));
}

#[test]
fn exec_names_missing_file_and_missing_directory() {
    let site = site();
    let out = TempDir::new().unwrap();
    let tree = build(&site, &out);
    let transcript = context()
        .execute(&Commands::Exec {
            origin: SourceArgs {
                tree: Some(tree),
                ..SourceArgs::default()
            },
            render: Some(RenderMode::Plain),
            content_trust: None,
            lines: vec!["cat nofile".to_string(), "cd nodir".to_string()],
        })
        .unwrap();
    assert_eq!(
        transcript,
        "/Home$ cat nofile\nError: No such file: nofile\n/Home$ cd nodir\nError: No such directory: nodir"
    );
}
