//! Integration tests for warpack-core.
//!
//! These tests build real archives from project layouts on disk and read
//! them back.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;
use warpack_core::ArchiveKind;
use warpack_core::BuildConfig;
use warpack_core::WarError;
use warpack_core::assemble_war;
use warpack_core::build_war;
use warpack_core::compiler::compiler_for;
use warpack_core::config::load_build_config;

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn entry_names(archive: &Path) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(fs::File::open(archive).unwrap()).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

fn read_entry(archive: &Path, name: &str) -> String {
    let mut zip = zip::ZipArchive::new(fs::File::open(archive).unwrap()).unwrap();
    let mut content = String::new();
    zip.by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

fn config(root: &Path) -> BuildConfig {
    BuildConfig::new("myapp", "0.1.0", "myapp.core/handler", root).unwrap()
}

#[test]
fn test_minimal_project_layout() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "target/classes/myapp/servlet.class", "CAFEBABE");
    write_file(root, "resources/config.edn", "{:port 8080}");
    fs::create_dir_all(root.join("war-resources")).unwrap();

    let config = config(root);
    let report = assemble_war(&config).unwrap();

    let archive = root.join("target/myapp-0.1.0.war");
    assert_eq!(report.output_path, archive);
    assert_eq!(
        entry_names(&archive),
        vec![
            "META-INF/MANIFEST.MF",
            "WEB-INF/web.xml",
            "WEB-INF/classes/myapp/servlet.class",
            "WEB-INF/classes/config.edn",
        ]
    );
    assert_eq!(report.files_added, 2);
    assert_eq!(report.entry_count(), 4);
    assert!(!report.has_warnings());
}

#[test]
fn test_manifest_and_descriptor_contents() {
    let temp = TempDir::new().unwrap();
    let config = config(temp.path());
    assemble_war(&config).unwrap();

    let archive = config.archive_path();
    let manifest = read_entry(&archive, "META-INF/MANIFEST.MF");
    assert!(manifest.starts_with("Manifest-Version: 1.0\r\n"));
    assert!(manifest.contains("Created-By: warpack "));
    assert!(manifest.ends_with("\r\n\r\n"));

    let web_xml = read_entry(&archive, "WEB-INF/web.xml");
    assert!(web_xml.contains("<servlet-class>myapp.servlet</servlet-class>"));
    assert!(web_xml.contains("<url-pattern>/*</url-pattern>"));
}

#[test]
fn test_tree_order_and_static_resources_at_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "target/classes/a.class", "a");
    write_file(root, "src/myapp/core.clj", "(ns myapp.core)");
    write_file(root, "resources/log4j.properties", "x");
    write_file(root, "war-resources/index.html", "<html/>");
    write_file(root, "war-resources/css/site.css", "body{}");

    let config = config(root);
    assemble_war(&config).unwrap();

    assert_eq!(
        entry_names(&config.archive_path()),
        vec![
            "META-INF/MANIFEST.MF",
            "WEB-INF/web.xml",
            "WEB-INF/classes/a.class",
            "WEB-INF/classes/myapp/core.clj",
            "WEB-INF/classes/log4j.properties",
            "css/site.css",
            "index.html",
        ]
    );
}

#[test]
fn test_exclusions_apply_to_archive_paths() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "src/core.clj", "keep");
    write_file(root, "src/core.clj~", "backup");
    write_file(root, "src/.#core.clj", "lock");
    write_file(root, "src/.hidden/secret", "hidden");
    write_file(root, "war-resources/notes.bak", "bak");

    let rules = warpack_core::ExclusionRules::new(&[r"(^|/)\.", r"\.bak$"]).unwrap();
    let config = config(root).with_exclusions(rules);
    let report = assemble_war(&config).unwrap();

    let names = entry_names(&config.archive_path());
    assert!(names.contains(&"WEB-INF/classes/core.clj".to_string()));
    assert_eq!(names.len(), 3);
    assert_eq!(report.files_skipped, 4);
}

#[test]
fn test_duplicate_paths_first_wins() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "src/config.edn", "from-src");
    write_file(root, "resources/config.edn", "from-resources");

    let config = config(root);
    let report = assemble_war(&config).unwrap();

    let archive = config.archive_path();
    assert_eq!(read_entry(&archive, "WEB-INF/classes/config.edn"), "from-src");
    assert_eq!(report.duplicates_skipped, 1);
    assert!(report.has_warnings());
}

#[test]
fn test_identical_inputs_give_identical_bytes() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "target/classes/a.class", "a");
    write_file(root, "war-resources/index.html", "<html/>");

    let config = config(root);
    assemble_war(&config).unwrap();
    let first = fs::read(config.archive_path()).unwrap();
    assemble_war(&config).unwrap();
    let second = fs::read(config.archive_path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_uberwar_bundles_library_jars() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "lib/dep-1.0.jar", "jar");
    write_file(
        root,
        "warpack.toml",
        r#"
        [project]
        name = "myapp"
        version = "0.1.0"
        library-jars = ["lib/dep-1.0.jar"]

        [ring]
        handler = "myapp.core/handler"
        "#,
    );

    let config = load_build_config(&root.join("warpack.toml"), ArchiveKind::Uberwar).unwrap();
    let report = assemble_war(&config).unwrap();

    assert_eq!(
        report.output_path,
        root.join("target/myapp-0.1.0-standalone.war")
    );
    let names = entry_names(&report.output_path);
    assert_eq!(names.last().unwrap(), "WEB-INF/lib/dep-1.0.jar");
}

#[test]
fn test_war_ignores_library_jars() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "lib/dep-1.0.jar", "jar");

    let config = config(root).with_library_jars(vec![root.join("lib/dep-1.0.jar")]);
    assert_eq!(config.kind, ArchiveKind::War);

    let report = assemble_war(&config).unwrap();
    assert!(
        !entry_names(&report.output_path)
            .iter()
            .any(|n| n.starts_with("WEB-INF/lib/"))
    );
}

#[test]
fn test_custom_web_xml_written_verbatim() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let custom = "<web-app>\n  <!-- hand written -->\n</web-app>\n";
    write_file(root, "web.xml", custom);

    let config = config(root).with_web_xml_file(root.join("web.xml"));
    assemble_war(&config).unwrap();

    assert_eq!(read_entry(&config.archive_path(), "WEB-INF/web.xml"), custom);
}

#[test]
fn test_failed_build_leaves_no_archive() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "target/classes/a.class", "a");

    let config = config(root)
        .with_kind(ArchiveKind::Uberwar)
        .with_library_jars(vec![root.join("lib/missing.jar")]);
    let result = assemble_war(&config);

    assert!(matches!(result, Err(WarError::Io(_))));
    assert!(!config.archive_path().exists());
    let leftovers: Vec<_> = fs::read_dir(&config.target_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert!(leftovers.is_empty(), "staging file left behind: {leftovers:?}");
}

#[test]
fn test_target_dir_blocked_by_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "target", "not a directory");

    let result = assemble_war(&config(root));
    assert!(matches!(result, Err(WarError::TargetDir { .. })));
}

#[test]
fn test_invalid_exclusion_pattern_rejected_at_load() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(
        root,
        "warpack.toml",
        r#"
        [project]
        name = "myapp"
        version = "0.1.0"

        [ring]
        handler = "myapp.core/handler"
        war-exclusions = ["(unclosed"]
        "#,
    );

    let err = load_build_config(&root.join("warpack.toml"), ArchiveKind::War).unwrap_err();
    assert!(matches!(err, WarError::InvalidPattern { .. }));
}

#[cfg(unix)]
#[test]
fn test_compile_command_runs_before_assembly() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(
        root,
        "warpack.toml",
        r#"
        [project]
        name = "myapp"
        version = "0.1.0"

        [ring]
        handler = "myapp.core/handler"

        [build]
        compile-command = "mkdir -p target/classes/myapp && touch target/classes/myapp/servlet.class"
        "#,
    );

    let config = load_build_config(&root.join("warpack.toml"), ArchiveKind::War).unwrap();
    let report = build_war(&config, compiler_for(&config).as_ref()).unwrap();

    assert!(
        entry_names(&report.output_path)
            .contains(&"WEB-INF/classes/myapp/servlet.class".to_string())
    );
}

#[cfg(unix)]
#[test]
fn test_failing_compile_command_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let mut config = config(temp.path());
    config.compile_command = Some("false".into());

    let err = build_war(&config, compiler_for(&config).as_ref()).unwrap_err();
    assert!(matches!(err, WarError::CompileFailed { .. }));
    assert!(!config.target_dir.exists());
}

#[test]
fn test_unrepresentable_descriptor_text_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(
        root,
        "warpack.toml",
        r#"
        [project]
        name = "myapp"
        version = "0.1.0"

        [ring]
        handler = "myapp.core/handler"

        [ring.webxml]
        listeners = [{ listener-class = "a.\u0001L" }]
        "#,
    );
    write_file(root, "target/classes/a.class", "a");

    let config = load_build_config(&root.join("warpack.toml"), ArchiveKind::War).unwrap();
    let err = assemble_war(&config).unwrap_err();

    assert!(matches!(err, WarError::Descriptor { .. }));
    assert!(!config.archive_path().exists());
}

#[test]
fn test_project_root_as_static_resources_skips_own_output() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "index.html", "<html/>");

    let config = config(root)
        .with_war_resources_path(root)
        .with_exclusions(warpack_core::ExclusionRules::new(&[r"\.bak$"]).unwrap());
    assemble_war(&config).unwrap();
    let report = assemble_war(&config).unwrap();

    let names = entry_names(&report.output_path);
    assert!(names.contains(&"index.html".to_string()));
    assert!(!names.iter().any(|n| n.starts_with("target/")), "{names:?}");
}
