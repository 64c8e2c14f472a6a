use incdep::core::{AnalyzerOptions, CodebaseAnalyzer};
use incdep::formatters::TreeFormatter;
use std::fs;
use std::path::Path;

fn write<P: AsRef<Path>>(p: P, content: &str) {
    let p = p.as_ref();
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, content).unwrap();
}

#[test]
fn tree_report_shows_markers_and_sorted_counts() {
    let dir = tempfile::TempDir::new().unwrap();
    let base = dir.path().canonicalize().unwrap();
    let root = base.join("project");
    let search = base.join("include");
    write(
        root.join("a.hpp"),
        "#include \"b.hpp\"\n#include <lib.hpp>\n#include <vendor.hpp>\n",
    );
    write(root.join("b.hpp"), "#include \"a.hpp\"\n");
    write(search.join("vendor.hpp"), "");

    let report = CodebaseAnalyzer::new(
        AnalyzerOptions::new().with_include_dirs(vec![search.clone()]),
    )
    .analyze(&root)
    .unwrap();
    let text = TreeFormatter::new().format_report(&report);

    let expected = format!(
        "\
a.hpp
  b.hpp
    a.hpp (cycle)
  lib.hpp (unresolved)
  vendor.hpp [{search}]
b.hpp
  a.hpp
    b.hpp (cycle)
    lib.hpp (unresolved)
    vendor.hpp [{search}]

a.hpp 2
b.hpp 2
lib.hpp 2
vendor.hpp 2
",
        search = search.display()
    );
    assert_eq!(text, expected);
}

#[test]
fn tree_report_writes_to_file_with_custom_indent() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(root.join("main.cpp"), "#include \"x.hpp\"\n");
    write(root.join("x.hpp"), "");

    let report = CodebaseAnalyzer::default().analyze(&root).unwrap();

    let out = tempfile::TempDir::new().unwrap();
    let path = out.path().join("report.txt");
    TreeFormatter::new()
        .with_indent(4)
        .format_to_file(&report, &path)
        .unwrap();
    let s = fs::read_to_string(&path).unwrap();

    assert_eq!(s, "main.cpp\n    x.hpp\nx.hpp\n\nx.hpp 1\nmain.cpp 0\n");
}
