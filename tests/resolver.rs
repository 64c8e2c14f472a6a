use incdep::core::IncludeResolver;
use incdep::parsers::Include;
use std::fs;
use std::path::Path;

fn touch<P: AsRef<Path>>(p: P) {
    let p = p.as_ref();
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, "").unwrap();
}

#[test]
fn quoted_include_prefers_own_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let sub = dir.path().join("sub");
    let search = dir.path().join("search");
    touch(sub.join("b.hpp"));
    touch(search.join("b.hpp"));

    let resolver = IncludeResolver::new(vec![search.clone()]);
    let parent = resolver.resolve(&Include::quoted("b.hpp"), &sub);
    assert_eq!(parent.as_deref(), Some(sub.as_path()));
}

#[test]
fn angled_include_skips_own_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let sub = dir.path().join("sub");
    let search = dir.path().join("search");
    touch(sub.join("b.hpp"));
    touch(search.join("b.hpp"));

    let resolver = IncludeResolver::new(vec![search.clone()]);
    let parent = resolver.resolve(&Include::angled("b.hpp"), &sub);
    assert_eq!(parent.as_deref(), Some(search.as_path()));
}

#[test]
fn quoted_include_falls_back_to_search_dirs_in_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let sub = dir.path().join("sub");
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    fs::create_dir_all(&sub).unwrap();
    fs::create_dir_all(&first).unwrap();
    touch(second.join("util/io.hpp"));

    let resolver = IncludeResolver::new(vec![first.clone(), second.clone()]);
    let parent = resolver.resolve(&Include::quoted("util/io.hpp"), &sub);
    assert_eq!(parent.as_deref(), Some(second.as_path()));

    touch(first.join("util/io.hpp"));
    let parent = resolver.resolve(&Include::quoted("util/io.hpp"), &sub);
    assert_eq!(parent.as_deref(), Some(first.as_path()));
}

#[test]
fn missing_file_and_directories_are_unresolved() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("lib.hpp")).unwrap();

    let resolver = IncludeResolver::new(vec![dir.path().join("nowhere")]);
    assert_eq!(resolver.resolve(&Include::angled("lib.hpp"), dir.path()), None);
    assert_eq!(resolver.resolve(&Include::quoted("lib.hpp"), dir.path()), None);
}

#[test]
fn resolution_is_repeatable() {
    let dir = tempfile::TempDir::new().unwrap();
    touch(dir.path().join("a.hpp"));

    let resolver = IncludeResolver::new(Vec::new());
    let include = Include::quoted("a.hpp");
    let first = resolver.resolve(&include, dir.path());
    let second = resolver.resolve(&include, dir.path());
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some(dir.path()));
}
