//! Checks that the unit test tree mirrors the source tree and is wired into
//! the `unit` harness

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Files that only wire modules together
    const WIRING_FILES: [&str; 3] = ["lib.rs", "main.rs", "mod.rs"];
    // Harness roots directly under tests/
    const HARNESS_ROOTS: [&str; 2] = ["unit.rs", "meta.rs"];

    fn rust_files(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                rust_files(&path, base, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(|error| io::Error::other(error.to_string()))?;
                found.insert(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(())
    }

    fn tree(root: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let scanned = rust_files(Path::new(root), Path::new(root), &mut found);
        assert!(scanned.is_ok(), "cannot scan {root}: {scanned:?}");
        found
    }

    fn is_wiring(relative: &str) -> bool {
        let name = relative.rsplit('/').next().unwrap_or(relative);
        WIRING_FILES.contains(&name)
    }

    // Tests that every source file has a unit test file at the same relative path
    // Verified by deleting a unit test file
    #[test]
    fn test_every_source_file_has_unit_tests() {
        let tests = tree("tests/unit");
        let missing: Vec<String> = tree("src")
            .into_iter()
            .filter(|path| !is_wiring(path) && !tests.contains(path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests that no unit test file outlives its source file
    // Verified by renaming a source module
    #[test]
    fn test_every_unit_test_has_a_source_file() {
        let sources = tree("src");
        let orphaned: Vec<String> = tree("tests/unit")
            .into_iter()
            .filter(|path| !is_wiring(path) && !sources.contains(path))
            .map(|path| format!("  - tests/unit/{path}"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "unit tests without a source file:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests that every unit test file is declared by its directory's mod.rs,
    // since undeclared files are never compiled into the harness
    // Verified by removing a `pub mod` line
    #[test]
    fn test_unit_files_are_declared() {
        let mut undeclared = Vec::new();
        for path in tree("tests/unit") {
            let Some((dir, file)) = path.rsplit_once('/') else {
                continue;
            };
            let Some(module) = file.strip_suffix(".rs").filter(|name| *name != "mod") else {
                continue;
            };
            let wiring = fs::read_to_string(format!("tests/unit/{dir}/mod.rs")).unwrap_or_default();
            if !wiring.contains(&format!("pub mod {module};")) {
                undeclared.push(format!("  - tests/unit/{path}"));
            }
        }

        assert!(
            undeclared.is_empty(),
            "unit test files missing from their mod.rs:\n{}",
            undeclared.join("\n")
        );
    }

    // Tests that every test source outside the harness roots defines a test
    // Verified by emptying a test file
    #[test]
    fn test_test_files_contain_tests() {
        let empty: Vec<String> = tree("tests")
            .into_iter()
            .filter(|path| !is_wiring(path) && !HARNESS_ROOTS.contains(&path.as_str()))
            .filter(|path| {
                fs::read_to_string(format!("tests/{path}"))
                    .is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "test files without #[test] functions:\n{}",
            empty.join("\n")
        );
    }

    // Tests that every benchmark is a criterion entry point
    // Verified by registering a bench without `criterion_main!`
    #[test]
    fn test_benches_are_criterion_entry_points() {
        let plain: Vec<String> = tree("benches")
            .into_iter()
            .filter(|path| {
                fs::read_to_string(format!("benches/{path}"))
                    .is_ok_and(|content| !content.contains("criterion_main!"))
            })
            .map(|path| format!("  - benches/{path}"))
            .collect();

        assert!(
            plain.is_empty(),
            "benches without criterion_main!:\n{}",
            plain.join("\n")
        );
    }
}
