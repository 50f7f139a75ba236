use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use templ::cli::{run, Args};
use walkdir::WalkDir;

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
///
/// # Arguments
/// * `dir1` - The first directory to compare (actual output).
/// * `dir2` - The second directory to compare (expected output).
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let relative_files = |root: &Path| -> std::collections::BTreeSet<PathBuf> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file())
            .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
            .collect()
    };
    let files1 = relative_files(dir1);
    let files2 = relative_files(dir2);

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", dir1);
    println!("Expected output: {:?}", dir2);
    println!();

    for file in files1.difference(&files2) {
        println!("  + {:?} (only in actual)", file);
    }
    for file in files2.difference(&files1) {
        println!("  - {:?} (only in expected)", file);
    }

    for file in files1.intersection(&files2) {
        let actual = fs::read_to_string(dir1.join(file)).unwrap_or_default();
        let expected = fs::read_to_string(dir2.join(file)).unwrap_or_default();
        if actual != expected {
            println!("\n  File: {:?}", file);
            println!("  --- Actual content:\n{actual}");
            println!("  --- Expected content:\n{expected}");
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Builds CLI arguments rendering `templates` from `templates_dir` into `output_dir`.
pub fn args(templates_dir: &str, templates: &[&str], output_dir: &Path) -> Args {
    Args {
        templates: templates.iter().map(|t| t.to_string()).collect(),
        templates_dir: PathBuf::from(templates_dir),
        output_dir: output_dir.to_path_buf(),
        data: None,
        data_file: None,
        css: Vec::new(),
        force: true,
        verbose: 2,
    }
}

/// Runs the templ CLI, compares the output to the expected directory, prints
/// any differences, and asserts that the directories are identical.
///
/// # Arguments
/// * `args` - CLI arguments; `output_dir` is replaced with a scratch directory.
/// * `expected_dir` - Path to the directory with expected output.
pub fn run_and_assert(mut args: Args, expected_dir: &str) {
    let tmp_dir = tempfile::tempdir().unwrap();
    args.output_dir = tmp_dir.path().to_path_buf();
    run(args).unwrap();
    let result = dir_diff::is_different(tmp_dir.path(), expected_dir);
    match result {
        Ok(different) => {
            if different {
                print_dir_diff(tmp_dir.path(), expected_dir.as_ref());
                panic!("Directories differ. See above for details.");
            }
        }
        Err(e) => {
            debug!("Error comparing directories: {e:?}");
        }
    }
    assert!(!dir_diff::is_different(tmp_dir.path(), expected_dir).unwrap());
}
