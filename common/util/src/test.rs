use std::ffi::OsString;
use std::path::PathBuf;

use predicates::prelude::predicate;
use predicates::Predicate;
use tempfile::TempDir;

/// Returns the full path and the file name of a (not yet created) file in the temp dir.
pub fn build_temp_file(temp_dir: &TempDir, prefix: &str, extension: &str) -> (PathBuf, OsString) {
    let mut path = PathBuf::from(temp_dir.path());
    path.push(format!("{}.{}", prefix, extension));

    let file_name = path.file_name().unwrap().to_os_string();

    (path, file_name)
}

/// Split each argument group on whitespace, e.g. `["--form form.json", "-v"]`.
pub fn prepare_args(args: Vec<&str>) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split_whitespace())
        .map(str::to_string)
        .collect()
}

/// A predicate that always passes, printing the content it was given.
///
/// Useful for seeing the output of a command under test, e.g. `.stderr(print("stderr"))`.
pub fn print(title: &str) -> impl Predicate<str> {
    let title = title.to_string();
    predicate::function(move |content: &str| {
        println!("{}:\n{}", title, content);
        true
    })
}

/// Assert that each expected string occurs in the content, in the given order.
#[macro_export]
macro_rules! assert_contains_inorder {
    ($content:expr, [$($expected:expr),* $(,)?]) => {{
        let content: &str = &$content;
        let mut remaining = content;
        $(
            let expected: &str = $expected;
            match remaining.find(expected) {
                Some(index) => remaining = &remaining[index + expected.len()..],
                None => panic!("content missing, or out of order. expected: '{}'", expected),
            }
        )*
        let _ = remaining;
    }};
}
