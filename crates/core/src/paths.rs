//! Output path derivation
//!
//! Maps a design document path onto the path of its test specification:
//! the `docs` folder becomes `tests` and the `.md` extension becomes `.csv`.

use std::path::{Path, PathBuf};

const DOCS_SEGMENT: &str = "docs";
const TESTS_SEGMENT: &str = "tests";
const MARKDOWN_EXTENSION: &str = ".md";
const CSV_EXTENSION: &str = ".csv";

/// Derive the test specification path for a design document.
///
/// Every occurrence of `docs` in the path is replaced with `tests` and every
/// occurrence of `.md` with `.csv`. When that does not produce a `.csv`
/// suffix (the input had another extension, or none), the final extension of
/// the `docs`-substituted path is replaced with `.csv` instead.
///
/// The substitution is textual: `mydocs/a.md` becomes `mytests/a.csv`.
/// Paths that are not valid UTF-8 are rejected rather than rewritten lossily.
pub fn derive_output_path(input: &Path) -> Result<PathBuf, NonUtf8Path> {
    let input = input
        .to_str()
        .ok_or_else(|| NonUtf8Path(input.to_path_buf()))?;
    let relocated = input.replace(DOCS_SEGMENT, TESTS_SEGMENT);

    let primary = relocated.replace(MARKDOWN_EXTENSION, CSV_EXTENSION);
    if primary.ends_with(CSV_EXTENSION) {
        return Ok(PathBuf::from(primary));
    }

    Ok(PathBuf::from(relocated).with_extension(&CSV_EXTENSION[1..]))
}

/// An input path whose output path cannot be derived without mangling it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} is not a valid UTF-8 path", .0.display())]
pub struct NonUtf8Path(pub PathBuf);

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(input: &str) -> String {
        derive_output_path(Path::new(input))
            .unwrap()
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_markdown_in_docs_folder() {
        assert_eq!(derive("project/docs/design.md"), "project/tests/design.csv");
    }

    #[test]
    fn test_non_markdown_extension_falls_back() {
        assert_eq!(derive("project/docs/design.txt"), "project/tests/design.csv");
    }

    #[test]
    fn test_no_extension_appends_csv() {
        assert_eq!(derive("project/docs/design"), "project/tests/design.csv");
    }

    #[test]
    fn test_path_without_docs_segment_keeps_directory() {
        assert_eq!(derive("notes/design.md"), "notes/design.csv");
    }

    #[test]
    fn test_all_docs_occurrences_are_replaced() {
        assert_eq!(
            derive("docs/api/docs/overview.md"),
            "tests/api/tests/overview.csv"
        );
    }

    #[test]
    fn test_inner_md_with_other_extension() {
        // ".md" is replaced inside the name, but the suffix is still ".bak",
        // so the fallback swaps the last extension of the original name.
        assert_eq!(derive("docs/design.md.bak"), "tests/design.md.csv");
    }

    #[test]
    fn test_already_csv_is_unchanged_apart_from_folder() {
        assert_eq!(derive("docs/cases.csv"), "tests/cases.csv");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"docs/caf\xe9.md"));
        assert_eq!(
            derive_output_path(input),
            Err(NonUtf8Path(input.to_path_buf()))
        );
    }
}
