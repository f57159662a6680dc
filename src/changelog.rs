//! Release notes extraction from markdown changelogs.
use regex::Regex;
use std::{fs, path::Path};

use crate::error::{PublishError, Result};

/// Read the changelog at `path` and return everything from the first `##`
/// heading onward, each line terminated by `\n`. Any preamble (title,
/// badges) before the first version heading is dropped.
pub fn complete_changelog(path: &Path) -> Result<String> {
    let content =
        fs::read_to_string(path).map_err(|err| PublishError::file(path, err))?;
    release_notes(&content)
}

/// [`complete_changelog`] for changelog text that is already loaded.
pub fn release_notes(content: &str) -> Result<String> {
    let line_break = Regex::new(r"\r\n?|\n")?;

    let mut notes = String::new();

    for line in line_break
        .split(content)
        .skip_while(|line| !line.starts_with("##"))
    {
        notes.push_str(line);
        notes.push('\n');
    }

    Ok(notes)
}

/// Escape text so it can be passed as an MSBuild property value on a
/// command line.
pub fn escape_msbuild_property(source: &str) -> String {
    source
        .replace(';', "%3B")
        .replace(',', "%2C")
        .replace(' ', "%20")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const CHANGELOG: &str = "# Changelog\r\n\r\nAll notable changes.\r\n\r\n## v1.1.0\r\n- Added uploads\n\n## v1.0.0\n- Initial release";

    #[test]
    fn skips_preamble_before_first_version_heading() {
        let notes = release_notes(CHANGELOG).unwrap();
        assert_eq!(
            notes,
            "## v1.1.0\n- Added uploads\n\n## v1.0.0\n- Initial release\n"
        );
    }

    #[test]
    fn changelog_without_headings_is_empty() {
        let notes = release_notes("# Changelog\nnothing yet").unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn reads_changelog_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CHANGELOG.md");
        fs::write(&path, CHANGELOG).unwrap();

        let notes = complete_changelog(&path).unwrap();
        assert!(notes.starts_with("## v1.1.0\n"));
    }

    #[test]
    fn missing_changelog_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = complete_changelog(&tmp.path().join("CHANGELOG.md"));
        assert!(matches!(result, Err(PublishError::Transfer(_))));
    }

    #[test]
    fn escapes_msbuild_special_characters() {
        assert_eq!(
            escape_msbuild_property("a; b,c\r\nd"),
            "a%3B%20b%2Cc%0D%0Ad"
        );
    }
}
