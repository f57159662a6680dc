use std::{borrow::Cow, path::Path};

/// Remote-visible file name for a local path: directory components are
/// stripped and surrounding whitespace trimmed. Both `/` and `\` count as
/// separators so Windows paths behave the same on every platform.
///
/// Normalizing an already normalized name returns it unchanged.
pub fn normalize_filename(original: &str) -> Cow<'_, str> {
    if original.trim().is_empty() {
        return Cow::Borrowed("");
    }

    let file_name = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim();

    if file_name.len() == original.len() {
        Cow::Borrowed(original)
    } else {
        Cow::Owned(file_name.to_string())
    }
}

/// [`normalize_filename`] for a [`Path`].
pub fn normalize_path_filename(path: &Path) -> String {
    normalize_filename(&path.to_string_lossy()).into_owned()
}
