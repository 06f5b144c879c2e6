use std::borrow::Cow;
use std::path::Path;

/// Type key for files without a usable extension (`Makefile`, `.bashrc`, `notes.`).
pub const NO_EXTENSION: &str = "(no extension)";

/// Derive the type key of a file name: the lowercased text after the last `.`.
///
/// A leading dot marks a hidden file, not an extension, so `.bashrc` has none
/// while `.config.toml` is `toml`.
pub fn classify(file_name: &str) -> Cow<'static, str> {
    match file_name.rfind('.') {
        Some(0) | None => Cow::Borrowed(NO_EXTENSION),
        Some(dot) => {
            let ext = &file_name[dot + 1..];
            if ext.is_empty() {
                Cow::Borrowed(NO_EXTENSION)
            } else {
                Cow::Owned(ext.to_lowercase())
            }
        }
    }
}

/// Classify a path by its final component only.
pub fn classify_path(path: &Path) -> Cow<'static, str> {
    match path.file_name() {
        Some(name) => classify(&name.to_string_lossy()),
        None => Cow::Borrowed(NO_EXTENSION),
    }
}
