//! Path and extension utilities

use std::path::Path;

/// Lower-cased text after the last `.` in the file name, or `""` when the name has no dot.
///
/// Only the final path component is considered, so dots in folder names never leak in.
pub fn extension_of(path: &Path) -> String {
    let name = match path.file_name() {
        Some(n) => n.to_string_lossy(),
        None => return String::new(),
    };
    match name.rfind('.') {
        Some(i) => name[i + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// One playlist line for `path`, or `None` when the path is not valid UTF-8 (a lossy line
/// would name a file that does not exist).
pub fn path_to_playlist_line(path: &Path) -> Option<&str> {
    path.to_str()
}

/// Join the excluded extensions for the run report. The extensionless bucket shows as `(none)`.
pub fn format_extension_list<'a, I>(extensions: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    extensions
        .into_iter()
        .map(|e| if e.is_empty() { "(none)" } else { e.as_str() })
        .collect::<Vec<_>>()
        .join(", ")
}
