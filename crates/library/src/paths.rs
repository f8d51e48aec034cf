// FILE: crates/library/src/paths.rs
//! Validation of request-supplied path segments

use crate::error::{LibraryError, Result};
use std::path::{Component, Path, PathBuf};

/// Checks a single name (author or book) and returns it as a path
///
/// Anything other than exactly one plain component is rejected, so `..`,
/// absolute paths, drive prefixes, separators and empty names never reach
/// the filesystem.
pub(crate) fn single_segment<'a>(value: &'a str, what: &str) -> Result<&'a Path> {
    let path = Path::new(value);
    let mut components = path.components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !value.contains(['/', '\\']) => {
            reject_hidden(path, what)?;
            Ok(path)
        }
        _ => Err(LibraryError::invalid_input(format!(
            "invalid {} name: {:?}",
            what, value
        ))),
    }
}

/// Checks a file path relative to a book directory
///
/// Subdirectories are allowed; every component must be a plain name.
pub(crate) fn relative_file(value: &str) -> Result<PathBuf> {
    let path = Path::new(value);
    let mut relative = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(name) => relative.push(name),
            _ => {
                return Err(LibraryError::invalid_input(format!(
                    "invalid file path: {:?}",
                    value
                )))
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(LibraryError::invalid_input("file path must not be empty"));
    }

    reject_hidden(&relative, "file")?;
    Ok(relative)
}

/// Hidden names are never listed, so they cannot be requested either
fn reject_hidden(path: &Path, what: &str) -> Result<()> {
    let hidden = path
        .components()
        .any(|c| c.as_os_str().as_encoded_bytes().starts_with(b"."));

    if hidden {
        Err(LibraryError::not_found(format!("{} {}", what, path.display())))
    } else {
        Ok(())
    }
}

/// Joins a relative path with `/` regardless of platform
pub(crate) fn to_slash(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        parts.push(component.as_os_str().to_str()?);
    }
    Some(parts.join("/"))
}
