//! Level sources: levels bundled into the binary, or level files on disk.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

use rust_embed::RustEmbed;
use tracing::debug;

use crate::error::LevelError;

#[derive(RustEmbed)]
#[folder = "levels/"]
struct EmbeddedLevels;

/// Names of the bundled levels, without extension.
pub fn embedded_levels() -> Vec<String> {
    let mut names: Vec<String> = EmbeddedLevels::iter()
        .filter_map(|file| file.strip_suffix(".csv").map(str::to_string))
        .collect();
    names.sort();
    names
}

/// Returns the text of a bundled level.
pub fn embedded_level(name: &str) -> Option<Cow<'static, [u8]>> {
    EmbeddedLevels::get(&format!("{name}.csv")).map(|file| file.data)
}

/// Loads level text by bundled name, falling back to a file path.
///
/// # Errors
///
/// Returns [`LevelError::NotFound`] when neither a bundled level nor a file
/// of that name exists.
pub fn load_level_text(name: &str) -> Result<String, LevelError> {
    if let Some(data) = embedded_level(name) {
        debug!(level = name, "Using bundled level");
        return String::from_utf8(data.into_owned()).map_err(|_| LevelError::Encoding { name: name.to_string() });
    }

    match fs::read_to_string(Path::new(name)) {
        Ok(text) => {
            debug!(path = name, "Read level file");
            Ok(text)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LevelError::NotFound(name.to_string())),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(LevelError::Encoding { name: name.to_string() }),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_is_bundled() {
        assert!(embedded_levels().contains(&"classic".to_string()));
        assert!(load_level_text("classic").is_ok());
    }

    #[test]
    fn test_missing_level() {
        assert!(matches!(
            load_level_text("no-such-level"),
            Err(LevelError::NotFound(_))
        ));
    }
}
