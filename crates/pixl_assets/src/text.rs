use std::path::Path;

use anyhow::{Context, Result};

/// Reads a whole UTF-8 file, such as a shader source.
pub fn load_text_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("unable to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_names_the_file() {
        let error = load_text_file("/nonexistent/blur.glsl").unwrap_err();
        assert!(format!("{error:#}").contains("blur.glsl"));
    }

    #[test]
    fn reads_file() {
        let path = std::env::temp_dir().join(format!("pixl-text-{}.txt", std::process::id()));
        std::fs::write(&path, "void main() {}\n").unwrap();

        assert_eq!(load_text_file(&path).unwrap(), "void main() {}\n");
        std::fs::remove_file(path).unwrap();
    }
}
