// Audio asset file management
// Recorded and imported files live under the app's recordings folder;
// the recording entry owning a path is the only permitted deleter.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Sanitize a filename to be safe for filesystem use
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Resolve (and create) the recordings folder under a base directory
pub fn recordings_dir(base: &Path) -> Result<PathBuf> {
    let dir = base.join("recordings");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create recordings folder at {}", dir.display()))?;
    Ok(dir)
}

/// Copy an external audio file into the recordings folder and return
/// the new path. Name collisions get a numeric suffix so an import
/// never overwrites an existing asset.
pub fn import_asset(src: &Path, dir: &Path) -> Result<PathBuf> {
    let file_name = src
        .file_name()
        .and_then(|n| n.to_str())
        .map(sanitize_filename)
        .unwrap_or_else(|| "import.wav".to_string());

    let mut target = dir.join(&file_name);
    let mut counter = 1;
    while target.exists() {
        let stem = Path::new(&file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("import");
        let ext = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("wav");
        target = dir.join(format!("{}_{}.{}", stem, counter, ext));
        counter += 1;
    }

    std::fs::copy(src, &target)
        .with_context(|| format!("Failed to copy {} into recordings folder", src.display()))?;

    log::info!("Imported audio asset: {}", target.display());
    Ok(target)
}

/// Best-effort removal of an asset file. A missing file or a failed
/// unlink is logged and reported as `false`, never an error, so
/// metadata deletion can proceed regardless.
pub fn remove_asset(path: &str) -> bool {
    let path = Path::new(path);
    if !path.exists() {
        return false;
    }

    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to delete asset file {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a/b:c*.wav"), "a_b_c_.wav");
        assert_eq!(sanitize_filename("  take one.wav  "), "take one.wav");
    }

    #[test]
    fn test_import_avoids_collisions() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("take.wav");
        std::fs::write(&src, b"RIFF").unwrap();

        let recordings = recordings_dir(dir.path()).unwrap();
        let first = import_asset(&src, &recordings).unwrap();
        let second = import_asset(&src, &recordings).unwrap();

        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
        assert_eq!(second.file_name().unwrap(), "take_1.wav");
    }

    #[test]
    fn test_remove_asset_is_best_effort() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        assert!(remove_asset(path.to_str().unwrap()));
        assert!(!path.exists());
        // Second removal: file is already gone, still no error
        assert!(!remove_asset(path.to_str().unwrap()));
    }
}
