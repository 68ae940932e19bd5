use std::fs;
use std::path::Path;

use super::error::ShaderError;
use super::stage::ShaderStage;

/// Text of one shader stage.
///
/// Held only until it is compiled. The text is handed to the driver with its
/// length, so no terminator is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    stage: ShaderStage,
    text: String,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }

    /// Reads the whole file at `path` as UTF-8.
    pub fn load(stage: ShaderStage, path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("loaded {stage} source from {} ({} bytes)", path.display(), text.len());
        Ok(Self { stage, text })
    }

    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reads_entire_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#version 460 core\nvoid main() {{}}\n").unwrap();

        let source = ShaderSource::load(ShaderStage::Vertex, file.path()).unwrap();
        assert_eq!(source.stage(), ShaderStage::Vertex);
        assert_eq!(source.text(), "#version 460 core\nvoid main() {}\n");
    }

    #[test]
    fn load_missing_file_is_io_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.frag");

        let err = ShaderSource::load(ShaderStage::Fragment, &path).unwrap_err();
        match err {
            ShaderError::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn load_non_utf8_is_io_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let err = ShaderSource::load(ShaderStage::Vertex, file.path()).unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
    }
}
