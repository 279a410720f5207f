use crate::errors::{TuraError, TuraResult};
use crate::models::MessageId;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Decodes a `data:<mime>;base64,<payload>` URI into raw bytes.
pub fn decode_data_uri(uri: &str) -> TuraResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| TuraError::export_error("not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| TuraError::export_error("data URI has no payload"))?;
    if !header.ends_with(";base64") {
        return Err(TuraError::export_error("data URI is not base64 encoded"));
    }
    BASE64
        .decode(payload.trim().as_bytes())
        .map_err(|e| TuraError::export_error(format!("invalid base64 payload: {}", e)))
}

/// File extension for the image type named in a data URI; jpg by default.
fn extension_for(uri: &str) -> &'static str {
    match uri.strip_prefix("data:").and_then(|rest| rest.split(';').next()) {
        Some("image/png") => "png",
        Some("image/webp") => "webp",
        _ => "jpg",
    }
}

/// Writes the image behind `uri` to `<dir>/inspiration-<id>.<ext>`.
pub fn export_image(uri: &str, id: MessageId, dir: &Path) -> TuraResult<PathBuf> {
    let bytes = decode_data_uri(uri)?;
    fs::create_dir_all(dir).map_err(|e| {
        TuraError::export_error(format!("cannot create {}: {}", dir.display(), e))
    })?;

    let path = dir.join(format!("inspiration-{}.{}", id, extension_for(uri)));
    fs::write(&path, &bytes)
        .map_err(|e| TuraError::export_error(format!("cannot write {}: {}", path.display(), e)))?;
    log::info!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn test_decode_data_uri() {
        assert_eq!(
            decode_data_uri("data:image/jpeg;base64,aGVsbG8=").unwrap(),
            b"hello".to_vec()
        );
    }

    #[test]
    fn test_decode_rejects_non_data_uris() {
        for uri in [
            "https://example.test/a.jpg",
            "data:image/jpeg;base64",
            "data:text/plain,hello",
            "data:image/jpeg;base64,@@@",
        ] {
            assert_eq!(decode_data_uri(uri).unwrap_err().kind(), ErrorKind::Export);
        }
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested");
        let path = export_image("data:image/jpeg;base64,aGVsbG8=", 7, &target).unwrap();

        assert_eq!(path, target.join("inspiration-7.jpg"));
        assert_eq!(fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn test_export_extension_follows_mime_type() {
        let dir = tempdir().unwrap();
        let path = export_image("data:image/png;base64,aGVsbG8=", 3, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("inspiration-3.png"));
    }
}
