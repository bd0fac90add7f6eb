//! Static content store
//!
//! The control page and button image are read fully into memory once at
//! startup and served verbatim for the process lifetime. A missing or
//! unreadable asset is a fatal startup error.

use crate::config::AssetsConfig;
use hyper::body::Bytes;
use std::io;
use tokio::fs;

/// The two in-memory asset buffers
#[derive(Debug)]
pub struct StaticAssets {
    /// Control page, served on "/"
    pub page: Bytes,
    /// Button image, served on "/button.png"
    pub button: Bytes,
}

impl StaticAssets {
    /// Read both assets from disk
    pub async fn load(cfg: &AssetsConfig) -> io::Result<Self> {
        let page = read_asset(&cfg.page).await?;
        let button = read_asset(&cfg.button).await?;
        Ok(Self {
            page: Bytes::from(page),
            button: Bytes::from(button),
        })
    }
}

/// Read one asset, tagging the error with the offending path
async fn read_asset(path: &str) -> io::Result<Vec<u8>> {
    fs::read(path)
        .await
        .map_err(|e| io::Error::new(e.kind(), format!("{path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("doorpi-assets-test-{}-{name}", std::process::id()))
    }

    #[tokio::test]
    async fn test_load_reads_both_files_verbatim() {
        let page_path = temp_path("page.html");
        let button_path = temp_path("button.png");
        let page_content = b"<html><body>press</body></html>";
        let button_content = [0x89_u8, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x01];
        fs::write(&page_path, page_content).await.unwrap();
        fs::write(&button_path, button_content).await.unwrap();

        let assets = StaticAssets::load(&AssetsConfig {
            page: page_path.to_string_lossy().into_owned(),
            button: button_path.to_string_lossy().into_owned(),
        })
        .await
        .expect("assets should load");

        assert_eq!(assets.page.as_ref(), page_content);
        assert_eq!(assets.button.as_ref(), button_content);

        let _ = fs::remove_file(&page_path).await;
        let _ = fs::remove_file(&button_path).await;
    }

    #[tokio::test]
    async fn test_load_fails_on_missing_file() {
        let err = StaticAssets::load(&AssetsConfig {
            page: "no/such/page.html".to_string(),
            button: "no/such/button.png".to_string(),
        })
        .await
        .expect_err("missing assets must fail");

        // The error names the file that could not be read
        assert!(err.to_string().contains("no/such/page.html"));
    }
}
