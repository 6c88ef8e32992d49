use std::path::{Path, PathBuf};
use log::info;
use tokio::fs;

use crate::config::io::get_data_dir;
use crate::error::ShareError;
use crate::gui::open::open_path;

pub const REPORT_FILE_NAME: &str = "oximeter-report.txt";

pub async fn write_report(directory: &Path, report: &str) -> Result<PathBuf, ShareError> {
    fs::create_dir_all(directory).await?;

    let path = directory.join(REPORT_FILE_NAME);
    fs::write(&path, report).await?;
    Ok(path)
}

/// Hands the report to the OS by writing it to the data directory and opening it. On error the
/// caller falls back to the clipboard.
pub async fn share_report(report: String) -> Result<PathBuf, ShareError> {
    let directory = get_data_dir().ok_or(ShareError::NoDataDir)?;
    let path = write_report(&directory, &report).await?;

    info!("Opening report {}", path.to_string_lossy());
    open_path(path.clone()).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn report_is_written_to_the_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("reports");

        let path = write_report(&target, "Oximeter Report\nActivity: Resting").await.unwrap();

        assert_eq!(path, target.join(REPORT_FILE_NAME));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Oximeter Report\nActivity: Resting");
    }

    #[tokio::test]
    async fn report_is_overwritten() {
        let dir = TempDir::new().unwrap();

        write_report(dir.path(), "first, longer report").await.unwrap();
        let path = write_report(dir.path(), "second").await.unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }
}
