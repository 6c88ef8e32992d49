use std::io;
use std::path::PathBuf;
use open;
use tokio::task::spawn_blocking;
use crate::error::LinkOpenError;

pub const SOS_LINK: &str = "tel:112";

pub fn is_supported_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("tel:")
}

async fn open_blocking(target: std::ffi::OsString) -> Result<(), LinkOpenError> {
    spawn_blocking(move || {
        open::that(&target)
    })
        .await
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))??;

    Ok(())
}

pub async fn open_link(url: &str) -> Result<(), LinkOpenError> {
    if !is_supported_link(url) {
        return Err(LinkOpenError::UnsupportedScheme);
    }

    open_blocking(url.into()).await
}

/// Opens a local file with whatever the OS associates with it.
pub async fn open_path(path: PathBuf) -> Result<(), LinkOpenError> {
    open_blocking(path.into_os_string()).await
}
