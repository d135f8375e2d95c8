//! Location (and optional download) of the planetary ephemeris kernel.
//!
//! An ephemeris source is given either as a filesystem path or as `"naif:<VERSION>"`
//! (e.g. `"naif:DE421"`). A versioned source resolves to `<version>.bsp`, looked up in the
//! working directory first. With the `jpl-download` feature it is then looked up in the user cache
//! directory and, when still missing, streamed from the NAIF generic kernels server.
use std::fmt;

use camino::Utf8PathBuf;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::merai_errors::MeraiError;

static NAIF_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[dD][eE]\d{3}[A-Za-z0-9_\-]*$").expect("valid NAIF version pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EphemSource {
    /// A versioned DE kernel, stored lowercase (`de421`).
    Naif(String),
    /// An explicit kernel file.
    Path(Utf8PathBuf),
}

impl TryFrom<&str> for EphemSource {
    type Error = MeraiError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(MeraiError::InvalidEphemSource(
                "empty ephemeris source".to_string(),
            ));
        }

        match value.split_once(':') {
            Some(("naif", version)) => {
                if NAIF_VERSION.is_match(version) {
                    Ok(EphemSource::Naif(version.to_lowercase()))
                } else {
                    Err(MeraiError::InvalidEphemSource(format!(
                        "unknown NAIF ephemeris version {version:?}"
                    )))
                }
            }
            _ => Ok(EphemSource::Path(Utf8PathBuf::from(value))),
        }
    }
}

impl fmt::Display for EphemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EphemSource::Naif(version) => write!(f, "naif:{}", version.to_uppercase()),
            EphemSource::Path(path) => write!(f, "{path}"),
        }
    }
}

impl EphemSource {
    /// Canonical kernel file name of a versioned source.
    pub fn filename(&self) -> String {
        match self {
            EphemSource::Naif(version) => format!("{version}.bsp"),
            EphemSource::Path(path) => path.file_name().unwrap_or(path.as_str()).to_string(),
        }
    }

    /// Find the kernel on disk, downloading it when allowed.
    ///
    /// Return
    /// ----------
    /// * The path of an existing kernel file, or [`MeraiError::DataUnavailable`].
    pub fn resolve(&self) -> Result<Utf8PathBuf, MeraiError> {
        match self {
            EphemSource::Path(path) => {
                if path.is_file() {
                    Ok(path.clone())
                } else {
                    Err(MeraiError::data_unavailable(path, "ephemeris file not found"))
                }
            }
            EphemSource::Naif(version) => {
                let local = Utf8PathBuf::from(self.filename());
                if local.is_file() {
                    return Ok(local);
                }
                fetch_kernel(version, &self.filename())
            }
        }
    }
}

#[cfg(not(feature = "jpl-download"))]
fn fetch_kernel(_version: &str, filename: &str) -> Result<Utf8PathBuf, MeraiError> {
    Err(MeraiError::data_unavailable(
        filename,
        "ephemeris file not found and the jpl-download feature is disabled",
    ))
}

#[cfg(feature = "jpl-download")]
fn fetch_kernel(version: &str, filename: &str) -> Result<Utf8PathBuf, MeraiError> {
    use directories::BaseDirs;

    let base_dir = BaseDirs::new()
        .ok_or_else(|| MeraiError::data_unavailable(filename, "no user cache directory"))?;
    let cache_path = camino::Utf8Path::from_path(base_dir.cache_dir())
        .ok_or_else(|| MeraiError::data_unavailable(filename, "cache path is not UTF-8"))?
        .join("merai_cache")
        .join("jpl_ephem");
    std::fs::create_dir_all(&cache_path)?;

    let local_file = cache_path.join(filename);
    if local_file.is_file() {
        return Ok(local_file);
    }

    let url = format!("https://naif.jpl.nasa.gov/pub/naif/generic_kernels/spk/planets/{version}.bsp");
    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(download_big_file(&url, &local_file))
        .map_err(|e| {
            // never leave a partial kernel behind
            let _ = std::fs::remove_file(&local_file);
            MeraiError::data_unavailable(&url, e)
        })?;

    Ok(local_file)
}

#[cfg(feature = "jpl-download")]
async fn download_big_file(url: &str, path: &camino::Utf8Path) -> Result<(), MeraiError> {
    use tokio::{fs::File, io::AsyncWriteExt};
    use tokio_stream::StreamExt;

    log::info!("Downloading {url} to {path}");
    let mut file = File::create(path).await?;
    let mut stream = reqwest::get(url).await?.error_for_status()?.bytes_stream();

    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;

    log::info!("Downloaded {url}");
    Ok(())
}
