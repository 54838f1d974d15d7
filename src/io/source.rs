use std::path::PathBuf;

use anyhow::{Context, Result};

/// Where the static dataset files live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    /// A local directory.
    Dir(PathBuf),
    /// An `http(s)://` base URL; file names are appended to it.
    Url(String),
}

impl DataSource {
    /// Interpret a command-line location as a URL or a directory.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.trim_end_matches('/').to_string())
        } else {
            Self::Dir(PathBuf::from(location))
        }
    }

    /// Human-readable location of a file within this source.
    pub fn locate(&self, name: &str) -> String {
        match self {
            Self::Dir(dir) => dir.join(name).display().to_string(),
            Self::Url(base) => format!("{base}/{name}"),
        }
    }

    /// Fetch the full contents of a file.
    pub fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        match self {
            Self::Dir(dir) => {
                let path = dir.join(name);
                std::fs::read(&path)
                    .with_context(|| format!("[io::source] Failed to read {}", path.display()))
            }
            Self::Url(_) => fetch_url(&self.locate(name)),
        }
    }
}

#[cfg(feature = "download")]
fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)
        .with_context(|| format!("[io::source] GET {url}"))?
        .error_for_status()
        .with_context(|| format!("[io::source] GET {url} returned error status"))?;

    Ok(resp.bytes()
        .with_context(|| format!("[io::source] Failed to read body of {url}"))?
        .to_vec())
}

#[cfg(not(feature = "download"))]
fn fetch_url(url: &str) -> Result<Vec<u8>> {
    anyhow::bail!("[io::source] Cannot fetch {url}: built without the `download` feature")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::DataSource;

    #[test]
    fn parse_distinguishes_urls() {
        assert_eq!(DataSource::parse("https://example.org/data/"), DataSource::Url("https://example.org/data".into()));
        assert_eq!(DataSource::parse("./data"), DataSource::Dir(PathBuf::from("./data")));
    }

    #[test]
    fn locate_joins_names() {
        assert_eq!(DataSource::parse("http://host/x").locate("a.json"), "http://host/x/a.json");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::Dir(dir.path().to_path_buf());
        assert!(source.fetch("missing.json").is_err());

        std::fs::write(dir.path().join("present.json"), b"[]").unwrap();
        assert_eq!(source.fetch("present.json").unwrap(), b"[]");
    }
}
