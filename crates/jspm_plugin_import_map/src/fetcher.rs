use std::fmt::Debug;

use jspm_error::Error;
use url::Url;

#[async_trait::async_trait]
pub trait Fetcher: Debug + Send + Sync {
  async fn fetch(&self, url: &Url) -> jspm_error::Result<String>;
}

/// Reads `file:` URLs from disk.
#[derive(Debug, Default)]
pub struct FileFetcher;

#[async_trait::async_trait]
impl Fetcher for FileFetcher {
  async fn fetch(&self, url: &Url) -> jspm_error::Result<String> {
    if url.scheme() != "file" {
      return Err(Error::fetch_failed(
        url.as_str(),
        format!("unsupported scheme \"{}\"", url.scheme()),
      ));
    }
    let path = url
      .to_file_path()
      .map_err(|_| Error::fetch_failed(url.as_str(), "not a local file path"))?;
    tokio::fs::read_to_string(&path)
      .await
      .map_err(|e| Error::fetch_failed(url.as_str(), e))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn reads_local_files() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("main.js");
    std::fs::write(&file, "export default 1;").unwrap();

    let url = Url::from_file_path(&file).unwrap();
    assert_eq!(FileFetcher.fetch(&url).await.unwrap(), "export default 1;");
  }

  #[tokio::test]
  async fn rejects_remote_urls() {
    let url = Url::parse("https://ga.jspm.io/npm:lodash@4.17.21/lodash.js").unwrap();
    let err = FileFetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.code(), jspm_error::error_code::FETCH_FAILED);
  }
}
