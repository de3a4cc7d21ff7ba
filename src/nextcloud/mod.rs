//! Thin Nextcloud WebDAV client
//!
//! Only the three verbs the pipeline needs: PROPFIND to check whether the
//! target folder exists, MKCOL to create collections and PUT to upload
//! file contents. The WebDAV plumbing itself is reqwest's job.

pub mod upload;

use anyhow::{Context, Result};
use reqwest::{Client, Method, StatusCode, Url};
use tracing::debug;

use crate::config::NextcloudConfig;
use crate::error::PipelineError;

/// Client bound to the DAV files root of one Nextcloud user
pub struct NextcloudClient {
    http: Client,
    dav_root: Url,
    auth_user: String,
    auth_pass: String,
}

impl NextcloudClient {
    pub fn new(config: &NextcloudConfig) -> Result<Self> {
        let mut dav_root = Url::parse(&config.url)
            .with_context(|| format!("NC_URL is not a valid URL: '{}'", config.url))?;
        {
            let mut segments = dav_root
                .path_segments_mut()
                .map_err(|_| PipelineError::Nextcloud("NC_URL cannot be a base URL".to_string()))?;
            segments.pop_if_empty();
            segments.extend(["remote.php", "dav", "files", config.auth_user.as_str()]);
        }

        let http = Client::builder()
            .user_agent(concat!("tr-docs/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(NextcloudClient {
            http,
            dav_root,
            auth_user: config.auth_user.clone(),
            auth_pass: config.auth_pass.clone(),
        })
    }

    /// Full DAV URL for a remote path like "Documents/TradeRepublic/2024".
    /// Segments are percent-encoded individually.
    pub fn dav_url(&self, remote_path: &str) -> Result<Url> {
        let mut url = self.dav_root.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| PipelineError::Nextcloud("invalid DAV root".to_string()))?;
            segments.pop_if_empty();
            segments.extend(remote_path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    /// Check whether a remote folder exists (PROPFIND, depth 0).
    pub async fn folder_exists(&self, remote_path: &str) -> Result<bool> {
        let url = self.dav_url(remote_path)?;
        let response = self
            .http
            .request(Method::from_bytes(b"PROPFIND")?, url)
            .basic_auth(&self.auth_user, Some(&self.auth_pass))
            .header("Depth", "0")
            .send()
            .await
            .with_context(|| format!("PROPFIND failed for '{}'", remote_path))?;

        match response.status() {
            StatusCode::MULTI_STATUS | StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(PipelineError::Nextcloud(format!(
                "PROPFIND '{}' returned {}",
                remote_path, status
            ))
            .into()),
        }
    }

    /// Create a remote folder and all of its parents (MKCOL per segment).
    /// An already existing collection is not an error.
    pub async fn makedirs(&self, remote_path: &str) -> Result<()> {
        let mut current = String::new();
        for segment in remote_path.split('/').filter(|s| !s.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);
            self.mkcol(&current).await?;
        }
        Ok(())
    }

    async fn mkcol(&self, remote_path: &str) -> Result<()> {
        let url = self.dav_url(remote_path)?;
        let response = self
            .http
            .request(Method::from_bytes(b"MKCOL")?, url)
            .basic_auth(&self.auth_user, Some(&self.auth_pass))
            .send()
            .await
            .with_context(|| format!("MKCOL failed for '{}'", remote_path))?;

        match response.status() {
            StatusCode::CREATED => {
                debug!("created remote folder '{}'", remote_path);
                Ok(())
            }
            // 405 Method Not Allowed: the collection already exists
            StatusCode::METHOD_NOT_ALLOWED => Ok(()),
            status => Err(PipelineError::Nextcloud(format!(
                "MKCOL '{}' returned {}",
                remote_path, status
            ))
            .into()),
        }
    }

    /// Upload file contents to a remote path. Existing files are overwritten,
    /// that is plain WebDAV PUT semantics.
    pub async fn upload_file(&self, remote_path: &str, contents: Vec<u8>) -> Result<()> {
        let url = self.dav_url(remote_path)?;
        let response = self
            .http
            .put(url)
            .basic_auth(&self.auth_user, Some(&self.auth_pass))
            .body(contents)
            .send()
            .await
            .with_context(|| format!("PUT failed for '{}'", remote_path))?;

        if !response.status().is_success() {
            return Err(PipelineError::Nextcloud(format!(
                "PUT '{}' returned {}",
                remote_path,
                response.status()
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> NextcloudConfig {
        NextcloudConfig {
            url: "https://cloud.example.com".to_string(),
            auth_user: "andreas".to_string(),
            auth_pass: "secret".to_string(),
            document_folder: "Documents/TradeRepublic".to_string(),
        }
    }

    #[test]
    fn test_dav_root_includes_user() {
        let client = NextcloudClient::new(&sample_config()).unwrap();
        assert_eq!(
            client.dav_root.as_str(),
            "https://cloud.example.com/remote.php/dav/files/andreas"
        );
    }

    #[test]
    fn test_dav_root_tolerates_trailing_slash() {
        let mut config = sample_config();
        config.url = "https://cloud.example.com/".to_string();
        let client = NextcloudClient::new(&config).unwrap();
        assert_eq!(
            client.dav_root.as_str(),
            "https://cloud.example.com/remote.php/dav/files/andreas"
        );
    }

    #[test]
    fn test_dav_url_encodes_segments() {
        let client = NextcloudClient::new(&sample_config()).unwrap();
        let url = client
            .dav_url("Documents/Trade Republic/2024/Kauforder 05.pdf")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.example.com/remote.php/dav/files/andreas/Documents/Trade%20Republic/2024/Kauforder%2005.pdf"
        );
    }

    #[test]
    fn test_dav_url_ignores_redundant_slashes() {
        let client = NextcloudClient::new(&sample_config()).unwrap();
        let url = client.dav_url("/Documents//TradeRepublic/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.example.com/remote.php/dav/files/andreas/Documents/TradeRepublic"
        );
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let mut config = sample_config();
        config.url = "not a url".to_string();
        assert!(NextcloudClient::new(&config).is_err());
    }
}
