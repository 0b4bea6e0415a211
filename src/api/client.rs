use std::time::Duration;

use crate::browse::preview;
use crate::error::{AppError, Result};

use super::node::Node;

/// HTTP client for the invoice storage backend's `/api/storage` surface.
///
/// Mutations perform no local model update; after a successful delete or
/// create the caller resynchronizes with a full `list_full_tree` refetch.
/// There is no retry logic — every failure is terminal for that one call
/// and must be re-triggered by a subsequent user action.
#[derive(Debug, Clone)]
pub struct StorageClient {
    base_url: String,
    http: reqwest::Client,
}

impl StorageClient {
    /// Create a client for the given base URL (trailing slash tolerated).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_children_url(&self, segments: &[String]) -> String {
        format!(
            "{}/api/storage/listfolders?path={}",
            self.base_url,
            segments.join("/")
        )
    }

    fn list_full_tree_url(&self) -> String {
        format!("{}/api/storage/listfoldertree", self.base_url)
    }

    fn delete_url(&self, path: &str) -> String {
        format!(
            "{}/api/storage/delete?filePath={}",
            self.base_url,
            urlencoding::encode(path)
        )
    }

    fn create_folder_url(&self, parent: &str, name: &str) -> String {
        format!(
            "{}/api/storage/addfolder?targetDir={}&folderName={}",
            self.base_url,
            urlencoding::encode(parent),
            urlencoding::encode(name)
        )
    }

    /// Derive the PDF view URL for `path`. Pure string templating, not a
    /// network call; the viewer is handed the URL as-is.
    pub fn preview_url(&self, path: &str) -> String {
        preview::view_url(&self.base_url, path)
    }

    /// Resolve one directory level (column variant).
    pub async fn list_children(&self, segments: &[String]) -> Result<Vec<Node>> {
        let url = self.list_children_url(segments);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(AppError::Fetch(format!("HTTP {} from {}", resp.status(), url)));
        }
        Ok(resp.json().await?)
    }

    /// Resolve the entire hierarchy in one call (recursive variant).
    pub async fn list_full_tree(&self) -> Result<Vec<Node>> {
        let url = self.list_full_tree_url();
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(AppError::Fetch(format!("HTTP {} from {}", resp.status(), url)));
        }
        Ok(resp.json().await?)
    }

    /// Remove the file or folder (and descendants) at `path`.
    pub async fn delete_entry(&self, path: &str) -> Result<()> {
        let url = self.delete_url(path);
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| AppError::Mutation(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(AppError::Mutation(format!(
                "HTTP {} deleting {}",
                resp.status(),
                path
            )));
        }
        Ok(())
    }

    /// Create a folder named `name` under `parent`.
    pub async fn create_folder(&self, parent: &str, name: &str) -> Result<()> {
        let url = self.create_folder_url(parent, name);
        let resp = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|e| AppError::Mutation(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(AppError::Mutation(format!(
                "HTTP {} creating {}/{}",
                resp.status(),
                parent,
                name
            )));
        }
        Ok(())
    }
}
