//! Google Drive v3 REST client

use crate::config::DriveConfig;
use crate::error::StorageError;
use quackmeta_domain::traits::{DownloadedFile, RemoteFileInfo, RemoteStorage};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const MULTIPART_BOUNDARY: &str = "quackmeta-upload-boundary";

/// File resource fields requested from the API
#[derive(Debug, Deserialize)]
struct FileResource {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    parents: Vec<String>,
}

/// Blocking Google Drive client authenticated with a bearer token
pub struct GoogleDriveStorage {
    config: DriveConfig,
    client: Client,
}

impl GoogleDriveStorage {
    /// Create a new client
    pub fn new(config: DriveConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| StorageError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn token(&self) -> Result<&str, StorageError> {
        self.config
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| StorageError::Credential("access token not provided".to_string()))
    }

    fn file_url(&self, id: &str) -> String {
        format!("{}/files/{}", self.config.api_base.trim_end_matches('/'), id)
    }

    fn send(&self, request: RequestBuilder, id: &str) -> Result<Response, StorageError> {
        let response = request.bearer_auth(self.token()?).send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                StorageError::Credential(format!("HTTP {}: {}", status, error_text))
            }
            StatusCode::NOT_FOUND => StorageError::NotFound(id.to_string()),
            _ => StorageError::Http(format!("HTTP {}: {}", status, error_text)),
        })
    }
}

impl RemoteStorage for GoogleDriveStorage {
    type Error = StorageError;

    fn download(&self, id: &str, dest_dir: &Path) -> Result<DownloadedFile, StorageError> {
        let info = self.get_info(id)?;

        let request = self
            .client
            .get(self.file_url(id))
            .query(&[("alt", "media")]);
        let bytes = self.send(request, id)?.bytes()?;

        fs::create_dir_all(dest_dir)?;
        let local_path = dest_dir.join(local_file_name(&info.name, id));
        fs::write(&local_path, &bytes)?;

        info!("Downloaded {} ({} bytes) to {}", id, bytes.len(), local_path.display());
        Ok(DownloadedFile {
            path: local_path,
            info,
        })
    }

    fn get_info(&self, id: &str) -> Result<RemoteFileInfo, StorageError> {
        let request = self
            .client
            .get(self.file_url(id))
            .query(&[("fields", "id,name,parents")]);
        let resource: FileResource = self
            .send(request, id)?
            .json()
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;

        let name = resource
            .name
            .ok_or_else(|| StorageError::InvalidResponse(format!("file {} has no name", id)))?;
        debug!("Drive file {} is named {}", id, name);

        Ok(RemoteFileInfo {
            name,
            parent: resource.parents.into_iter().next(),
        })
    }

    fn upload(&self, local_path: &Path, parent: Option<&str>) -> Result<String, StorageError> {
        let name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                StorageError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("not a file path: {}", local_path.display()),
                ))
            })?;
        let data = fs::read(local_path)?;

        let mut file_metadata = serde_json::json!({ "name": name });
        if let Some(parent) = parent {
            file_metadata["parents"] = serde_json::json!([parent]);
        }

        let body = multipart_related_body(&file_metadata.to_string(), mime_type(local_path), &data);
        let url = format!("{}/files", self.config.upload_base.trim_end_matches('/'));
        let request = self
            .client
            .post(url)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(body);

        let resource: FileResource = self
            .send(request, &name)?
            .json()
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;
        let id = resource
            .id
            .ok_or_else(|| StorageError::InvalidResponse("upload response has no id".to_string()))?;

        info!("Uploaded {} as {}", local_path.display(), id);
        Ok(id)
    }
}

/// Final path component of a remote name, or the id when that is empty
fn local_file_name(name: &str, id: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| id.to_string())
}

fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => "application/json",
        Some("txt") | Some("md") => "text/plain",
        _ => "application/octet-stream",
    }
}

fn multipart_related_body(metadata_json: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + metadata_json.len() + 256);
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{m}\r\n--{b}\r\nContent-Type: {c}\r\n\r\n",
            b = MULTIPART_BOUNDARY,
            m = metadata_json,
            c = content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method, MockServer};
    use tempfile::TempDir;

    fn storage(base: &str, token: Option<&str>) -> GoogleDriveStorage {
        GoogleDriveStorage::new(DriveConfig {
            api_base: base.to_string(),
            upload_base: base.to_string(),
            access_token: token.map(str::to_string),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_missing_token_is_credential_error() {
        let drive = storage("http://127.0.0.1:9", None);
        assert!(matches!(
            drive.get_info("1AbCdEfGhIjKlMnOpQrStUvWxYz"),
            Err(StorageError::Credential(_))
        ));

        let blank = storage("http://127.0.0.1:9", Some("   "));
        assert!(matches!(blank.get_info("abc"), Err(StorageError::Credential(_))));
    }

    #[test]
    fn test_get_info_reads_name_and_first_parent() {
        let server = MockServer::start();
        let lookup = server.mock(|when, then| {
            when.method(Method::GET)
                .path("/files/abc")
                .query_param("fields", "id,name,parents")
                .header("authorization", "Bearer tok");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"{"id":"abc","name":"essay.txt","parents":["folder1","folder2"]}"#);
        });

        let info = storage(&server.base_url(), Some("tok")).get_info("abc").unwrap();

        assert_eq!(info.name, "essay.txt");
        assert_eq!(info.parent.as_deref(), Some("folder1"));
        lookup.assert();
    }

    #[test]
    fn test_get_info_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::GET).path("/files/missing");
            then.status(404).body(r#"{"error":"notFound"}"#);
        });

        let err = storage(&server.base_url(), Some("tok")).get_info("missing").unwrap_err();
        assert!(matches!(err, StorageError::NotFound(ref id) if id == "missing"));
    }

    #[test]
    fn test_download_writes_into_dest_dir() {
        let server = MockServer::start();
        let lookup = server.mock(|when, then| {
            when.method(Method::GET)
                .path("/files/abc")
                .query_param("fields", "id,name,parents");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"{"id":"abc","name":"../notes.txt","parents":["folder1"]}"#);
        });
        let media = server.mock(|when, then| {
            when.method(Method::GET)
                .path("/files/abc")
                .query_param("alt", "media")
                .header("authorization", "Bearer tok");
            then.status(200).body("document body");
        });
        let dir = TempDir::new().unwrap();

        let downloaded = storage(&server.base_url(), Some("tok"))
            .download("abc", dir.path())
            .unwrap();

        assert_eq!(downloaded.path, dir.path().join("notes.txt"));
        assert_eq!(downloaded.info.name, "../notes.txt");
        assert_eq!(downloaded.info.parent.as_deref(), Some("folder1"));
        assert_eq!(fs::read_to_string(&downloaded.path).unwrap(), "document body");
        lookup.assert();
        media.assert();
    }

    #[test]
    fn test_upload_sends_parent_and_returns_id() {
        let server = MockServer::start();
        let content_type = format!("multipart/related; boundary={}", MULTIPART_BOUNDARY);
        let upload = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/files")
                .query_param("uploadType", "multipart")
                .query_param("fields", "id")
                .header("content-type", content_type.as_str())
                .body_contains(r#""parents":["folder1"]"#)
                .body_contains(r#""name":"essay.metadata.json""#)
                .body_contains(r#"{"title":"x"}"#);
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"{"id":"new-id"}"#);
        });
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("essay.metadata.json");
        fs::write(&file, r#"{"title":"x"}"#).unwrap();

        let id = storage(&server.base_url(), Some("tok"))
            .upload(&file, Some("folder1"))
            .unwrap();

        assert_eq!(id, "new-id");
        upload.assert();
    }

    #[test]
    fn test_forbidden_is_credential_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::GET).path("/files/abc");
            then.status(403).body("insufficient scopes");
        });

        let err = storage(&server.base_url(), Some("tok")).get_info("abc").unwrap_err();
        assert!(matches!(err, StorageError::Credential(_)));
    }

    #[test]
    fn test_local_file_name_falls_back_to_id() {
        assert_eq!(local_file_name("a/b/c.txt", "id"), "c.txt");
        assert_eq!(local_file_name("", "id"), "id");
        assert_eq!(local_file_name("..", "id"), "id");
    }
}
