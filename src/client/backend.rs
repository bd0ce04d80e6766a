// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::builder::IpfsBuilder;
use super::core::IpfsCore;
use super::error::parse_error;
use crate::raw::multicodec;
use crate::raw::new_json_deserialize_error;
use crate::Entry;
use crate::EntryMode;
use crate::ErrorKind;
use crate::Metadata;
use crate::Result;

/// Client for the HTTP RPC API of a local IPFS daemon.
#[doc = include_str!("docs.md")]
#[derive(Clone)]
pub struct Ipfs {
    core: Arc<IpfsCore>,
}

impl fmt::Debug for Ipfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ipfs")
            .field("root", &self.core.root)
            .field("endpoint", &self.core.endpoint)
            .finish()
    }
}

impl Ipfs {
    pub(super) fn new(core: Arc<IpfsCore>) -> Self {
        Self { core }
    }

    /// Create a default [`IpfsBuilder`].
    pub fn builder() -> IpfsBuilder {
        IpfsBuilder::default()
    }

    /// The normalized virtual filesystem root, like `/data/`.
    pub fn root(&self) -> &str {
        &self.core.root
    }

    /// The daemon endpoint, without trailing `/`.
    pub fn endpoint(&self) -> &str {
        &self.core.endpoint
    }

    /// Store a payload as a raw-codec DAG block and return its CID.
    ///
    /// The payload is prefixed with the `raw` multicodec tag before
    /// transmission; the CID is returned as the opaque string the daemon
    /// reports.
    pub async fn dag_put(&self, value: impl Into<Bytes>) -> Result<String> {
        let block = multicodec::encode_raw_block(value.into());

        let resp = self.core.dag_put(block).await?;

        match resp.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let res: DagPutResponse = serde_json::from_slice(&resp.into_body())
                    .map_err(new_json_deserialize_error)?;

                Ok(res.cid.value)
            }
            _ => Err(parse_error(resp)),
        }
    }

    /// Resolve a DAG node by CID or name and decode its JSON
    /// representation into `T`.
    ///
    /// Use [`serde_json::Value`] as `T` when the shape isn't known up
    /// front.
    pub async fn dag_get<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let resp = self.core.dag_get(name).await?;

        match resp.status() {
            StatusCode::OK => {
                serde_json::from_slice(&resp.into_body()).map_err(new_json_deserialize_error)
            }
            _ => Err(parse_error(resp)),
        }
    }

    /// Create a directory under the virtual root.
    ///
    /// Success is silent; the daemon returns an empty body.
    pub async fn create_dir(&self, path: &str) -> Result<()> {
        let resp = self.core.files_mkdir(path).await?;

        match resp.status() {
            StatusCode::CREATED | StatusCode::OK => Ok(()),
            _ => Err(parse_error(resp)),
        }
    }

    /// Read a file and return the daemon's response bytes, unmodified.
    pub async fn read(&self, path: &str) -> Result<Bytes> {
        let resp = self.core.files_read(path).await?;

        match resp.status() {
            StatusCode::OK => Ok(resp.into_body()),
            _ => Err(parse_error(resp)),
        }
    }

    /// Import data and link it at the given path, with raw leaves.
    ///
    /// The content hash the daemon reports is discarded; callers that
    /// need it should [`stat`][Ipfs::stat] the path afterwards.
    pub async fn add(&self, path: &str, value: impl Into<Bytes>) -> Result<()> {
        let resp = self.core.add(path, value.into()).await?;

        match resp.status() {
            StatusCode::CREATED | StatusCode::OK => Ok(()),
            _ => Err(parse_error(resp)),
        }
    }

    /// Stat an entry under the virtual root.
    ///
    /// A missing path surfaces as [`ErrorKind::NotFound`]; use
    /// [`exists`][Ipfs::exists] for the boolean form.
    pub async fn stat(&self, path: &str) -> Result<Metadata> {
        let resp = self.core.files_stat(path).await?;

        match resp.status() {
            StatusCode::OK => {
                let res: IpfsStatResponse = serde_json::from_slice(&resp.into_body())
                    .map_err(new_json_deserialize_error)?;

                let mode = match res.file_type.as_str() {
                    "file" => EntryMode::FILE,
                    "directory" => EntryMode::DIR,
                    _ => EntryMode::Unknown,
                };

                let mut meta = Metadata::new(mode)
                    .with_size(res.size)
                    .with_cumulative_size(res.cumulative_size)
                    .with_blocks(res.blocks);
                if !res.hash.is_empty() {
                    meta.set_hash(&res.hash);
                }

                Ok(meta)
            }
            _ => Err(parse_error(resp)),
        }
    }

    /// Check if an entry exists under the virtual root.
    ///
    /// Defined entirely in terms of [`stat`][Ipfs::stat]: `Ok(true)` when
    /// stat succeeds, `Ok(false)` only when stat fails with
    /// [`ErrorKind::NotFound`]. Any other failure is re-raised rather
    /// than swallowed.
    pub async fn exists(&self, path: &str) -> Result<bool> {
        match self.stat(path).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Remove an entry, recursively when it's a directory.
    ///
    /// The recursive flag is always sent so files and directories delete
    /// through the same call.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let resp = self.core.files_rm(path).await?;

        match resp.status() {
            StatusCode::OK => Ok(()),
            _ => Err(parse_error(resp)),
        }
    }

    /// List a directory under the virtual root.
    ///
    /// Entry paths are relative to the root; directories carry a trailing
    /// `/`. An empty directory yields an empty vec.
    pub async fn list(&self, path: &str) -> Result<Vec<Entry>> {
        let resp = self.core.files_ls(path).await?;

        if resp.status() != StatusCode::OK {
            return Err(parse_error(resp));
        }

        let res: IpfsLsResponse =
            serde_json::from_slice(&resp.into_body()).map_err(new_json_deserialize_error)?;

        let dir = {
            let p = crate::raw::normalize_path(path);
            if p == "/" {
                String::new()
            } else if p.ends_with('/') {
                p
            } else {
                p + "/"
            }
        };

        let entries = res
            .entries
            .unwrap_or_default()
            .into_iter()
            .map(|object| {
                let mode = object.mode();
                let path = match mode {
                    EntryMode::DIR => format!("{}{}/", dir, object.name),
                    _ => format!("{}{}", dir, object.name),
                };

                let mut meta = Metadata::new(mode).with_size(object.size);
                if !object.hash.is_empty() {
                    meta.set_hash(&object.hash);
                }

                Entry::new(&path, meta)
            })
            .collect();

        Ok(entries)
    }

    /// Fetch the daemon's version information.
    ///
    /// Doubles as the cheapest liveness probe for the daemon.
    pub async fn version(&self) -> Result<Version> {
        let resp = self.core.version().await?;

        match resp.status() {
            StatusCode::OK => {
                serde_json::from_slice(&resp.into_body()).map_err(new_json_deserialize_error)
            }
            _ => Err(parse_error(resp)),
        }
    }
}

/// Version information reported by the daemon.
#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
#[non_exhaustive]
pub struct Version {
    /// Daemon version, like `0.29.0`.
    #[serde(rename = "Version")]
    pub version: String,
    /// Git commit the daemon was built from.
    #[serde(rename = "Commit")]
    pub commit: String,
    /// Repo (datastore) version.
    #[serde(rename = "Repo")]
    pub repo: String,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct DagPutResponse {
    #[serde(rename = "Cid")]
    cid: Cid,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct Cid {
    #[serde(rename = "/")]
    value: String,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct IpfsStatResponse {
    #[serde(rename = "Hash")]
    hash: String,
    #[serde(rename = "Size")]
    size: u64,
    #[serde(rename = "CumulativeSize")]
    cumulative_size: u64,
    #[serde(rename = "Blocks")]
    blocks: u64,
    #[serde(rename = "Type")]
    file_type: String,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct IpfsLsResponseEntry {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    file_type: i64,
    #[serde(rename = "Size")]
    size: u64,
    #[serde(rename = "Hash")]
    hash: String,
}

impl IpfsLsResponseEntry {
    /// ref: <https://github.com/ipfs/specs/blob/main/UNIXFS.md#data-format>
    ///
    /// ```protobuf
    /// enum DataType {
    ///     Raw = 0;
    ///     Directory = 1;
    ///     File = 2;
    ///     Metadata = 3;
    ///     Symlink = 4;
    ///     HAMTShard = 5;
    /// }
    /// ```
    fn mode(&self) -> EntryMode {
        match &self.file_type {
            1 => EntryMode::DIR,
            0 | 2 => EntryMode::FILE,
            _ => EntryMode::Unknown,
        }
    }
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct IpfsLsResponse {
    #[serde(rename = "Entries")]
    entries: Option<Vec<IpfsLsResponseEntry>>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use http::Request;
    use http::Response;
    use http::StatusCode;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::raw::HttpClient;
    use crate::raw::HttpFetch;

    /// Mock HTTP client that captures the request and answers with a
    /// canned status and body.
    #[derive(Clone)]
    struct MockHttpClient {
        status: StatusCode,
        body: Bytes,
        url: Arc<Mutex<Option<String>>>,
        request_body: Arc<Mutex<Option<Bytes>>>,
    }

    impl MockHttpClient {
        fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
            Self {
                status,
                body: body.into(),
                url: Arc::new(Mutex::new(None)),
                request_body: Arc::new(Mutex::new(None)),
            }
        }

        fn captured_url(&self) -> String {
            self.url.lock().unwrap().clone().unwrap()
        }

        fn captured_request_body(&self) -> Bytes {
            self.request_body.lock().unwrap().clone().unwrap()
        }
    }

    impl HttpFetch for MockHttpClient {
        async fn fetch(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
            *self.url.lock().unwrap() = Some(req.uri().to_string());
            *self.request_body.lock().unwrap() = Some(req.into_body());

            Ok(Response::builder()
                .status(self.status)
                .body(self.body.clone())
                .unwrap())
        }
    }

    fn create_test_client(status: StatusCode, body: impl Into<Bytes>) -> (Ipfs, MockHttpClient) {
        let mock = MockHttpClient::new(status, body);
        let client = Ipfs::builder()
            .http_client(HttpClient::with(mock.clone()))
            .build()
            .unwrap();
        (client, mock)
    }

    fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[tokio::test]
    async fn test_dag_put_returns_cid() -> Result<()> {
        let (client, mock) =
            create_test_client(StatusCode::OK, r#"{"Cid": {"/": "bafy123"}}"#);

        let cid = client.dag_put("hello".as_bytes()).await?;
        assert_eq!(cid, "bafy123");

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/dag/put?store-codec=raw&input-codec=raw"
        );

        // The transmitted part content carries the raw multicodec tag.
        let body = mock.captured_request_body();
        assert!(contains_subslice(&body, b"\r\n\x55hello\r\n"));
        assert!(contains_subslice(
            &body,
            b"content-disposition: form-data; name=\"object data\""
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_dag_get_decodes_json() -> Result<()> {
        let (client, mock) =
            create_test_client(StatusCode::OK, r#"{"answer": 42}"#);

        let value: serde_json::Value = client.dag_get("bafy123").await?;
        assert_eq!(value["answer"], 42);

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/dag/get?arg=bafy123"
        );
        assert!(mock.captured_request_body().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_dir_sends_rooted_arg() -> Result<()> {
        let (client, mock) = create_test_client(StatusCode::OK, "");

        client.create_dir("foo").await?;

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/files/mkdir?arg=/data/foo"
        );
        assert!(mock.captured_request_body().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_rooted_arg_is_prefixed_exactly_once() -> Result<()> {
        // A leading slash in the caller path must not double the root.
        let (client, mock) = create_test_client(StatusCode::OK, "");

        client.create_dir("/foo/bar").await?;

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/files/mkdir?arg=/data/foo/bar"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_read_returns_exact_bytes() -> Result<()> {
        let body: &[u8] = b"exact \x00\x01 bytes";
        let (client, mock) = create_test_client(StatusCode::OK, body);

        let bs = client.read("foo/bar.txt").await?;
        assert_eq!(&bs[..], body);

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/files/read?arg=/data/foo/bar.txt"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_add_sets_raw_leaves_and_discards_hash() -> Result<()> {
        let (client, mock) =
            create_test_client(StatusCode::OK, r#"{"Hash": "QmHash", "Size": "5"}"#);

        // Returns unit even though the daemon reported a hash.
        client.add("blobs/hello.txt", "hello").await?;

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/add?to-files=/data/blobs/hello.txt&raw-leaves=true"
        );

        let body = mock.captured_request_body();
        assert!(contains_subslice(
            &body,
            b"content-disposition: form-data; name=\"file\""
        ));
        assert!(contains_subslice(&body, b"\r\nhello\r\n"));

        Ok(())
    }

    #[tokio::test]
    async fn test_stat_decodes_metadata() -> Result<()> {
        let (client, mock) = create_test_client(
            StatusCode::OK,
            r#"{"Hash":"QmStat","Size":5,"CumulativeSize":13,"Blocks":1,"Type":"file"}"#,
        );

        let meta = client.stat("blobs/hello.txt").await?;
        assert_eq!(meta.mode(), EntryMode::FILE);
        assert_eq!(meta.size(), 5);
        assert_eq!(meta.cumulative_size(), 13);
        assert_eq!(meta.blocks(), 1);
        assert_eq!(meta.hash(), Some("QmStat"));

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/files/stat?arg=/data/blobs/hello.txt"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_stat_propagates_not_found() {
        let (client, _) = create_test_client(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"Message":"file does not exist","Code":0,"Type":"error"}"#,
        );

        let err = client.stat("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_exists_true_on_stat_success() -> Result<()> {
        let (client, _) = create_test_client(
            StatusCode::OK,
            r#"{"Hash":"QmStat","Size":5,"CumulativeSize":13,"Blocks":1,"Type":"file"}"#,
        );

        assert!(client.exists("blobs/hello.txt").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_exists_false_on_404() -> Result<()> {
        let (client, _) = create_test_client(StatusCode::NOT_FOUND, "");

        assert!(!client.exists("missing").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_exists_false_on_500_missing_file() -> Result<()> {
        let (client, _) = create_test_client(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"Message":"file does not exist","Code":0,"Type":"error"}"#,
        );

        assert!(!client.exists("missing").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_exists_reraises_unrelated_failure() {
        let (client, _) = create_test_client(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"Message":"merkledag: broken","Code":0,"Type":"error"}"#,
        );

        let err = client.exists("somewhere").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[tokio::test]
    async fn test_delete_always_recursive() -> Result<()> {
        let (client, mock) = create_test_client(StatusCode::OK, "");

        client.delete("a/b").await?;

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/files/rm?arg=/data/a/b&recursive=true"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_list_maps_entries() -> Result<()> {
        let (client, mock) = create_test_client(
            StatusCode::OK,
            r#"{"Entries":[
                {"Name":"sub","Type":1,"Size":0,"Hash":"QmDir"},
                {"Name":"a.txt","Type":0,"Size":5,"Hash":"QmFile"}
            ]}"#,
        );

        let entries = client.list("blobs").await?;

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/files/ls?arg=/data/blobs&long=true"
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path(), "blobs/sub/");
        assert!(entries[0].metadata().is_dir());
        assert_eq!(entries[1].path(), "blobs/a.txt");
        assert!(entries[1].metadata().is_file());
        assert_eq!(entries[1].metadata().size(), 5);
        assert_eq!(entries[1].metadata().hash(), Some("QmFile"));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_root_and_null_entries() -> Result<()> {
        let (client, mock) = create_test_client(StatusCode::OK, r#"{"Entries":null}"#);

        let entries = client.list("/").await?;
        assert!(entries.is_empty());

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/files/ls?arg=/data/&long=true"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_version() -> Result<()> {
        let (client, mock) = create_test_client(
            StatusCode::OK,
            r#"{"Version":"0.29.0","Commit":"abcd123","Repo":"15"}"#,
        );

        let version = client.version().await?;
        assert_eq!(version.version, "0.29.0");
        assert_eq!(version.commit, "abcd123");
        assert_eq!(version.repo, "15");

        assert_eq!(
            mock.captured_url(),
            "http://127.0.0.1:5001/api/v0/version"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_read_propagates_daemon_error() {
        let (client, _) = create_test_client(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"Message":"file does not exist","Code":0,"Type":"error"}"#,
        );

        // Unlike exists, read must surface NotFound as an error.
        let err = client.read("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_dag_get_malformed_json_propagates() {
        let (client, _) = create_test_client(StatusCode::OK, "{not json");

        let err = client
            .dag_get::<serde_json::Value>("bafy123")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[tokio::test]
    async fn test_custom_root_and_endpoint() -> Result<()> {
        let mock = MockHttpClient::new(StatusCode::OK, "");
        let client = Ipfs::builder()
            .root("/mfs")
            .endpoint("http://localhost:5002")
            .http_client(HttpClient::with(mock.clone()))
            .build()?;

        client.create_dir("foo").await?;

        assert_eq!(
            mock.captured_url(),
            "http://localhost:5002/api/v0/files/mkdir?arg=/mfs/foo"
        );

        Ok(())
    }
}
