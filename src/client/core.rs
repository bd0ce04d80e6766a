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

use bytes::Bytes;
use http::Request;
use http::Response;

use crate::raw::build_rooted_abs_path;
use crate::raw::multicodec;
use crate::raw::new_request_build_error;
use crate::raw::normalize_path;
use crate::raw::percent_encode_path;
use crate::raw::FormDataPart;
use crate::raw::HttpClient;
use crate::raw::Multipart;
use crate::Result;

/// Core holds the fixed endpoint/root and performs the wire-level
/// request for each daemon capability.
///
/// Each method builds exactly one request and sends it through the
/// shared [`HttpClient`]; status interpretation and decoding happen in
/// the public surface.
pub struct IpfsCore {
    pub root: String,
    pub endpoint: String,
    pub client: HttpClient,
}

impl fmt::Debug for IpfsCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpfsCore")
            .field("root", &self.root)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl IpfsCore {
    /// Resolve a caller-relative path to the daemon's absolute virtual
    /// path, prefixing the root exactly once.
    fn rooted(&self, path: &str) -> String {
        build_rooted_abs_path(&self.root, &normalize_path(path))
    }

    /// Store a DAG block. The payload must already carry its multicodec
    /// input tag.
    pub async fn dag_put(&self, value: Bytes) -> Result<Response<Bytes>> {
        debug_assert!(
            multicodec::decode_raw_block(&value).is_ok(),
            "dag/put payload must carry the raw codec tag"
        );

        let url = format!(
            "{}/api/v0/dag/put?store-codec=raw&input-codec=raw",
            self.endpoint
        );

        let multipart =
            Multipart::new().part(FormDataPart::new("object data").content(value));

        let req = Request::post(url);
        let req = multipart.apply(req)?;

        self.client.send(req).await
    }

    /// Resolve a DAG node and return its JSON representation.
    pub async fn dag_get(&self, name: &str) -> Result<Response<Bytes>> {
        let url = format!(
            "{}/api/v0/dag/get?arg={}",
            self.endpoint,
            percent_encode_path(name)
        );

        let req = Request::post(url);
        let req = req.body(Bytes::new()).map_err(new_request_build_error)?;

        self.client.send(req).await
    }

    pub async fn files_mkdir(&self, path: &str) -> Result<Response<Bytes>> {
        let p = self.rooted(path);

        let url = format!(
            "{}/api/v0/files/mkdir?arg={}",
            self.endpoint,
            percent_encode_path(&p)
        );

        let req = Request::post(url);
        let req = req.body(Bytes::new()).map_err(new_request_build_error)?;

        self.client.send(req).await
    }

    pub async fn files_read(&self, path: &str) -> Result<Response<Bytes>> {
        let p = self.rooted(path);

        let url = format!(
            "{}/api/v0/files/read?arg={}",
            self.endpoint,
            percent_encode_path(&p)
        );

        let req = Request::post(url);
        let req = req.body(Bytes::new()).map_err(new_request_build_error)?;

        self.client.send(req).await
    }

    /// Import data and link it under the given virtual path.
    pub async fn add(&self, path: &str, value: Bytes) -> Result<Response<Bytes>> {
        let p = self.rooted(path);

        let url = format!(
            "{}/api/v0/add?to-files={}&raw-leaves=true",
            self.endpoint,
            percent_encode_path(&p)
        );

        let multipart = Multipart::new().part(FormDataPart::new("file").content(value));

        let req = Request::post(url);
        let req = multipart.apply(req)?;

        self.client.send(req).await
    }

    pub async fn files_stat(&self, path: &str) -> Result<Response<Bytes>> {
        let p = self.rooted(path);

        let url = format!(
            "{}/api/v0/files/stat?arg={}",
            self.endpoint,
            percent_encode_path(&p)
        );

        let req = Request::post(url);
        let req = req.body(Bytes::new()).map_err(new_request_build_error)?;

        self.client.send(req).await
    }

    pub async fn files_rm(&self, path: &str) -> Result<Response<Bytes>> {
        let p = self.rooted(path);

        let url = format!(
            "{}/api/v0/files/rm?arg={}&recursive=true",
            self.endpoint,
            percent_encode_path(&p)
        );

        let req = Request::post(url);
        let req = req.body(Bytes::new()).map_err(new_request_build_error)?;

        self.client.send(req).await
    }

    pub async fn files_ls(&self, path: &str) -> Result<Response<Bytes>> {
        let p = self.rooted(path);

        let url = format!(
            "{}/api/v0/files/ls?arg={}&long=true",
            self.endpoint,
            percent_encode_path(&p)
        );

        let req = Request::post(url);
        let req = req.body(Bytes::new()).map_err(new_request_build_error)?;

        self.client.send(req).await
    }

    pub async fn version(&self) -> Result<Response<Bytes>> {
        let url = format!("{}/api/v0/version", self.endpoint);

        let req = Request::post(url);
        let req = req.body(Bytes::new()).map_err(new_request_build_error)?;

        self.client.send(req).await
    }
}
