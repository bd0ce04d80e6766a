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

use std::sync::Arc;

use log::debug;

use super::backend::Ipfs;
use super::core::IpfsCore;
use crate::raw::normalize_root;
use crate::raw::HttpClient;
use crate::IpfsConfig;
use crate::Result;

/// Default endpoint of the daemon's HTTP RPC API.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5001";

/// Default virtual filesystem root for path-based operations.
pub const DEFAULT_ROOT: &str = "/data";

/// Builder for [`Ipfs`].
#[doc = include_str!("docs.md")]
#[derive(Default, Debug)]
pub struct IpfsBuilder {
    config: IpfsConfig,

    http_client: Option<HttpClient>,
}

impl IpfsBuilder {
    /// Set root of the virtual filesystem namespace.
    ///
    /// Every relative path an operation receives is resolved under this
    /// root, exactly once.
    ///
    /// Default: `/data`
    pub fn root(mut self, root: &str) -> Self {
        self.config.root = if root.is_empty() {
            None
        } else {
            Some(root.to_string())
        };

        self
    }

    /// Set endpoint of the daemon.
    ///
    /// Default: `http://127.0.0.1:5001`
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.config.endpoint = if endpoint.is_empty() {
            None
        } else {
            Some(endpoint.to_string())
        };
        self
    }

    /// Specify the http client that used by this client.
    ///
    /// Tests use this to swap the transport for a mock [`HttpFetch`]
    /// implementor.
    ///
    /// [`HttpFetch`]: crate::raw::HttpFetch
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build an [`Ipfs`] client from this builder.
    ///
    /// Construction never touches the network; an unreachable daemon
    /// surfaces at call time.
    pub fn build(self) -> Result<Ipfs> {
        let root = normalize_root(&self.config.root.unwrap_or_else(|| DEFAULT_ROOT.to_string()));
        debug!("client use root {root}");

        let endpoint = self
            .config
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();
        debug!("client use endpoint {endpoint}");

        let client = self.http_client.unwrap_or_default();

        Ok(Ipfs::new(Arc::new(IpfsCore {
            root,
            endpoint,
            client,
        })))
    }
}

impl From<IpfsConfig> for IpfsBuilder {
    fn from(config: IpfsConfig) -> Self {
        Self {
            config,
            http_client: None,
        }
    }
}
