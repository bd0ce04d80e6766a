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

//! ipfsclient is a thin async client for the HTTP RPC API of a locally
//! running IPFS daemon ([Kubo](https://docs.ipfs.tech/reference/kubo/rpc/)).
//!
//! It maps a small set of filesystem-like and content-addressing
//! operations onto the daemon's wire conventions: paths are resolved
//! under a fixed virtual root, DAG blocks carry their multicodec tag,
//! and daemon errors come back as typed [`Error`]s. Each operation is a
//! single stateless request/response round trip; the daemon owns all
//! the interesting machinery.
//!
//! # Quick Start
//!
//! ```no_run
//! use anyhow::Result;
//! use ipfsclient::Ipfs;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Ipfs::builder()
//!         .endpoint("http://127.0.0.1:5001")
//!         .build()?;
//!
//!     client.create_dir("blobs").await?;
//!     client.add("blobs/hello.txt", "Hello, World!").await?;
//!
//!     let bs = client.read("blobs/hello.txt").await?;
//!     println!("{}", String::from_utf8_lossy(&bs));
//!
//!     let cid = client.dag_put(&b"raw block"[..]).await?;
//!     println!("stored block {cid}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unused_qualifications)]

mod types;
pub use types::*;

pub mod raw;

mod client;
pub use client::*;
