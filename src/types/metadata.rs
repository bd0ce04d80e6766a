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

use crate::EntryMode;

/// Metadata carries all the daemon-reported information about an entry
/// in the mutable filesystem.
///
/// This is the decoded shape of a `files/stat` response. Fields the
/// daemon doesn't report for a given entry stay at their defaults.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Metadata {
    mode: EntryMode,

    size: u64,
    cumulative_size: u64,
    blocks: u64,
    hash: Option<String>,
}

impl Metadata {
    /// Create a new metadata with the given entry mode.
    pub fn new(mode: EntryMode) -> Self {
        Self {
            mode,
            size: 0,
            cumulative_size: 0,
            blocks: 0,
            hash: None,
        }
    }

    /// Mode of this entry.
    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    /// Returns `true` if this metadata is for a file.
    pub fn is_file(&self) -> bool {
        self.mode.is_file()
    }

    /// Returns `true` if this metadata is for a directory.
    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    /// Size of the entry's own data in bytes.
    ///
    /// The daemon reports `0` for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Set size of this entry.
    pub fn set_size(&mut self, v: u64) -> &mut Self {
        self.size = v;
        self
    }

    /// With size of this entry.
    pub fn with_size(mut self, v: u64) -> Self {
        self.size = v;
        self
    }

    /// Cumulative size of the entry and everything below it, DAG
    /// framing included.
    pub fn cumulative_size(&self) -> u64 {
        self.cumulative_size
    }

    /// Set cumulative size of this entry.
    pub fn set_cumulative_size(&mut self, v: u64) -> &mut Self {
        self.cumulative_size = v;
        self
    }

    /// With cumulative size of this entry.
    pub fn with_cumulative_size(mut self, v: u64) -> Self {
        self.cumulative_size = v;
        self
    }

    /// Number of DAG blocks the entry spans.
    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    /// Set block count of this entry.
    pub fn set_blocks(&mut self, v: u64) -> &mut Self {
        self.blocks = v;
        self
    }

    /// With block count of this entry.
    pub fn with_blocks(mut self, v: u64) -> Self {
        self.blocks = v;
        self
    }

    /// CID of the entry as reported by the daemon.
    ///
    /// The hash is an opaque token; this client never parses or
    /// validates it.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Set hash of this entry.
    pub fn set_hash(&mut self, v: &str) -> &mut Self {
        self.hash = Some(v.to_string());
        self
    }

    /// With hash of this entry.
    pub fn with_hash(mut self, v: String) -> Self {
        self.hash = Some(v);
        self
    }
}
