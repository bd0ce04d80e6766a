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

use crate::Metadata;

/// Entry is the file/dir entry returned by [`Ipfs::list`][crate::Ipfs::list].
///
/// Paths are relative to the configured root. Directory entries carry a
/// trailing `/`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    path: String,
    metadata: Metadata,
}

impl Entry {
    /// Create an entry with its relative path and metadata.
    pub fn new(path: &str, metadata: Metadata) -> Self {
        Self {
            path: path.to_string(),
            metadata,
        }
    }

    /// Path of entry, relative to the configured root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of entry: the last segment of the path.
    ///
    /// If this entry is a dir, `name` MUST end with `/`; otherwise it
    /// MUST be a file name.
    pub fn name(&self) -> &str {
        get_basename(&self.path)
    }

    /// Fetch metadata of this entry.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Consume this entry to get its path and metadata.
    pub fn into_parts(self) -> (String, Metadata) {
        (self.path, self.metadata)
    }
}

/// Get basename from path.
fn get_basename(path: &str) -> &str {
    if path == "/" {
        return "/";
    }

    if !path.ends_with('/') {
        return path
            .split('/')
            .next_back()
            .expect("file path without name is invalid");
    }

    // The path ends with `/`, it's a dir: take the last two components.
    let mut lhs = path.trim_end_matches('/').rsplitn(2, '/');
    let name = lhs.next().expect("dir path without name is invalid");
    let index = path.len() - name.len() - 1;

    &path[index..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename() {
        let cases = vec![
            ("file path", "abc", "abc"),
            ("dir path", "abc/", "abc/"),
            ("file path in dir", "abc/def", "def"),
            ("dir path in dir", "abc/def/", "def/"),
        ];

        for (name, input, expect) in cases {
            let actual = get_basename(input);
            assert_eq!(actual, expect, "{name}");
        }
    }
}
