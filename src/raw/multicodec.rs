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

//! Multicodec prefix handling for DAG block payloads.
//!
//! The daemon expects `dag/put` payloads to start with the varint code of
//! the input codec. Only the `raw` codec is needed here.
//!
//! ref: <https://github.com/multiformats/multicodec/blob/master/table.csv>

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;

use crate::Error;
use crate::ErrorKind;
use crate::Result;

/// Multicodec code of the `raw` codec.
pub const CODEC_RAW: u64 = 0x55;

/// Prepend the `raw` multicodec tag to a DAG block payload.
pub fn encode_raw_block(data: Bytes) -> Bytes {
    let mut bs = BytesMut::with_capacity(data.len() + varint_len(CODEC_RAW));
    put_uvarint(&mut bs, CODEC_RAW);
    bs.extend_from_slice(&data);
    bs.freeze()
}

/// Strip the `raw` multicodec tag from a DAG block payload.
///
/// Returns the payload bytes that follow the tag. Fails if the varint is
/// truncated or names a codec other than `raw`.
pub fn decode_raw_block(data: &[u8]) -> Result<&[u8]> {
    let (code, read) = get_uvarint(data)?;
    if code != CODEC_RAW {
        return Err(
            Error::new(ErrorKind::Unexpected, "block is not raw codec")
                .with_context("codec", format!("{code:#x}")),
        );
    }
    Ok(&data[read..])
}

/// Write `v` as an unsigned LEB128 varint.
fn put_uvarint(bs: &mut BytesMut, mut v: u64) {
    while v >= 0x80 {
        bs.put_u8((v as u8) | 0x80);
        v >>= 7;
    }
    bs.put_u8(v as u8);
}

/// Read an unsigned LEB128 varint, returning the value and bytes consumed.
fn get_uvarint(bs: &[u8]) -> Result<(u64, usize)> {
    let mut v: u64 = 0;
    for (i, b) in bs.iter().enumerate() {
        // 10 bytes is the longest encoding of a u64.
        if i >= 10 {
            return Err(Error::new(ErrorKind::Unexpected, "varint overflows u64"));
        }
        v |= u64::from(b & 0x7f) << (7 * i);
        if b & 0x80 == 0 {
            return Ok((v, i + 1));
        }
    }
    Err(Error::new(ErrorKind::Unexpected, "varint is truncated"))
}

fn varint_len(v: u64) -> usize {
    (64 - v.max(1).leading_zeros() as usize).div_ceil(7)
}
