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

use bytes::Bytes;
use http::Response;
use http::StatusCode;
use serde::Deserialize;
use serde_json::de;

use crate::raw::with_error_response_context;
use crate::Error;
use crate::ErrorKind;

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct IpfsError {
    #[serde(rename = "Message")]
    message: String,
    #[serde(rename = "Code")]
    code: usize,
    #[serde(rename = "Type")]
    ty: String,
}

/// Parse a non-2xx daemon response into an [`Error`].
///
/// > Status code 500 means that the function does exist, but IPFS was not
/// > able to fulfil the request because of an error.
/// > To know that reason, you have to look at the error message that is
/// > usually returned with the body of the response
/// > (if no error, check the daemon logs).
///
/// ref: https://docs.ipfs.tech/reference/kubo/rpc/#http-status-codes
pub(super) fn parse_error(resp: Response<Bytes>) -> Error {
    let (parts, bs) = resp.into_parts();

    let ipfs_error = de::from_slice::<IpfsError>(&bs).ok();

    let (kind, retryable) = match parts.status {
        StatusCode::NOT_FOUND => (ErrorKind::NotFound, false),
        StatusCode::FORBIDDEN => (ErrorKind::PermissionDenied, false),
        StatusCode::TOO_MANY_REQUESTS => (ErrorKind::RateLimited, true),
        StatusCode::INTERNAL_SERVER_ERROR => {
            if let Some(ie) = &ipfs_error {
                match ie.message.as_str() {
                    "file does not exist" => (ErrorKind::NotFound, false),
                    _ => (ErrorKind::Unexpected, false),
                }
            } else {
                (ErrorKind::Unexpected, false)
            }
        }
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            (ErrorKind::Unexpected, true)
        }
        _ => (ErrorKind::Unexpected, false),
    };

    let message = match ipfs_error {
        Some(ipfs_error) => format!("{ipfs_error:?}"),
        None => String::from_utf8_lossy(&bs).into_owned(),
    };

    let mut err = Error::new(kind, message);

    err = with_error_response_context(err, parts);

    if retryable {
        err = err.set_temporary();
    }

    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, body: &'static [u8]) -> Response<Bytes> {
        Response::builder()
            .status(status)
            .body(Bytes::from_static(body))
            .unwrap()
    }

    #[test]
    fn test_parse_404() {
        let err = parse_error(response(
            StatusCode::NOT_FOUND,
            br#"{"Message":"not found","Code":0,"Type":"error"}"#,
        ));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!err.is_temporary());
    }

    #[test]
    fn test_parse_500_missing_file() {
        let err = parse_error(response(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"Message":"file does not exist","Code":0,"Type":"error"}"#,
        ));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_parse_500_other() {
        let err = parse_error(response(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"Message":"merkledag: not a unixfs node","Code":0,"Type":"error"}"#,
        ));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(!err.is_temporary());
    }

    #[test]
    fn test_parse_429() {
        let err = parse_error(response(StatusCode::TOO_MANY_REQUESTS, b""));
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert!(err.is_temporary());
    }

    #[test]
    fn test_parse_503_is_temporary() {
        let err = parse_error(response(StatusCode::SERVICE_UNAVAILABLE, b"unavailable"));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.is_temporary());
    }

    #[test]
    fn test_parse_non_json_body() {
        let err = parse_error(response(StatusCode::BAD_REQUEST, b"plain text failure"));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.to_string().contains("plain text failure"));
    }
}
