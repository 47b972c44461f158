//! AWS Signature Version 4 query-string signing for S3 object URLs.
//!
//! Only what the owner API needs: presigned `PUT` (with a bound content type)
//! and presigned `GET` for a single object key, payload left unsigned.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use url::Url;

use crate::domain::storage::service::{UrlSigner, PRESIGNED_URL_EXPIRY_SECS};
use crate::utils::{config::AppConfig, errors::ApiError};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";
const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

#[derive(Clone, Debug)]
pub struct S3Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

#[derive(Clone, Debug)]
pub struct S3Presigner {
    bucket: String,
    region: String,
    credentials: S3Credentials,
    /// Path-style endpoint such as `http://localhost:9000`; virtual-hosted AWS otherwise.
    endpoint: Option<Url>,
    expires_in: u64,
}

impl S3Presigner {
    pub fn new(bucket: &str, region: &str, credentials: S3Credentials) -> Self {
        S3Presigner {
            bucket: bucket.to_string(),
            region: region.to_string(),
            credentials,
            endpoint: None,
            expires_in: PRESIGNED_URL_EXPIRY_SECS,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let credentials = S3Credentials {
            access_key_id: config.access_key_id.clone(),
            secret_access_key: config.secret_access_key.clone(),
            session_token: config.session_token.clone(),
        };
        let presigner = Self::new(&config.bucket_name, &config.region, credentials);
        match &config.s3_endpoint {
            Some(endpoint) => presigner.with_endpoint(endpoint),
            None => Ok(presigner),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ApiError> {
        let url = Url::parse(endpoint)
            .map_err(|e| ApiError::InvalidData(format!("Invalid S3 endpoint {}: {}", endpoint, e)))?;
        if url.host_str().is_none() {
            return Err(ApiError::InvalidData(format!("Invalid S3 endpoint {}: missing host", endpoint)));
        }
        self.endpoint = Some(url);
        Ok(self)
    }

    pub fn presign_at(
        &self,
        method: &str,
        key: &str,
        content_type: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, ApiError> {
        self.validate_bucket()?;

        let (base, host, canonical_uri) = self.object_location(key);
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();
        let scope = format!("{}/{}/{}/aws4_request", date, self.region, SERVICE);

        let signed_headers = if content_type.is_some() { "content-type;host" } else { "host" };

        let mut query = vec![
            ("X-Amz-Algorithm".to_string(), ALGORITHM.to_string()),
            ("X-Amz-Credential".to_string(), format!("{}/{}", self.credentials.access_key_id, scope)),
            ("X-Amz-Date".to_string(), amz_date.clone()),
            ("X-Amz-Expires".to_string(), self.expires_in.to_string()),
            ("X-Amz-SignedHeaders".to_string(), signed_headers.to_string()),
        ];
        if let Some(token) = &self.credentials.session_token {
            query.push(("X-Amz-Security-Token".to_string(), token.clone()));
        }
        let canonical_query = canonical_query_string(&query);

        let mut canonical_headers = String::new();
        if let Some(content_type) = content_type {
            canonical_headers.push_str(&format!("content-type:{}\n", content_type.trim()));
        }
        canonical_headers.push_str(&format!("host:{}\n", host));

        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            method, canonical_uri, canonical_query, canonical_headers, signed_headers, UNSIGNED_PAYLOAD
        );
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let key = signing_key(&self.credentials.secret_access_key, &date, &self.region, SERVICE);
        let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes()));

        Ok(format!("{}{}?{}&X-Amz-Signature={}", base, canonical_uri, canonical_query, signature))
    }

    fn validate_bucket(&self) -> Result<(), ApiError> {
        if self.bucket.trim().is_empty() || self.bucket.starts_with("arn:") {
            log::error!("Invalid bucket name configuration");
            return Err(ApiError::BadRequest("Invalid or missing S3_BUCKET_NAME environment variable".to_string()));
        }
        Ok(())
    }

    /// Returns `(scheme://authority, host header, canonical path)`.
    fn object_location(&self, key: &str) -> (String, String, String) {
        let encoded_key = uri_encode(key, false);
        match &self.endpoint {
            Some(endpoint) => {
                let host = match (endpoint.host_str(), endpoint.port()) {
                    (Some(host), Some(port)) => format!("{}:{}", host, port),
                    (Some(host), None) => host.to_string(),
                    (None, _) => String::new(),
                };
                let base = format!("{}://{}", endpoint.scheme(), host);
                let path = format!("/{}/{}", uri_encode(&self.bucket, true), encoded_key);
                (base, host, path)
            }
            None => {
                let host = format!("{}.s3.{}.amazonaws.com", self.bucket, self.region);
                (format!("https://{}", host), host, format!("/{}", encoded_key))
            }
        }
    }
}

impl UrlSigner for S3Presigner {
    fn presign_put(&self, key: &str, content_type: &str) -> Result<String, ApiError> {
        self.presign_at("PUT", key, Some(content_type), Utc::now())
    }

    fn presign_get(&self, key: &str) -> Result<String, ApiError> {
        self.presign_at("GET", key, None, Utc::now())
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = match HmacSha256::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA256 accepts keys of any size"),
    };
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

fn canonical_query_string(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (uri_encode(k, true), uri_encode(v, true)))
        .collect();
    encoded.sort();
    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// RFC 3986 encoding as SigV4 expects it. `/` survives only in paths.
fn uri_encode(input: &str, encode_slash: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            b'/' if !encode_slash => out.push('/'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
