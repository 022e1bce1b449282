// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::Value;

use crate::core::report::{AnalysisRequest, PredictionRequest};
use crate::utils::http_client;

/// Capability interface for the external analysis service. The core only
/// shapes payloads and validates responses; transport lives behind this
/// trait so tests can swap in a canned provider.
pub trait AnalysisProvider {
    fn analyze(&self, request: &AnalysisRequest) -> Result<Value>;
    fn predict(&self, request: &PredictionRequest) -> Result<Value>;
}

/// POSTs payloads as JSON to a configured endpoint. The shared client
/// carries a 15s timeout, which bounds the only long-latency call in the
/// system.
pub struct HttpAnalysisProvider {
    endpoint: String,
    api_key: Option<String>,
}

impl HttpAnalysisProvider {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        HttpAnalysisProvider {
            endpoint: endpoint.into(),
            api_key,
        }
    }

    fn post<T: serde::Serialize>(&self, op: &str, payload: &T) -> Result<Value> {
        let client = http_client()?;
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), op);
        let mut req = client.post(url).json(payload);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send()?.error_for_status()?;
        Ok(resp.json()?)
    }
}

impl AnalysisProvider for HttpAnalysisProvider {
    fn analyze(&self, request: &AnalysisRequest) -> Result<Value> {
        self.post("analyze", request)
    }

    fn predict(&self, request: &PredictionRequest) -> Result<Value> {
        self.post("predict", request)
    }
}
