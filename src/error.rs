// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures produced by the computation core. IO and provider failures
/// live at the command layer as `anyhow` errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("{0} not found")]
    NotFound(String),

    #[error("analysis response schema violation: {0}")]
    SchemaViolation(String),

    #[error("analysis response has empty recommendations or risks")]
    EmptyRecommendations,
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
