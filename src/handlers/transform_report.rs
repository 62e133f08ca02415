//! Handler for the `kantraviz/transform_report` method.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::config::ServerSettings;
use crate::models::analysis::AnalysisDocument;
use crate::transform::{self, TransformOptions};
use crate::{KantravizError, KantravizResult};

/// Request carrying raw report text plus transform options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformReportRequest {
    pub content: String,
    #[serde(default)]
    pub application_name: Option<String>,
    #[serde(default)]
    pub analysis_date: Option<String>,
}

pub struct TransformReportHandler {
    settings: Arc<ServerSettings>,
}

impl TransformReportHandler {
    pub fn new(settings: Arc<ServerSettings>) -> Self {
        Self { settings }
    }

    pub fn handle(&self, request: TransformReportRequest) -> KantravizResult<AnalysisDocument> {
        let size = request.content.len() as u64;
        let limit = self.settings.transform.max_input_size;
        if size > limit {
            return Err(KantravizError::InputTooLarge { size, limit });
        }

        let options = TransformOptions {
            application_name: request
                .application_name
                .or_else(|| self.settings.transform.application_name.clone()),
            analysis_date: request.analysis_date,
        };

        let document = transform::transform_report(&request.content, &options)?;
        info!(
            components = document.summary.total_components,
            issues = document.summary.total_issues,
            "Transformed analysis report"
        );
        Ok(document)
    }
}
