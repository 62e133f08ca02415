//! Handler for the `kantraviz/transform_file` method.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::ServerSettings;
use crate::models::analysis::AnalysisDocument;
use crate::transform::{self, TransformOptions};
use crate::{KantravizError, KantravizResult};

/// Request pointing at a report file on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformFileRequest {
    pub path: String,
    #[serde(default)]
    pub application_name: Option<String>,
    #[serde(default)]
    pub analysis_date: Option<String>,
}

pub struct TransformFileHandler {
    settings: Arc<ServerSettings>,
}

impl TransformFileHandler {
    pub fn new(settings: Arc<ServerSettings>) -> Self {
        Self { settings }
    }

    pub async fn handle(&self, request: TransformFileRequest) -> KantravizResult<AnalysisDocument> {
        let path = Path::new(&request.path);
        if !path.exists() {
            return Err(KantravizError::report(
                "Report file not found",
                Some(request.path.clone()),
            ));
        }

        // Reject oversized reports before reading them into memory
        let size = tokio::fs::metadata(path).await?.len();
        let limit = self.settings.transform.max_input_size;
        if size > limit {
            return Err(KantravizError::InputTooLarge { size, limit });
        }

        let content = tokio::fs::read_to_string(path).await?;

        let options = TransformOptions {
            application_name: request
                .application_name
                .or_else(|| self.settings.transform.application_name.clone()),
            analysis_date: request.analysis_date,
        };

        let document = transform::transform_report(&content, &options)?;
        info!(
            path = %request.path,
            components = document.summary.total_components,
            issues = document.summary.total_issues,
            "Transformed analysis report from file"
        );
        Ok(document)
    }
}
