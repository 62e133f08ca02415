//! Handler for the `kantraviz/dashboard_metrics` method.

use serde::{Deserialize, Serialize};

use crate::models::analysis::AnalysisDocument;
use crate::transform::metrics::{
    self, ComponentHeat, DashboardMetrics, GraphData, IssueTypeCount,
};
use crate::KantravizResult;

/// Request carrying a previously transformed document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetricsRequest {
    pub document: AnalysisDocument,
}

/// All dashboard panel inputs derived from the document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetricsResponse {
    pub metrics: DashboardMetrics,
    pub issues_by_type: Vec<IssueTypeCount>,
    pub issues_by_component: Vec<ComponentHeat>,
    pub graph: GraphData,
}

pub struct DashboardMetricsHandler;

impl DashboardMetricsHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, request: DashboardMetricsRequest) -> KantravizResult<DashboardMetricsResponse> {
        let document = &request.document;
        Ok(DashboardMetricsResponse {
            metrics: metrics::dashboard_metrics(document),
            issues_by_type: metrics::issues_by_type(document),
            issues_by_component: metrics::issues_by_component(document),
            graph: metrics::graph_data(document),
        })
    }
}

impl Default for DashboardMetricsHandler {
    fn default() -> Self {
        Self::new()
    }
}
