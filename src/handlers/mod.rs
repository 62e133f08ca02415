// Handlers module for request processing logic

pub mod dashboard_metrics;
pub mod transform_file;
pub mod transform_report;

pub use dashboard_metrics::{
    DashboardMetricsHandler, DashboardMetricsRequest, DashboardMetricsResponse,
};
pub use transform_file::{TransformFileHandler, TransformFileRequest};
pub use transform_report::{TransformReportHandler, TransformReportRequest};
