// Report generation endpoints
//
// Reports are produced server-side; the client only requests generation
// and receives artifact references or pre-aggregated JSON.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{DashboardData, ReportRef};

impl ApiClient {
    /// `POST /reports/dashboard`
    pub async fn generate_dashboard_report(&self) -> Result<ReportRef, Error> {
        debug!("generating dashboard report");
        self.post(self.url("reports/dashboard")).await
    }

    /// `POST /reports/trends`
    pub async fn generate_trends_report(&self) -> Result<ReportRef, Error> {
        debug!("generating trends report");
        self.post(self.url("reports/trends")).await
    }

    /// `GET /reports/dashboard/data`
    pub async fn dashboard_data(&self) -> Result<DashboardData, Error> {
        self.get(self.url("reports/dashboard/data")).await
    }
}
