// Director job inventory
//
// Job groups (the tree shown on the dashboard) and per-job details, both
// served by the `JobSummaryManagement` action.

use tracing::debug;

use crate::client::{Client, Reply};
use crate::context::CallContext;
use crate::envelope::RequestEnvelope;
use crate::error::Error;
use crate::models::{GroupInfo, JobInfo};

/// Router action serving job and job-group summaries.
pub const JOB_ACTION: &str = "JobSummaryManagement";

/// `JobSummaryManagement` calls, borrowed from a [`Client`].
#[derive(Debug, Clone)]
pub struct JobService<'a> {
    client: &'a Client,
}

impl<'a> JobService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List the job-group tree.
    ///
    /// Sends `[[null], client_time_offset, collect_all_child_jobs]`. The first
    /// element selects the groups to return; only the full inventory
    /// (`[null]`) is supported, so narrowing to a single group id is not
    /// available through this call.
    ///
    /// `client_time_offset` is the caller's UTC offset in milliseconds, used
    /// by the director to render relative times.
    pub async fn list_job_groups(
        &self,
        ctx: &CallContext,
        client_time_offset: i64,
        collect_all_child_jobs: bool,
    ) -> Result<Reply<GroupInfo>, Error> {
        debug!(client_time_offset, collect_all_child_jobs, "getGroupInfo");
        let all_groups: [Option<i64>; 1] = [None];
        let request = RequestEnvelope::new(
            JOB_ACTION,
            "getGroupInfo",
            &(all_groups, client_time_offset, collect_all_child_jobs),
        )?;
        self.client.call_typed(ctx, &request).await
    }

    /// Fetch detailed records for the given job ids.
    ///
    /// Sends `[job_ids, client_time_offset]`.
    pub async fn get_job_info(
        &self,
        ctx: &CallContext,
        job_ids: &[i64],
        client_time_offset: i64,
    ) -> Result<Reply<JobInfo>, Error> {
        debug!(?job_ids, client_time_offset, "fetching job info");
        let request =
            RequestEnvelope::new(JOB_ACTION, "getJobInfo", &(job_ids, client_time_offset))?;
        self.client.call_typed(ctx, &request).await
    }
}
