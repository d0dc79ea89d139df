//! API handles grouped by remote resource

mod group_issues;
mod group_merge_requests;

pub use group_issues::GroupIssues;
pub use group_merge_requests::GroupMergeRequests;

use crate::config::GitlabConfig;
use crate::error::Result;
use crate::transport::{HttpTransport, Transport};

/// Entry point holding the transport shared by every resource handle
#[derive(Debug, Clone)]
pub struct Gitlab<T> {
    transport: T,
}

impl<T: Transport> Gitlab<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn group_issues(&self) -> GroupIssues<'_, T> {
        GroupIssues::new(&self.transport)
    }

    pub fn group_merge_requests(&self) -> GroupMergeRequests<'_, T> {
        GroupMergeRequests::new(&self.transport)
    }
}

impl Gitlab<HttpTransport> {
    pub fn from_config(config: &GitlabConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}
