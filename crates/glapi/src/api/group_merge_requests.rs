use crate::error::Result;
use crate::transport::{execute, Transport};
use glapi_core::groups::merge_requests;
use glapi_core::options::Params;
use glapi_core::paths::Id;
use serde_json::Value;

/// Merge requests of a group
pub struct GroupMergeRequests<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> GroupMergeRequests<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List merge requests of a group.
    ///
    /// Accepts the pagination options plus `iids`, `state`, `order_by`,
    /// `sort`, `milestone`, `view`, `labels`, `created_after`,
    /// `created_before`, `updated_after`, `updated_before`, `scope`,
    /// `author_id`, `assignee_id`, `search`, `source_branch` and
    /// `target_branch`. Timestamps are sent in ISO 8601 form.
    pub async fn all(&self, group_id: impl Into<Id>, params: &Params) -> Result<Value> {
        let request = merge_requests::all(&group_id.into(), params)?;
        execute(self.transport, request).await
    }
}
