use crate::error::Result;
use crate::transport::{execute, Transport};
use glapi_core::groups::{issues, NoteBody};
use glapi_core::options::Params;
use glapi_core::paths::Id;
use serde_json::Value;

/// Issues of a group, with their notes, discussions and time tracking
pub struct GroupIssues<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> GroupIssues<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List issues of a group, or every issue visible to the token when
    /// `group_id` is `None`.
    ///
    /// Accepts the pagination options plus `state`, `labels`, `milestone`,
    /// `iids`, `scope`, `order_by`, `sort` and `search`.
    pub async fn all(&self, group_id: Option<Id>, params: &Params) -> Result<Value> {
        let request = issues::all(group_id.as_ref(), params)?;
        execute(self.transport, request).await
    }

    pub async fn show(&self, group_id: impl Into<Id>, issue_iid: impl Into<Id>) -> Result<Value> {
        execute(
            self.transport,
            issues::show(&group_id.into(), &issue_iid.into()),
        )
        .await
    }

    pub async fn create(&self, group_id: impl Into<Id>, params: Params) -> Result<Value> {
        execute(self.transport, issues::create(&group_id.into(), params)).await
    }

    pub async fn update(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        params: Params,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::update(&group_id.into(), &issue_iid.into(), params),
        )
        .await
    }

    /// Move an issue to another group.
    pub async fn move_issue(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        to_group_id: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::move_issue(&group_id.into(), &issue_iid.into(), &to_group_id.into()),
        )
        .await
    }

    pub async fn remove(&self, group_id: impl Into<Id>, issue_iid: impl Into<Id>) -> Result<Value> {
        execute(
            self.transport,
            issues::remove(&group_id.into(), &issue_iid.into()),
        )
        .await
    }

    pub async fn show_comments(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::show_comments(&group_id.into(), &issue_iid.into()),
        )
        .await
    }

    pub async fn show_comment(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        note_id: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::show_comment(&group_id.into(), &issue_iid.into(), &note_id.into()),
        )
        .await
    }

    /// Add a note. `body` is either plain text or a full parameter map.
    pub async fn add_comment(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        body: impl Into<NoteBody>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::add_comment(&group_id.into(), &issue_iid.into(), body.into()),
        )
        .await
    }

    pub async fn update_comment(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        note_id: impl Into<Id>,
        body: &str,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::update_comment(&group_id.into(), &issue_iid.into(), &note_id.into(), body),
        )
        .await
    }

    pub async fn remove_comment(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        note_id: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::remove_comment(&group_id.into(), &issue_iid.into(), &note_id.into()),
        )
        .await
    }

    pub async fn show_discussions(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::show_discussions(&group_id.into(), &issue_iid.into()),
        )
        .await
    }

    pub async fn show_discussion(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        discussion_id: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::show_discussion(&group_id.into(), &issue_iid.into(), &discussion_id.into()),
        )
        .await
    }

    /// Start a discussion thread. `body` is either plain text or a full
    /// parameter map.
    pub async fn add_discussion(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        body: impl Into<NoteBody>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::add_discussion(&group_id.into(), &issue_iid.into(), body.into()),
        )
        .await
    }

    pub async fn add_discussion_note(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        discussion_id: impl Into<Id>,
        body: impl Into<NoteBody>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::add_discussion_note(
                &group_id.into(),
                &issue_iid.into(),
                &discussion_id.into(),
                body.into(),
            ),
        )
        .await
    }

    pub async fn update_discussion_note(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        discussion_id: impl Into<Id>,
        note_id: impl Into<Id>,
        body: &str,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::update_discussion_note(
                &group_id.into(),
                &issue_iid.into(),
                &discussion_id.into(),
                &note_id.into(),
                body,
            ),
        )
        .await
    }

    pub async fn remove_discussion_note(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        discussion_id: impl Into<Id>,
        note_id: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::remove_discussion_note(
                &group_id.into(),
                &issue_iid.into(),
                &discussion_id.into(),
                &note_id.into(),
            ),
        )
        .await
    }

    pub async fn set_time_estimate(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        duration: &str,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::set_time_estimate(&group_id.into(), &issue_iid.into(), duration),
        )
        .await
    }

    pub async fn reset_time_estimate(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::reset_time_estimate(&group_id.into(), &issue_iid.into()),
        )
        .await
    }

    pub async fn add_spent_time(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
        duration: &str,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::add_spent_time(&group_id.into(), &issue_iid.into(), duration),
        )
        .await
    }

    pub async fn reset_spent_time(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::reset_spent_time(&group_id.into(), &issue_iid.into()),
        )
        .await
    }

    pub async fn time_stats(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::time_stats(&group_id.into(), &issue_iid.into()),
        )
        .await
    }

    /// Emoji reactions awarded to the issue
    pub async fn award_emoji(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::award_emoji(&group_id.into(), &issue_iid.into()),
        )
        .await
    }

    /// Merge requests that close the issue on merge
    pub async fn closed_by_merge_requests(
        &self,
        group_id: impl Into<Id>,
        issue_iid: impl Into<Id>,
    ) -> Result<Value> {
        execute(
            self.transport,
            issues::closed_by_merge_requests(&group_id.into(), &issue_iid.into()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Gitlab;
    use crate::error::Error;
    use crate::transport::testing::{FailingTransport, RecordingTransport};
    use glapi_core::options::OptionsError;
    use glapi_core::params;
    use glapi_core::request::Request;
    use serde_json::json;

    fn issues_data() -> Value {
        json!([
            {"id": 1, "title": "An issue"},
            {"id": 2, "title": "Another issue"}
        ])
    }

    #[tokio::test]
    async fn test_should_get_all_issues() {
        let transport = RecordingTransport::returning(issues_data());
        let api = GroupIssues::new(&transport);

        let result = api.all(None, &Params::new()).await.unwrap();

        assert_eq!(result, issues_data());
        assert_eq!(transport.calls(), vec![Request::get("issues", Params::new())]);
    }

    #[tokio::test]
    async fn test_should_get_group_issues_with_pagination() {
        let transport = RecordingTransport::returning(issues_data());
        let api = GroupIssues::new(&transport);

        api.all(Some(Id::from(1u64)), &params! { "page" => 2, "per_page" => 5 })
            .await
            .unwrap();

        assert_eq!(
            transport.calls(),
            vec![Request::get(
                "groups/1/issues",
                params! { "page" => 2, "per_page" => 5 }
            )]
        );
    }

    #[tokio::test]
    async fn test_should_get_group_issues_with_params() {
        let transport = RecordingTransport::returning(issues_data());
        let api = GroupIssues::new(&transport);
        let input = params! {
            "order_by" => "created_at",
            "sort" => "desc",
            "labels" => "foo,bar",
            "state" => "opened",
        };

        api.all(Some(Id::from(1u64)), &input).await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![Request::get("groups/1/issues", input)]
        );
    }

    #[tokio::test]
    async fn test_underscored_scope_rejected_before_request() {
        let transport = RecordingTransport::returning(issues_data());
        let api = GroupIssues::new(&transport);

        let err = api
            .all(Some(Id::from(1u64)), &params! { "scope" => "assigned_to_me" })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Options(OptionsError::InvalidOptionValue { .. })
        ));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_should_create_update_and_remove() {
        let transport = RecordingTransport::returning(json!({"id": 3, "title": "A new issue"}));
        let gitlab = Gitlab::new(&transport);
        let api = gitlab.group_issues();

        api.create(1u64, params! { "title" => "A new issue" })
            .await
            .unwrap();
        api.update(1u64, 2u64, params! { "state_event" => "close" })
            .await
            .unwrap();
        api.move_issue(1u64, 2u64, 3u64).await.unwrap();
        api.remove(1u64, 2u64).await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![
                Request::post("groups/1/issues", params! { "title" => "A new issue" }),
                Request::put("groups/1/issues/2", params! { "state_event" => "close" }),
                Request::post("groups/1/issues/2/move", params! { "to_group_id" => 3 }),
                Request::delete("groups/1/issues/2", Params::new()),
            ]
        );
    }

    #[tokio::test]
    async fn test_should_manage_comments() {
        let transport = RecordingTransport::returning(json!({"id": 3, "body": "A comment"}));
        let api = GroupIssues::new(&transport);

        api.show_comments(1u64, 2u64).await.unwrap();
        api.show_comment(1u64, 2u64, 3u64).await.unwrap();
        api.add_comment(1u64, 2u64, "A comment").await.unwrap();
        api.add_comment(
            1u64,
            2u64,
            params! { "body" => "A comment", "created_at" => "2016-01-01T00:00:00+00:00" },
        )
        .await
        .unwrap();
        api.update_comment(1u64, 2u64, 3u64, "An edited comment")
            .await
            .unwrap();
        api.remove_comment(1u64, 2u64, 3u64).await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![
                Request::get("groups/1/issues/2/notes", Params::new()),
                Request::get("groups/1/issues/2/notes/3", Params::new()),
                Request::post("groups/1/issues/2/notes", params! { "body" => "A comment" }),
                Request::post(
                    "groups/1/issues/2/notes",
                    params! { "body" => "A comment", "created_at" => "2016-01-01T00:00:00+00:00" }
                ),
                Request::put(
                    "groups/1/issues/2/notes/3",
                    params! { "body" => "An edited comment" }
                ),
                Request::delete("groups/1/issues/2/notes/3", Params::new()),
            ]
        );
    }

    #[tokio::test]
    async fn test_should_manage_discussions() {
        let transport = RecordingTransport::returning(json!({"id": "abc", "notes": []}));
        let api = GroupIssues::new(&transport);

        api.show_discussions(1u64, 2u64).await.unwrap();
        api.show_discussion(1u64, 2u64, "abc").await.unwrap();
        api.add_discussion(1u64, 2u64, "A discussion").await.unwrap();
        api.add_discussion_note(1u64, 2u64, "abc", "A reply")
            .await
            .unwrap();
        api.update_discussion_note(1u64, 2u64, "abc", 3u64, "An edited reply")
            .await
            .unwrap();
        api.remove_discussion_note(1u64, 2u64, "abc", 3u64)
            .await
            .unwrap();

        assert_eq!(
            transport.calls(),
            vec![
                Request::get("groups/1/issues/2/discussions", Params::new()),
                Request::get("groups/1/issues/2/discussions/abc", Params::new()),
                Request::post(
                    "groups/1/issues/2/discussions",
                    params! { "body" => "A discussion" }
                ),
                Request::post(
                    "groups/1/issues/2/discussions/abc/notes",
                    params! { "body" => "A reply" }
                ),
                Request::put(
                    "groups/1/issues/2/discussions/abc/notes/3",
                    params! { "body" => "An edited reply" }
                ),
                Request::delete("groups/1/issues/2/discussions/abc/notes/3", Params::new()),
            ]
        );
    }

    #[tokio::test]
    async fn test_should_track_time() {
        let transport = RecordingTransport::returning(json!({"time_estimate": 14400}));
        let api = GroupIssues::new(&transport);

        api.set_time_estimate(1u64, 2u64, "4h").await.unwrap();
        api.reset_time_estimate(1u64, 2u64).await.unwrap();
        api.add_spent_time(1u64, 2u64, "2h").await.unwrap();
        api.reset_spent_time(1u64, 2u64).await.unwrap();
        api.time_stats(1u64, 2u64).await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![
                Request::post(
                    "groups/1/issues/2/time_estimate",
                    params! { "duration" => "4h" }
                ),
                Request::post("groups/1/issues/2/reset_time_estimate", Params::new()),
                Request::post(
                    "groups/1/issues/2/add_spent_time",
                    params! { "duration" => "2h" }
                ),
                Request::post("groups/1/issues/2/reset_spent_time", Params::new()),
                Request::get("groups/1/issues/2/time_stats", Params::new()),
            ]
        );
    }

    #[tokio::test]
    async fn test_should_get_emoji_and_closing_merge_requests() {
        let transport = RecordingTransport::returning(json!([]));
        let api = GroupIssues::new(&transport);

        api.award_emoji(1u64, 2u64).await.unwrap();
        api.closed_by_merge_requests(1u64, 2u64).await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![
                Request::get("groups/1/issues/2/award_emoji", Params::new()),
                Request::get("groups/1/issues/2/closed_by", Params::new()),
            ]
        );
    }

    #[tokio::test]
    async fn test_namespaced_group_is_encoded() {
        let transport = RecordingTransport::returning(json!({}));
        let api = GroupIssues::new(&transport);

        api.show("acme/platform", 7u64).await.unwrap();

        assert_eq!(transport.calls()[0].path, "groups/acme%2Fplatform/issues/7");
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let transport = FailingTransport(404);
        let api = GroupIssues::new(&transport);

        let err = api.show(1u64, 2u64).await.unwrap_err();

        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("Group Not Found"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }
}
