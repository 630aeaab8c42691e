//! Comment tree assembler.
//!
//! Keeps a post's reply forest and the viewer's like state consistent under
//! optimistic updates, falling back to a refetch whenever the backend disagrees.

mod composer;
mod tree;

pub use composer::*;
pub use tree::*;

use crate::api::CommentApi;
use crate::auth::{require_viewer, Viewer};
use crate::errors::AppError;
use crate::models::{Comment, CreateCommentRequest};

/// The comments of one community post.
pub struct CommentThread<B> {
    api: B,
    post_id: String,
    comments: Vec<Comment>,
    comment_count: u64,
}

impl<B: CommentApi> CommentThread<B> {
    pub fn new(api: B, post_id: impl Into<String>) -> Self {
        Self {
            api,
            post_id: post_id.into(),
            comments: Vec::new(),
            comment_count: 0,
        }
    }

    /// Seed the displayed comment counter from the post listing.
    pub fn with_comment_count(mut self, count: u64) -> Self {
        self.comment_count = count;
        self
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// Root comments, each carrying its nested replies.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Displayed comment count of the post. Best effort, not derived from the tree.
    pub fn comment_count(&self) -> u64 {
        self.comment_count
    }

    /// Fetch the flat list and rebuild the tree.
    pub async fn refresh(&mut self, viewer: Option<&Viewer>) -> Result<&[Comment], AppError> {
        let flat = self
            .api
            .list_comments(&self.post_id, viewer.map(|v| v.id.as_str()))
            .await?;

        tracing::debug!(post_id = %self.post_id, count = flat.len(), "Loaded comments");

        self.comments = build_tree(flat);
        Ok(&self.comments)
    }

    async fn refresh_or_warn(&mut self, viewer: Option<&Viewer>) {
        if let Err(e) = self.refresh(viewer).await {
            tracing::warn!(post_id = %self.post_id, "Failed to refetch comments: {}", e);
        }
    }

    /// Like or unlike a comment, updating the tree before the backend answers.
    ///
    /// A failed call refetches the whole thread instead of undoing the local
    /// change.
    pub async fn toggle_like(
        &mut self,
        viewer: Option<&Viewer>,
        comment_id: &str,
        previous_has_liked: bool,
    ) -> Result<(), AppError> {
        let viewer = require_viewer(viewer)?;

        self.comments = with_like_toggled(&self.comments, comment_id, previous_has_liked);

        let result = if previous_has_liked {
            self.api.unlike_comment(comment_id, &viewer.id).await
        } else {
            self.api.like_comment(comment_id, &viewer.id).await
        };

        if let Err(e) = result {
            tracing::warn!(comment_id = %comment_id, "Like toggle failed, refetching: {}", e);
            self.refresh_or_warn(Some(viewer)).await;
            return Err(e);
        }

        Ok(())
    }

    /// Post a comment, or a reply when `parent_id` is set.
    ///
    /// The new comment lands in the tree through the refetch that follows.
    pub async fn submit_comment(
        &mut self,
        viewer: Option<&Viewer>,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<Comment, AppError> {
        let viewer = require_viewer(viewer)?;

        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Comment cannot be empty".to_string()));
        }

        let request = CreateCommentRequest {
            user_id: viewer.id.clone(),
            content: content.to_string(),
            parent_id: parent_id.map(str::to_string),
        };

        let created = match self.api.create_comment(&self.post_id, &request).await {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!(post_id = %self.post_id, "Failed to post comment: {}", e);
                return Err(e);
            }
        };

        tracing::info!(
            post_id = %self.post_id,
            comment_id = %created.id,
            reply = parent_id.is_some(),
            "Comment posted"
        );

        self.comment_count += 1;
        self.refresh_or_warn(Some(viewer)).await;
        Ok(created)
    }

    /// Drive a composer through a submission.
    pub async fn submit_composer(
        &mut self,
        composer: &mut Composer,
        viewer: Option<&Viewer>,
    ) -> Result<Comment, AppError> {
        let Some(content) = composer.begin_submit() else {
            return Err(AppError::Validation("Comment cannot be empty".to_string()));
        };
        let parent_id = composer.parent_id().map(str::to_string);

        let result = self
            .submit_comment(viewer, &content, parent_id.as_deref())
            .await;
        composer.finish_submit(result.is_ok());
        result
    }
}
