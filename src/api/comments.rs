//! Comment endpoints.

use super::{ApiClient, CommentApi};
use crate::errors::AppError;
use crate::models::{Comment, CreateCommentRequest, LikeRequest};

impl CommentApi for ApiClient {
    async fn list_comments(
        &self,
        post_id: &str,
        viewer_id: Option<&str>,
    ) -> Result<Vec<Comment>, AppError> {
        let mut request = self.http().get(self.url(&["posts", post_id, "comments"]));
        if let Some(user_id) = viewer_id {
            request = request.query(&[("userId", user_id)]);
        }
        self.send(request).await
    }

    async fn create_comment(
        &self,
        post_id: &str,
        request: &CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        let request = self
            .http()
            .post(self.url(&["posts", post_id, "comments"]))
            .json(request);
        self.send(request).await
    }

    async fn like_comment(&self, comment_id: &str, user_id: &str) -> Result<(), AppError> {
        let body = LikeRequest {
            user_id: user_id.to_string(),
        };
        let request = self
            .http()
            .post(self.url(&["comments", comment_id, "like"]))
            .json(&body);
        self.send_empty(request).await
    }

    async fn unlike_comment(&self, comment_id: &str, user_id: &str) -> Result<(), AppError> {
        let body = LikeRequest {
            user_id: user_id.to_string(),
        };
        let request = self
            .http()
            .post(self.url(&["comments", comment_id, "unlike"]))
            .json(&body);
        self.send_empty(request).await
    }
}
