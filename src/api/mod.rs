//! REST API module.
//!
//! Describes the backend capabilities the client components depend on and
//! implements them over HTTP.

mod availability;
mod client;
mod comments;

pub use client::ApiClient;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{
    AvailabilitySlot, Comment, CreateAvailabilityRequest, CreateCommentRequest,
};

/// Success response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Backend operations on a professional's availability slots.
pub trait AvailabilityApi {
    /// GET /availability?professionalId=
    fn list_availability(
        &self,
        professional_id: &str,
    ) -> impl Future<Output = Result<Vec<AvailabilitySlot>, AppError>> + Send;

    /// POST /availability
    fn create_availability(
        &self,
        request: &CreateAvailabilityRequest,
    ) -> impl Future<Output = Result<Vec<AvailabilitySlot>, AppError>> + Send;

    /// DELETE /availability/{id}
    fn delete_availability(&self, id: &str) -> impl Future<Output = Result<(), AppError>> + Send;

    /// POST /availability/bulk-delete
    fn delete_availability_many(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Backend operations on a post's comments.
pub trait CommentApi {
    /// GET /posts/{postId}/comments, with `userId` when a viewer is known.
    fn list_comments(
        &self,
        post_id: &str,
        viewer_id: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Comment>, AppError>> + Send;

    /// POST /posts/{postId}/comments
    fn create_comment(
        &self,
        post_id: &str,
        request: &CreateCommentRequest,
    ) -> impl Future<Output = Result<Comment, AppError>> + Send;

    /// POST /comments/{id}/like
    fn like_comment(
        &self,
        comment_id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// POST /comments/{id}/unlike
    fn unlike_comment(
        &self,
        comment_id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}
