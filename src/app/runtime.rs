// SPDX-License-Identifier: MPL-2.0
//! Executes [`Task`]s against the stream backend.
//!
//! Each leaf task becomes one future; a batch runs its leaves concurrently.
//! Results come back as messages tagged with the task's request id, so the
//! player can drop results it no longer wants.

use super::message::{Message, Task};
use crate::stream::StreamResolver;
use futures_util::future::join_all;

/// Runs `task` to completion and returns the resulting messages in task order.
pub async fn perform(resolver: &StreamResolver, task: Task) -> Vec<Message> {
    let futures = task
        .into_leaves()
        .into_iter()
        .map(|leaf| perform_leaf(resolver, leaf));
    join_all(futures).await.into_iter().flatten().collect()
}

async fn perform_leaf(resolver: &StreamResolver, task: Task) -> Option<Message> {
    match task {
        Task::Resolve {
            request,
            video_id,
            token,
        } => {
            let result = resolver.resolve(&video_id, &token).await;
            Some(Message::Resolved { request, result })
        }
        Task::RefreshToken {
            request,
            video_id,
            token,
        } => {
            let result = resolver.refresh_token(&video_id, &token).await;
            Some(Message::TokenRefreshed { request, result })
        }
        Task::None | Task::Batch(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RequestId;
    use crate::application::port::StreamApi;
    use crate::error::{Error, Result};
    use crate::stream::{StreamVariants, VideoId};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Api;

    #[async_trait]
    impl StreamApi for Api {
        async fn fetch_variants(&self, video_id: &VideoId, _: &str) -> Result<StreamVariants> {
            if video_id.as_str() == "missing" {
                return Err(Error::network("HTTP 404"));
            }
            Ok(StreamVariants::from_pairs([("720p", "u2")]))
        }

        async fn refresh_token(&self, _: &VideoId, _: &str) -> Result<String> {
            Err(Error::Unauthorized)
        }
    }

    fn resolve(n: u64, id: &str) -> Task {
        Task::Resolve {
            request: RequestId(n),
            video_id: VideoId::new(id),
            token: "t".into(),
        }
    }

    #[tokio::test]
    async fn empty_task_yields_nothing() {
        let resolver = StreamResolver::new(Arc::new(Api));
        assert!(perform(&resolver, Task::None).await.is_empty());
    }

    #[tokio::test]
    async fn batch_results_keep_request_ids_in_order() {
        let resolver = StreamResolver::new(Arc::new(Api));
        let task = Task::batch([
            resolve(1, "ok"),
            resolve(2, "missing"),
            Task::RefreshToken {
                request: RequestId(3),
                video_id: VideoId::new("ok"),
                token: "t".into(),
            },
        ]);

        let messages = perform(&resolver, task).await;
        assert_eq!(messages.len(), 3);
        assert!(matches!(
            &messages[0],
            Message::Resolved { request: RequestId(1), result: Ok(_) }
        ));
        assert!(matches!(
            &messages[1],
            Message::Resolved { request: RequestId(2), result: Err(Error::Network(_)) }
        ));
        assert!(matches!(
            &messages[2],
            Message::TokenRefreshed { request: RequestId(3), result: Err(Error::Unauthorized) }
        ));
    }
}
