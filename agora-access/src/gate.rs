//! Cache-backed authorization guards.
//!
//! The guards resolve entities and group memberships through the
//! read-through cache, then apply the pure decision function from
//! [`crate::decision`]. Group names for both resources and requesters are
//! cached at the configured group TTL, so repeated checks within the
//! window cost no source queries.

use std::sync::Arc;

use agora_cache::{CacheRead, EntityLoader, GroupSource, KeyValueStore, ObjectCache};
use agora_core::{
    AccessTuning, AgoraResult, EntityId, EntityKind, Forum, GroupSet, LoadError, Topic,
};

use crate::decision::{decide, AccessDecision, DenyReason};
use crate::requester::Requester;

/// Guard configuration.
#[derive(Debug, Clone, Default)]
pub struct AccessConfig {
    /// Group name whose forums are left out of default listings. Forums
    /// carrying this group only appear when a listing asks for hidden
    /// forums explicitly.
    pub hidden_group: Option<String>,
}

impl AccessConfig {
    /// Create a new guard configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hidden group name.
    pub fn with_hidden_group(mut self, group: impl Into<String>) -> Self {
        self.hidden_group = Some(group.into());
        self
    }

    /// Build a configuration from validated tuning values.
    pub fn from_tuning(tuning: &AccessTuning) -> Self {
        Self {
            hidden_group: tuning.hidden_group.clone(),
        }
    }
}

/// Where a new post will land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostTarget {
    /// A post opening a new topic in the given forum.
    NewTopic(EntityId),
    /// A reply to an existing topic.
    Reply(EntityId),
}

/// Authorization gate over cached group memberships.
///
/// Owns the cache gateway and the group source; entity loaders are passed
/// per call since different call sites own different sources.
pub struct AccessGate<S: KeyValueStore> {
    cache: ObjectCache<S>,
    groups: Arc<dyn GroupSource>,
    config: AccessConfig,
}

impl<S: KeyValueStore> AccessGate<S> {
    /// Create a new gate.
    pub fn new(cache: ObjectCache<S>, groups: Arc<dyn GroupSource>, config: AccessConfig) -> Self {
        Self {
            cache,
            groups,
            config,
        }
    }

    /// Get the guard configuration.
    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Get the underlying cache gateway.
    pub fn cache(&self) -> &ObjectCache<S> {
        &self.cache
    }

    /// Check a requester against a forum's required groups.
    pub async fn authorize_forum(
        &self,
        forum: &Forum,
        requester: &Requester,
    ) -> AgoraResult<AccessDecision> {
        let required = self
            .cache
            .groups_for(EntityKind::Forum, forum.id, self.groups.as_ref())
            .await?;
        let held = self.held_groups_if_needed(&required, requester).await?;
        let decision = decide(&required, &held, requester.authenticated, requester.superuser);

        match decision {
            AccessDecision::Granted => {
                tracing::debug!(
                    forum_id = forum.id,
                    requester = ?requester.id,
                    "Forum access granted"
                );
            }
            AccessDecision::Denied(reason) => {
                tracing::warn!(
                    forum_id = forum.id,
                    requester = ?requester.id,
                    reason = ?reason,
                    "Forum access denied"
                );
            }
        }

        Ok(decision)
    }

    /// Check access to a topic by checking its owning forum.
    ///
    /// The topic and its forum are both resolved through the cache; an
    /// unknown topic id is an error, not a denial.
    pub async fn authorize_topic<TL, FL>(
        &self,
        topic_id: EntityId,
        requester: &Requester,
        topics: &TL,
        forums: &FL,
    ) -> AgoraResult<AccessDecision>
    where
        TL: EntityLoader<Topic> + ?Sized,
        FL: EntityLoader<Forum> + ?Sized,
    {
        let forum = self.forum_of_topic(topic_id, topics, forums).await?;
        self.authorize_forum(&forum, requester).await
    }

    /// Check whether a requester may post.
    ///
    /// Posting always requires a signed-in author, even on public forums.
    /// The target forum is resolved through the cache, then group-checked
    /// like any other forum access.
    pub async fn authorize_post<TL, FL>(
        &self,
        target: PostTarget,
        requester: &Requester,
        topics: &TL,
        forums: &FL,
    ) -> AgoraResult<AccessDecision>
    where
        TL: EntityLoader<Topic> + ?Sized,
        FL: EntityLoader<Forum> + ?Sized,
    {
        if !requester.authenticated {
            tracing::warn!(?target, "Post refused: requester not signed in");
            return Ok(AccessDecision::Denied(DenyReason::Unauthenticated));
        }

        let forum = match target {
            PostTarget::NewTopic(forum_id) => self.load_forum(forum_id, forums).await?,
            PostTarget::Reply(topic_id) => self.forum_of_topic(topic_id, topics, forums).await?,
        };
        self.authorize_forum(&forum, requester).await
    }

    /// Check whether a requester may attach a file to a forum.
    ///
    /// Uploads require a signed-in requester even on public forums.
    pub async fn authorize_upload(
        &self,
        forum: &Forum,
        requester: &Requester,
    ) -> AgoraResult<AccessDecision> {
        if !requester.authenticated {
            tracing::warn!(
                forum_id = forum.id,
                "Upload refused: requester not signed in"
            );
            return Ok(AccessDecision::Denied(DenyReason::Unauthenticated));
        }
        self.authorize_forum(forum, requester).await
    }

    /// Filter a forum listing down to what the requester may see.
    ///
    /// Unless `show_hidden` is set, forums carrying the configured hidden
    /// group are dropped for everyone, superusers included. The remaining
    /// forums pass through the usual group decision.
    pub async fn visible_forums(
        &self,
        forums: &[Forum],
        requester: &Requester,
        show_hidden: bool,
    ) -> AgoraResult<Vec<Forum>> {
        let held = self.requester_groups(requester).await?;
        let mut visible = Vec::with_capacity(forums.len());

        for forum in forums {
            let required = self
                .cache
                .groups_for(EntityKind::Forum, forum.id, self.groups.as_ref())
                .await?;

            if !show_hidden {
                if let Some(hidden) = &self.config.hidden_group {
                    if required.contains(hidden) {
                        continue;
                    }
                }
            }

            if decide(&required, &held, requester.authenticated, requester.superuser).is_granted()
            {
                visible.push(forum.clone());
            }
        }

        Ok(visible)
    }

    /// Group set the requester brings to a check.
    ///
    /// Anonymous requesters contribute the empty set without a lookup.
    pub async fn requester_groups(&self, requester: &Requester) -> AgoraResult<GroupSet> {
        match requester.id {
            Some(id) if requester.authenticated => {
                self.cache
                    .groups_for(EntityKind::User, id, self.groups.as_ref())
                    .await
            }
            _ => Ok(GroupSet::new()),
        }
    }

    /// Resolve the requester's groups only when the decision depends on
    /// them, mirroring the short-circuits in [`decide`].
    async fn held_groups_if_needed(
        &self,
        required: &GroupSet,
        requester: &Requester,
    ) -> AgoraResult<GroupSet> {
        if required.is_empty() || !requester.authenticated || requester.superuser {
            return Ok(GroupSet::new());
        }
        self.requester_groups(requester).await
    }

    async fn load_forum<FL>(&self, forum_id: EntityId, forums: &FL) -> AgoraResult<Forum>
    where
        FL: EntityLoader<Forum> + ?Sized,
    {
        match self.cache.get_or_load_default(Some(forum_id), forums).await? {
            Some(read) => Ok(read.into_value()),
            None => Err(LoadError::NotFound {
                kind: EntityKind::Forum,
                id: forum_id,
            }
            .into()),
        }
    }

    async fn forum_of_topic<TL, FL>(
        &self,
        topic_id: EntityId,
        topics: &TL,
        forums: &FL,
    ) -> AgoraResult<Forum>
    where
        TL: EntityLoader<Topic> + ?Sized,
        FL: EntityLoader<Forum> + ?Sized,
    {
        let topic: CacheRead<Topic> =
            match self.cache.get_or_load_default(Some(topic_id), topics).await? {
                Some(read) => read,
                None => {
                    return Err(LoadError::NotFound {
                        kind: EntityKind::Topic,
                        id: topic_id,
                    }
                    .into())
                }
            };
        self.load_forum(topic.value().forum_id, forums).await
    }
}

impl<S: KeyValueStore> Clone for AccessGate<S> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            groups: Arc::clone(&self.groups),
            config: self.config.clone(),
        }
    }
}
