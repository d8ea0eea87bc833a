//! Link access evaluation.
//!
//! Checks run in a fixed order and the first failing one decides:
//!
//! 1. the record must exist;
//! 2. owner-only surfaces (previews, the owner dashboard) need the owner;
//! 3. organization links need a signed-in owner or member;
//! 4. the link must be within its expiry and view budget.
//!
//! Expiry is checked last so a requester who may not see a file cannot
//! learn whether it has expired.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use linkshare_core::result::AppResult;
use linkshare_database::store::LinkStore;
use linkshare_entity::identity::Identity;
use linkshare_entity::link::ShareLink;

use super::decision::{AccessDecision, AccessIntent, LinkMetadata, RequestSource};
use crate::organization::MembershipGate;

/// Whether the request targets an owner-only surface.
fn is_owner_only(intent: AccessIntent, source: RequestSource) -> bool {
    intent == AccessIntent::Preview || source == RequestSource::OwnerDashboard
}

/// The `(user, organization)` membership question evaluation will ask, if any.
///
/// `None` when an earlier check already decides, when the link is personal,
/// or when the requester is anonymous or the owner.
pub fn membership_question(
    link: Option<&ShareLink>,
    requester: Option<&Identity>,
    intent: AccessIntent,
    source: RequestSource,
) -> Option<(Uuid, Uuid)> {
    let link = link?;
    let requester = requester?;
    if link.is_owned_by(requester.user_id) {
        return None;
    }
    if is_owner_only(intent, source) {
        return None;
    }
    link.organization_id.map(|org| (requester.user_id, org))
}

/// Decide a request given the record, the requester, and the answer to
/// [`membership_question`] (ignored when there was no question).
pub fn evaluate(
    link: Option<&ShareLink>,
    requester: Option<&Identity>,
    is_member: bool,
    now: DateTime<Utc>,
    intent: AccessIntent,
    source: RequestSource,
) -> AccessDecision {
    let Some(link) = link else {
        return AccessDecision::NotFound;
    };

    let is_owner = requester.is_some_and(|r| link.is_owned_by(r.user_id));

    if is_owner_only(intent, source) && !is_owner {
        return AccessDecision::OwnerOnlyDenied;
    }

    if link.is_organization_file() && !is_owner {
        if requester.is_none() {
            return AccessDecision::OrgAuthRequired;
        }
        if !is_member {
            return AccessDecision::OrgAccessDenied;
        }
    }

    let metadata = LinkMetadata::of(link, requester, now);
    if metadata.is_expired {
        return AccessDecision::Expired(metadata);
    }

    AccessDecision::Allow {
        link: Box::new(link.clone()),
        metadata,
    }
}

/// Resolves share link tokens into access decisions.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// Link record store.
    links: Arc<dyn LinkStore>,
    /// Membership lookups for organization links.
    gate: Arc<MembershipGate>,
}

impl AccessPolicy {
    /// Creates a new access policy.
    pub fn new(links: Arc<dyn LinkStore>, gate: Arc<MembershipGate>) -> Self {
        Self { links, gate }
    }

    /// Look up `link_id` and evaluate the request.
    ///
    /// Store failures are returned as errors, never folded into a decision.
    pub async fn resolve_link(
        &self,
        link_id: &str,
        requester: Option<&Identity>,
        now: DateTime<Utc>,
        intent: AccessIntent,
        source: RequestSource,
    ) -> AppResult<AccessDecision> {
        let link = self.links.find_by_link_id(link_id).await?;

        let is_member = match membership_question(link.as_ref(), requester, intent, source) {
            Some((user_id, organization_id)) => {
                self.gate.is_member(user_id, organization_id).await?
            }
            None => false,
        };

        let decision = evaluate(link.as_ref(), requester, is_member, now, intent, source);

        let user_id = requester.map(|r| r.user_id);
        match &decision {
            AccessDecision::Allow { .. } => {
                debug!(link_id = %link_id, user_id = ?user_id, intent = ?intent, "Link access allowed");
            }
            other => {
                warn!(
                    link_id = %link_id,
                    user_id = ?user_id,
                    intent = ?intent,
                    decision = other.label(),
                    "Link access denied"
                );
            }
        }

        Ok(decision)
    }
}
