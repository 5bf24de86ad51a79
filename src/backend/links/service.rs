/**
 * Share-Link Service
 *
 * The orchestration layer over the document store: create, fetch, update,
 * and password verification for share links. This module is the only
 * mutation surface for records; nothing else in the system writes to the
 * store.
 *
 * # Password lifecycle
 *
 * - Creating or updating a private link with a password stores a fresh
 *   digest.
 * - Updating a private link *without* a password keeps the stored digest
 *   (the password is only required when establishing or changing privacy),
 *   but an update that would leave a private record with no digest at all
 *   is rejected so "keep the current password" can never silently mean "no
 *   password set".
 * - Switching a link to public clears the digest.
 */

use chrono::Utc;

use crate::shared::record::{JsonShareMode, ShareAccessType, ShareLinkRecord};
use crate::shared::ShareError;

use super::super::store::{DocumentStore, PasswordAction, RecordPatch, StoreError};
use super::password::{hash_password, validate_password, verify_hash};
use super::slug::{ensure_unique_slug, generate_slug, MAX_SLUG_ATTEMPTS};

/// Input of a create or update operation
#[derive(Debug, Clone)]
pub struct ShareLinkInput {
    /// Raw JSON text
    pub content: String,
    /// View mode to persist
    pub mode: JsonShareMode,
    /// Privacy setting
    pub is_private: bool,
    /// Access level; `None` persists as viewer
    pub access_type: Option<ShareAccessType>,
    /// Link password, when establishing or changing privacy
    pub password: Option<String>,
}

/// Create a new share link under a freshly generated unique slug.
///
/// A private link requires a password of acceptable length; the check runs
/// before any store write. Slug collisions are retried with a fresh slug,
/// bounded by the generator's retry budget.
pub async fn create_share_link(
    store: &dyn DocumentStore,
    input: ShareLinkInput,
) -> Result<ShareLinkRecord, ShareError> {
    let password_hash = compute_create_hash(&input)?;

    let mut attempts = 0u32;
    loop {
        let slug = ensure_unique_slug(generate_slug, |candidate| async move {
            store.exists(&candidate).await
        })
        .await?;

        let now = Utc::now();
        let record = ShareLinkRecord {
            slug,
            content: input.content.clone(),
            mode: input.mode,
            is_private: input.is_private,
            access_type: input.access_type.unwrap_or_default(),
            password_hash: password_hash.clone(),
            created_at: now,
            updated_at: now,
        };

        match store.insert_one(&record).await {
            Ok(()) => {
                tracing::info!(
                    "[Links] created share link '{}' (private: {})",
                    record.slug,
                    record.is_private
                );
                return Ok(record);
            }
            // Lost a race between the existence probe and the insert;
            // regenerate and try again.
            Err(StoreError::DuplicateSlug { slug }) => {
                attempts += 1;
                tracing::warn!("[Links] insert collision on '{}', retrying", slug);
                if attempts >= MAX_SLUG_ATTEMPTS {
                    return Err(ShareError::SlugExhausted { attempts });
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Fetch a record by slug
pub async fn get_share_link(
    store: &dyn DocumentStore,
    slug: &str,
) -> Result<Option<ShareLinkRecord>, ShareError> {
    Ok(store.find_one(slug).await?)
}

/// Update a record in place. Returns false when the slug has no record.
///
/// Always refreshes `updated_at`. The write replaces the full field set the
/// service owns, so two concurrent editors are last-write-wins with no
/// partial-field interleaving.
pub async fn update_share_link(
    store: &dyn DocumentStore,
    slug: &str,
    input: ShareLinkInput,
) -> Result<bool, ShareError> {
    let Some(existing) = store.find_one(slug).await? else {
        return Ok(false);
    };

    let password_action = if input.is_private {
        match &input.password {
            Some(password) => {
                validate_password(password)?;
                PasswordAction::Set(hash_password(password))
            }
            None if existing.password_hash.is_some() => PasswordAction::Keep,
            // Private with no password ever set and none supplied: the
            // record would be unlockable by nobody.
            None => return Err(ShareError::weak_password()),
        }
    } else {
        PasswordAction::Clear
    };

    let patch = RecordPatch {
        content: input.content,
        mode: input.mode,
        is_private: input.is_private,
        access_type: input.access_type.unwrap_or_default(),
        password_action,
        updated_at: Utc::now(),
    };

    let matched = store.update_one(slug, patch).await?;
    if matched {
        tracing::info!("[Links] updated share link '{}'", slug);
    }
    Ok(matched)
}

/// Verify a supplied password against a record's stored digest.
///
/// False for a missing record, a public record, a record without a digest,
/// or any wrong password; a malformed stored digest fails verification
/// rather than erroring. There is no attempt limit at this layer.
pub async fn verify_share_link_password(
    store: &dyn DocumentStore,
    slug: &str,
    password: &str,
) -> Result<bool, ShareError> {
    let Some(record) = store.find_one(slug).await? else {
        return Ok(false);
    };
    if !record.is_private {
        return Ok(false);
    }
    let Some(stored) = &record.password_hash else {
        return Ok(false);
    };
    Ok(verify_hash(password, stored))
}

fn compute_create_hash(input: &ShareLinkInput) -> Result<Option<String>, ShareError> {
    if !input.is_private {
        return Ok(None);
    }
    match &input.password {
        Some(password) => {
            validate_password(password)?;
            Ok(Some(hash_password(password)))
        }
        None => Err(ShareError::weak_password()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::MemoryStore;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn public_input(content: &str) -> ShareLinkInput {
        ShareLinkInput {
            content: content.to_string(),
            mode: JsonShareMode::Tree,
            is_private: false,
            access_type: None,
            password: None,
        }
    }

    fn private_input(content: &str, password: &str) -> ShareLinkInput {
        ShareLinkInput {
            content: content.to_string(),
            mode: JsonShareMode::Tree,
            is_private: true,
            access_type: Some(ShareAccessType::Viewer),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips_content_and_mode() {
        let store = MemoryStore::new();
        let created = create_share_link(&store, public_input("{\"a\":1}"))
            .await
            .unwrap();

        let fetched = get_share_link(&store, &created.slug).await.unwrap().unwrap();
        assert_eq!(fetched.content, "{\"a\":1}");
        assert_eq!(fetched.mode, JsonShareMode::Tree);
        assert_eq!(fetched.access_type, ShareAccessType::Viewer);
        assert_eq!(fetched.password_hash, None);
    }

    #[tokio::test]
    async fn test_created_slugs_are_unique() {
        let store = MemoryStore::new();
        let mut slugs = std::collections::HashSet::new();
        for _ in 0..50 {
            let record = create_share_link(&store, public_input("{}")).await.unwrap();
            assert!(slugs.insert(record.slug));
        }
    }

    #[tokio::test]
    async fn test_private_create_requires_a_password() {
        let store = MemoryStore::new();
        let mut input = public_input("{}");
        input.is_private = true;
        let err = create_share_link(&store, input).await.unwrap_err();
        assert_matches!(err, ShareError::WeakPassword { .. });
        assert!(store.is_empty().await, "rejected before any store write");
    }

    #[tokio::test]
    async fn test_weak_password_rejected_before_write() {
        let store = MemoryStore::new();
        let err = create_share_link(&store, private_input("{}", "abc"))
            .await
            .unwrap_err();
        assert_matches!(err, ShareError::WeakPassword { .. });
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_verify_password_truth_table() {
        let store = MemoryStore::new();
        let private = create_share_link(&store, private_input("{}", "secret"))
            .await
            .unwrap();
        let public = create_share_link(&store, public_input("{}")).await.unwrap();

        assert!(
            verify_share_link_password(&store, &private.slug, "secret")
                .await
                .unwrap()
        );
        assert!(
            !verify_share_link_password(&store, &private.slug, "wrong")
                .await
                .unwrap()
        );
        assert!(
            !verify_share_link_password(&store, &public.slug, "secret")
                .await
                .unwrap()
        );
        assert!(
            !verify_share_link_password(&store, "missing", "secret")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_verify_with_malformed_stored_hash_is_false_not_a_crash() {
        let store = MemoryStore::new();
        let record = ShareLinkRecord {
            slug: "broken".to_string(),
            content: "{}".to_string(),
            mode: JsonShareMode::Tree,
            is_private: true,
            access_type: ShareAccessType::Viewer,
            password_hash: Some("corrupted garbage".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_one(&record).await.unwrap();

        assert!(!verify_share_link_password(&store, "broken", "anything")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_slug_reports_not_matched() {
        let store = MemoryStore::new();
        assert!(!update_share_link(&store, "missing", public_input("{}"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let store = MemoryStore::new();
        let created = create_share_link(&store, public_input("{}")).await.unwrap();

        update_share_link(&store, &created.slug, public_input("{\"b\":2}"))
            .await
            .unwrap();
        let fetched = get_share_link(&store, &created.slug).await.unwrap().unwrap();
        assert!(fetched.updated_at >= created.updated_at);
        assert_eq!(fetched.content, "{\"b\":2}");
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_existing_hash() {
        let store = MemoryStore::new();
        let created = create_share_link(&store, private_input("{}", "secret"))
            .await
            .unwrap();

        let mut input = private_input("{\"a\":1}", "ignored");
        input.password = None;
        assert!(update_share_link(&store, &created.slug, input).await.unwrap());

        assert!(
            verify_share_link_password(&store, &created.slug, "secret")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_update_private_with_no_hash_ever_set_is_rejected() {
        let store = MemoryStore::new();
        let created = create_share_link(&store, public_input("{}")).await.unwrap();

        let mut input = public_input("{}");
        input.is_private = true;
        let err = update_share_link(&store, &created.slug, input)
            .await
            .unwrap_err();
        assert_matches!(err, ShareError::WeakPassword { .. });
    }

    #[tokio::test]
    async fn test_switching_to_public_clears_the_hash() {
        let store = MemoryStore::new();
        let created = create_share_link(&store, private_input("{}", "secret"))
            .await
            .unwrap();

        update_share_link(&store, &created.slug, public_input("{}"))
            .await
            .unwrap();

        let fetched = get_share_link(&store, &created.slug).await.unwrap().unwrap();
        assert_eq!(fetched.password_hash, None);
        assert!(!fetched.is_private);
        // Any password now fails verification.
        assert!(
            !verify_share_link_password(&store, &created.slug, "secret")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_update_changes_password_when_one_is_supplied() {
        let store = MemoryStore::new();
        let created = create_share_link(&store, private_input("{}", "secret"))
            .await
            .unwrap();

        update_share_link(&store, &created.slug, private_input("{}", "rotated"))
            .await
            .unwrap();

        assert!(
            verify_share_link_password(&store, &created.slug, "rotated")
                .await
                .unwrap()
        );
        assert!(
            !verify_share_link_password(&store, &created.slug, "secret")
                .await
                .unwrap()
        );
    }
}
