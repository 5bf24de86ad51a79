/**
 * Access Control Evaluator
 *
 * Pure logic computing a client's effective permission on a share link from
 * the record's sharing settings, a local ownership hint, and whether this
 * session has already passed password verification.
 *
 * The evaluator runs when a document is first opened and again after a
 * successful password verification, which flips a locked session to an
 * unlocked one. It never touches the store and never reveals content; it
 * only decides.
 *
 * The ownership hint is advisory. It comes from a client-held set of slugs
 * and is never treated as proof of identity by the server; real access
 * control is enforced only by server-side password verification.
 */

use crate::shared::record::{ShareAccessType, ShareLinkRecord};

/// The computed permission for one client on one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    /// Whether local edits are permitted
    pub can_edit: bool,
    /// Whether content must be withheld pending password verification
    pub is_locked: bool,
    /// The access level in effect for this client
    pub effective_access: ShareAccessType,
}

/// Evaluate a client's effective permission on a record.
///
/// Rules, in order:
/// 1. An owner-token holder gets full access regardless of `access_type` or
///    privacy (the device that created or last updated the link).
/// 2. Otherwise a private record stays locked until a valid password has
///    been supplied for this session: no edits, no content.
/// 3. Otherwise (public, or private-and-unlocked) edit rights follow the
///    record's `access_type`.
pub fn evaluate(record: &ShareLinkRecord, is_owner: bool, unlocked: bool) -> AccessDecision {
    evaluate_parts(record.is_private, record.access_type, is_owner, unlocked)
}

/// Same ruleset as [`evaluate`], for callers holding only the sharing fields
/// (the client never sees the full record of a locked link).
pub fn evaluate_parts(
    is_private: bool,
    access_type: ShareAccessType,
    is_owner: bool,
    unlocked: bool,
) -> AccessDecision {
    if is_owner {
        return AccessDecision {
            can_edit: true,
            is_locked: false,
            effective_access: ShareAccessType::Editor,
        };
    }

    if is_private && !unlocked {
        return AccessDecision {
            can_edit: false,
            is_locked: true,
            effective_access: access_type,
        };
    }

    AccessDecision {
        can_edit: access_type == ShareAccessType::Editor,
        is_locked: false,
        effective_access: access_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(is_private: bool, access_type: ShareAccessType) -> ShareLinkRecord {
        ShareLinkRecord {
            slug: "abc123".to_string(),
            content: "{}".to_string(),
            mode: Default::default(),
            is_private,
            access_type,
            password_hash: is_private.then(|| "aa".repeat(32)),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_private_editor_link_is_locked_until_unlocked() {
        let rec = record(true, ShareAccessType::Editor);

        let before = evaluate(&rec, false, false);
        assert!(before.is_locked);
        assert!(!before.can_edit);

        // After a successful VerifyPassword the same record yields full
        // editor rights.
        let after = evaluate(&rec, false, true);
        assert!(!after.is_locked);
        assert!(after.can_edit);
    }

    #[test]
    fn test_public_viewer_link_is_read_only_for_non_owners() {
        let rec = record(false, ShareAccessType::Viewer);
        let decision = evaluate(&rec, false, false);
        assert!(!decision.can_edit);
        assert!(!decision.is_locked);
    }

    #[test]
    fn test_owner_overrides_access_type_and_privacy() {
        for is_private in [false, true] {
            for access_type in [ShareAccessType::Viewer, ShareAccessType::Editor] {
                let decision = evaluate(&record(is_private, access_type), true, false);
                assert!(decision.can_edit);
                assert!(!decision.is_locked);
            }
        }
    }

    #[test]
    fn test_private_viewer_stays_read_only_after_unlock() {
        // A password grants visibility, not edit rights.
        let decision = evaluate(&record(true, ShareAccessType::Viewer), false, true);
        assert!(!decision.can_edit);
        assert!(!decision.is_locked);
        assert_eq!(decision.effective_access, ShareAccessType::Viewer);
    }
}
