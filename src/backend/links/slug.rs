/**
 * Slug Generator
 *
 * Produces the short URL-safe identifiers that name share links. A slug is
 * 6 random bytes rendered as unpadded url-safe base64, giving 8 characters
 * and a 2^48 address space, so collisions are vanishingly rare and retried
 * cheaply when they do happen.
 */

use std::future::Future;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;

use crate::shared::ShareError;

use super::super::store::StoreError;

/// Random bytes per slug
const SLUG_BYTES: usize = 6;

/// Cap on consecutive collisions before giving up. At 2^48 possible slugs
/// this many collisions in a row means something is badly wrong with the
/// store or the RNG, not bad luck.
pub const MAX_SLUG_ATTEMPTS: u32 = 20;

/// Generate a fresh random slug. No external state.
pub fn generate_slug() -> String {
    let mut bytes = [0u8; SLUG_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Call `supplier` and probe `exists` until a non-colliding slug is found.
///
/// Terminates with the first fresh value, expected O(1) iterations. Fails
/// with `SlugExhausted` after [`MAX_SLUG_ATTEMPTS`] consecutive collisions
/// rather than looping unboundedly.
pub async fn ensure_unique_slug<S, E, Fut>(
    mut supplier: S,
    mut exists: E,
) -> Result<String, ShareError>
where
    S: FnMut() -> String,
    E: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, StoreError>>,
{
    for attempt in 0..MAX_SLUG_ATTEMPTS {
        let candidate = supplier();
        if !exists(candidate.clone()).await? {
            if attempt > 0 {
                tracing::debug!("[Slug] found free slug after {} collisions", attempt);
            }
            return Ok(candidate);
        }
    }

    tracing::error!(
        "[Slug] {} consecutive collisions, giving up",
        MAX_SLUG_ATTEMPTS
    );
    Err(ShareError::SlugExhausted {
        attempts: MAX_SLUG_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashSet;

    #[test]
    fn test_slug_shape() {
        let slug = generate_slug();
        assert_eq!(slug.len(), 8);
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_slugs_do_not_collide_in_practice() {
        let slugs: HashSet<String> = (0..10_000).map(|_| generate_slug()).collect();
        assert_eq!(slugs.len(), 10_000);
    }

    #[tokio::test]
    async fn test_ensure_unique_returns_first_free_candidate() {
        let mut candidates = vec!["taken1", "taken2", "free"].into_iter();
        let slug = ensure_unique_slug(
            move || candidates.next().unwrap().to_string(),
            |s| async move { Ok(s.starts_with("taken")) },
        )
        .await
        .unwrap();
        assert_eq!(slug, "free");
    }

    #[tokio::test]
    async fn test_ensure_unique_gives_up_after_bounded_retries() {
        let err = ensure_unique_slug(generate_slug, |_| async { Ok(true) })
            .await
            .unwrap_err();
        assert_matches!(
            err,
            ShareError::SlugExhausted {
                attempts: MAX_SLUG_ATTEMPTS
            }
        );
    }

    #[tokio::test]
    async fn test_ensure_unique_propagates_store_failure() {
        let err = ensure_unique_slug(generate_slug, |_| async {
            Err(StoreError::unavailable("connection refused"))
        })
        .await
        .unwrap_err();
        assert_matches!(err, ShareError::StoreUnavailable { .. });
    }
}
