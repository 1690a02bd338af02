/// Resource ownership guard
///
/// One capability check shared by every owned resource type instead of a
/// per-endpoint comparison. A resource exposes the user id of its owner
/// (for posts and events that is the creator profile's user; for a
/// profile it is the linked user) and the guard compares it against the
/// acting identity before any write.
///
/// Volunteers are deliberately not covered: volunteer records are a
/// communal resource with no ownership restriction.
use crate::error::{AppError, Result};
use uuid::Uuid;

/// A resource that is exclusively owned by one user.
pub trait OwnedResource {
    /// User id of the owner.
    fn owner_user_id(&self) -> Uuid;

    /// Resource kind for error messages ("post", "event", "profile").
    fn resource_kind(&self) -> &'static str;
}

/// True iff the actor owns the resource.
pub fn can_modify<R: OwnedResource>(actor: Uuid, resource: &R) -> bool {
    resource.owner_user_id() == actor
}

/// Reject with Forbidden unless the actor owns the resource. Called
/// before any mutation so a rejected attempt leaves the resource
/// unchanged.
pub fn ensure_can_modify<R: OwnedResource>(actor: Uuid, resource: &R) -> Result<()> {
    if can_modify(actor, resource) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "you can only modify your own {}",
            resource.resource_kind()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owned {
        owner: Uuid,
    }

    impl OwnedResource for Owned {
        fn owner_user_id(&self) -> Uuid {
            self.owner
        }

        fn resource_kind(&self) -> &'static str {
            "post"
        }
    }

    #[test]
    fn owner_may_modify() {
        let owner = Uuid::new_v4();
        let resource = Owned { owner };

        assert!(can_modify(owner, &resource));
        assert!(ensure_can_modify(owner, &resource).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let resource = Owned {
            owner: Uuid::new_v4(),
        };
        let stranger = Uuid::new_v4();

        assert!(!can_modify(stranger, &resource));
        match ensure_can_modify(stranger, &resource) {
            Err(AppError::Forbidden(msg)) => {
                assert!(msg.contains("post"));
            }
            other => panic!("expected Forbidden, got {:?}", other.err()),
        }
    }
}
