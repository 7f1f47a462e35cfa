use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// A resource that records the user who created it.
pub trait OwnedResource {
    fn owner_id(&self) -> UserId;
}

/// Decide whether `identity` may mutate `resource`.
///
/// Returns true only when the resource's recorded owner is the identity.
/// Callers must confirm the resource exists before asking.
pub fn authorize<R>(identity: &User, resource: &R) -> bool
where
    R: OwnedResource + ?Sized,
{
    resource.owner_id() == identity.id
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::Telephone;
    use crate::domain::user::models::UserName;

    struct Note {
        author: UserId,
    }

    impl OwnedResource for Note {
        fn owner_id(&self) -> UserId {
            self.author
        }
    }

    fn user(id: u64) -> User {
        User {
            id: UserId(id),
            name: UserName::new("someone".to_string()).unwrap(),
            telephone: Telephone::new("13800138000".to_string()).unwrap(),
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_is_authorized() {
        let note = Note { author: UserId(1) };
        assert!(authorize(&user(1), &note));
    }

    #[test]
    fn test_other_user_is_rejected() {
        let note = Note { author: UserId(1) };
        assert!(!authorize(&user(2), &note));
    }

    #[test]
    fn test_works_through_trait_object() {
        let note: Box<dyn OwnedResource> = Box::new(Note { author: UserId(5) });
        assert!(authorize(&user(5), note.as_ref()));
    }
}
