pub use kernel::id::markers::User as UserMarker;
use kernel::id::Id;

pub type UserId = Id<UserMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_new() {
        let user_id = UserId::new();
        assert_eq!(user_id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_user_id_round_trips_through_text() {
        let user_id = UserId::new();
        let parsed: UserId = user_id.to_string().parse().unwrap();
        assert_eq!(parsed, user_id);
    }
}
