//! Test factory for creating Serenity User objects.

use serenity::all::User;

/// Creates a test Serenity User with the given ID and username.
///
/// The user is a regular (non-bot) account with no avatar and the new
/// discriminator-less username format.
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::user::create_test_user;
///
/// let user = create_test_user(123456789, "moderator");
/// assert_eq!(user.tag(), "moderator");
/// ```
pub fn create_test_user(user_id: u64, username: &str) -> User {
    serde_json::from_value(serde_json::json!({
        "id": user_id.to_string(),
        "username": username,
        "discriminator": "0",
        "global_name": null,
        "avatar": null,
        "bot": false,
    }))
    .expect("Failed to create test user - invalid JSON structure")
}
