//! User model -> entity mapper

use foodgram_core::entities::User;
use foodgram_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        // Stored values are already normalized; bypass `User::new`.
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
