//! User entity.

pub mod model;
pub mod request;

use unidesk_core::registry::{EntityDescriptor, FieldDef, FieldKind};
use unidesk_core::traits::Entity;

use crate::relations::ROLE;

pub use model::UserRow;
pub use request::{CreateUser, GetUsers, UpdateUser};

/// Registry entry for `users`.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    name: "user",
    table: "users",
    fields: &[
        FieldDef::system("id", "id", FieldKind::Integer),
        FieldDef::system("guid", "guid", FieldKind::Text),
        FieldDef::system("isDeleted", "is_deleted", FieldKind::Bool),
        FieldDef::column("name", "name", FieldKind::Text),
        FieldDef::column("email", "email", FieldKind::Text),
        FieldDef::column("phone", "phone", FieldKind::Text),
        FieldDef::column("roleId", "role_id", FieldKind::Integer),
        FieldDef::column("joinedOn", "joined_on", FieldKind::Date),
        FieldDef::joined("role.id", &ROLE, "id", FieldKind::Integer),
        FieldDef::joined("role.name", &ROLE, "name", FieldKind::Text),
    ],
    identity: &["id", "name"],
    cascade_column: None,
    cascades: &[],
};

/// An administrative account.
#[derive(Debug, Clone, Copy)]
pub struct User;

impl Entity for User {
    type Get = GetUsers;
    type Create = CreateUser;
    type Update = UpdateUser;

    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }
}
