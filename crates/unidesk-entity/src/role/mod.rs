//! Role entity.

pub mod model;
pub mod request;

use unidesk_core::registry::{EntityDescriptor, FieldDef, FieldKind};
use unidesk_core::traits::Entity;

pub use model::RoleRow;
pub use request::{CreateRole, GetRoles, UpdateRole};

/// Registry entry for `roles`.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    name: "role",
    table: "roles",
    fields: &[
        FieldDef::system("id", "id", FieldKind::Integer),
        FieldDef::system("guid", "guid", FieldKind::Text),
        FieldDef::system("isDeleted", "is_deleted", FieldKind::Bool),
        FieldDef::column("name", "name", FieldKind::Text),
        FieldDef::column("description", "description", FieldKind::Text),
    ],
    identity: &["id", "name"],
    cascade_column: None,
    cascades: &[],
};

/// A role users are assigned to.
#[derive(Debug, Clone, Copy)]
pub struct Role;

impl Entity for Role {
    type Get = GetRoles;
    type Create = CreateRole;
    type Update = UpdateRole;

    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }
}
