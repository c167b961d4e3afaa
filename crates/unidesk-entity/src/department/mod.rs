//! Department entity.

pub mod model;
pub mod request;

use unidesk_core::registry::{EntityDescriptor, FieldDef, FieldKind};
use unidesk_core::traits::Entity;

pub use model::DepartmentRow;
pub use request::{CreateDepartment, GetDepartments, UpdateDepartment};

/// Registry entry for `departments`.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    name: "department",
    table: "departments",
    fields: &[
        FieldDef::system("id", "id", FieldKind::Integer),
        FieldDef::system("guid", "guid", FieldKind::Text),
        FieldDef::system("isDeleted", "is_deleted", FieldKind::Bool),
        FieldDef::column("name", "name", FieldKind::Text),
        FieldDef::column("code", "code", FieldKind::Text),
        FieldDef::column("description", "description", FieldKind::Text),
        FieldDef::column("foundedOn", "founded_on", FieldKind::Date),
    ],
    identity: &["id", "name"],
    cascade_column: None,
    cascades: &[],
};

/// An academic department.
#[derive(Debug, Clone, Copy)]
pub struct Department;

impl Entity for Department {
    type Get = GetDepartments;
    type Create = CreateDepartment;
    type Update = UpdateDepartment;

    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }
}
