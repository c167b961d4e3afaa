//! Teacher entity.
//!
//! Deleting a teacher soft-deletes the teacher's honors in the same
//! transaction, tagging them with the `teacher` cascade reason.

pub mod model;
pub mod request;

use unidesk_core::registry::{CascadeRule, EntityDescriptor, FieldDef, FieldKind};
use unidesk_core::traits::Entity;

use crate::honor;
use crate::relations::{DEPARTMENT, USER};

pub use model::TeacherRow;
pub use request::{CreateTeacher, GetTeachers, UpdateTeacher};

/// Cascade reason written into honors removed with their teacher.
pub const CASCADE_REASON: &str = "teacher";

/// Registry entry for `teachers`.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    name: "teacher",
    table: "teachers",
    fields: &[
        FieldDef::system("id", "id", FieldKind::Integer),
        FieldDef::system("guid", "guid", FieldKind::Text),
        FieldDef::system("isDeleted", "is_deleted", FieldKind::Bool),
        FieldDef::column("name", "name", FieldKind::Text),
        FieldDef::column("title", "title", FieldKind::Text),
        FieldDef::column("email", "email", FieldKind::Text),
        FieldDef::column("departmentId", "department_id", FieldKind::Integer),
        FieldDef::column("userId", "user_id", FieldKind::Integer),
        FieldDef::column("hiredOn", "hired_on", FieldKind::Date),
        FieldDef::joined("department.id", &DEPARTMENT, "id", FieldKind::Integer),
        FieldDef::joined("department.name", &DEPARTMENT, "name", FieldKind::Text),
        FieldDef::joined("user.id", &USER, "id", FieldKind::Integer),
        FieldDef::joined("user.name", &USER, "name", FieldKind::Text),
    ],
    identity: &["id", "name"],
    cascade_column: None,
    cascades: &[CascadeRule {
        child: &honor::DESCRIPTOR,
        foreign_key: "teacher_id",
        reason: CASCADE_REASON,
    }],
};

/// A member of the teaching staff.
#[derive(Debug, Clone, Copy)]
pub struct Teacher;

impl Entity for Teacher {
    type Get = GetTeachers;
    type Create = CreateTeacher;
    type Update = UpdateTeacher;

    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }
}
