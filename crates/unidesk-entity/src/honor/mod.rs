//! Honor entity.
//!
//! Honors are the dependents of the teacher cascade: `cascade_deleted_by`
//! records which parent deletion removed them.

pub mod model;
pub mod request;

use unidesk_core::registry::{EntityDescriptor, FieldDef, FieldKind};
use unidesk_core::traits::Entity;

use crate::relations::TEACHER;

pub use model::HonorRow;
pub use request::{CreateHonor, GetHonors, UpdateHonor};

/// Registry entry for `honors`.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    name: "honor",
    table: "honors",
    fields: &[
        FieldDef::system("id", "id", FieldKind::Integer),
        FieldDef::system("guid", "guid", FieldKind::Text),
        FieldDef::system("isDeleted", "is_deleted", FieldKind::Bool),
        FieldDef::system("cascadeDeletedBy", "cascade_deleted_by", FieldKind::Text),
        FieldDef::column("title", "title", FieldKind::Text),
        FieldDef::column("awardedBy", "awarded_by", FieldKind::Text),
        FieldDef::column("awardedOn", "awarded_on", FieldKind::Date),
        FieldDef::column("teacherId", "teacher_id", FieldKind::Integer),
        FieldDef::joined("teacher.id", &TEACHER, "id", FieldKind::Integer),
        FieldDef::joined("teacher.name", &TEACHER, "name", FieldKind::Text),
    ],
    identity: &["id", "title"],
    cascade_column: Some("cascade_deleted_by"),
    cascades: &[],
};

/// An award or distinction held by a teacher.
#[derive(Debug, Clone, Copy)]
pub struct Honor;

impl Entity for Honor {
    type Get = GetHonors;
    type Create = CreateHonor;
    type Update = UpdateHonor;

    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }
}
