//! Publication entity.

pub mod model;
pub mod request;

use unidesk_core::registry::{EntityDescriptor, FieldDef, FieldKind};
use unidesk_core::traits::Entity;

use crate::relations::TEACHER;

pub use model::PublicationRow;
pub use request::{CreatePublication, GetPublications, UpdatePublication};

/// Registry entry for `publications`.
pub static DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    name: "publication",
    table: "publications",
    fields: &[
        FieldDef::system("id", "id", FieldKind::Integer),
        FieldDef::system("guid", "guid", FieldKind::Text),
        FieldDef::system("isDeleted", "is_deleted", FieldKind::Bool),
        FieldDef::column("title", "title", FieldKind::Text),
        FieldDef::column("venue", "venue", FieldKind::Text),
        FieldDef::column("publishedOn", "published_on", FieldKind::Date),
        FieldDef::column("citations", "citations", FieldKind::Integer),
        FieldDef::column("teacherId", "teacher_id", FieldKind::Integer),
        FieldDef::joined("teacher.id", &TEACHER, "id", FieldKind::Integer),
        FieldDef::joined("teacher.name", &TEACHER, "name", FieldKind::Text),
    ],
    identity: &["id", "title"],
    cascade_column: None,
    cascades: &[],
};

/// A paper, book or other research output.
#[derive(Debug, Clone, Copy)]
pub struct Publication;

impl Entity for Publication {
    type Get = GetPublications;
    type Create = CreatePublication;
    type Update = UpdatePublication;

    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }
}
