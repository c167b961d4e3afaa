//! # unidesk-entity
//!
//! Domain entities of the Unidesk administrative backend. Each module holds
//! one entity's static [`EntityDescriptor`], its marker type implementing
//! [`Entity`], the typed get/create/update requests and a partial row model
//! that list results deserialize into.
//!
//! [`Entity`]: unidesk_core::traits::Entity

use unidesk_core::registry::EntityDescriptor;

pub mod department;
pub mod honor;
pub mod publication;
pub mod relations;
pub mod role;
pub mod teacher;
pub mod user;
pub mod validation;

pub use department::Department;
pub use honor::Honor;
pub use publication::Publication;
pub use relations::Reference;
pub use role::Role;
pub use teacher::Teacher;
pub use user::User;

/// Every entity descriptor, in dependency order.
pub static ENTITIES: [&EntityDescriptor; 6] = [
    &role::DESCRIPTOR,
    &user::DESCRIPTOR,
    &department::DESCRIPTOR,
    &teacher::DESCRIPTOR,
    &publication::DESCRIPTOR,
    &honor::DESCRIPTOR,
];

/// Find a descriptor by entity name.
pub fn descriptor(name: &str) -> Option<&'static EntityDescriptor> {
    ENTITIES.iter().copied().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use unidesk_core::registry::{DELETED_COLUMN, FieldSource, GUID_COLUMN, ID_COLUMN};

    use super::*;

    #[test]
    fn test_every_entity_has_system_columns() {
        for entity in ENTITIES {
            for column in [ID_COLUMN, GUID_COLUMN, DELETED_COLUMN] {
                let present = entity
                    .fields
                    .iter()
                    .any(|f| f.source == FieldSource::Column(column) && !f.writable);
                assert!(present, "{} lacks read-only column {column}", entity.name);
            }
        }
    }

    #[test]
    fn test_identity_fields_resolve() {
        for entity in ENTITIES {
            assert_eq!(entity.identity[0], "id", "{}", entity.name);
            for name in entity.identity {
                assert!(entity.field(name).is_some(), "{}.{name}", entity.name);
            }
        }
    }

    #[test]
    fn test_field_names_are_unique() {
        for entity in ENTITIES {
            for (i, field) in entity.fields.iter().enumerate() {
                let dupes = entity.fields[i + 1..].iter().filter(|f| f.name == field.name);
                assert_eq!(dupes.count(), 0, "{}.{}", entity.name, field.name);
            }
        }
    }

    #[test]
    fn test_cascade_children_record_reason() {
        for entity in ENTITIES {
            for rule in entity.cascades {
                assert!(rule.child.cascade_column.is_some(), "{}", rule.child.name);
            }
        }
    }

    #[test]
    fn test_teacher_cascades_to_honor() {
        let rule = &teacher::DESCRIPTOR.cascades[0];
        assert_eq!(rule.child.name, "honor");
        assert_eq!(rule.foreign_key, "teacher_id");
        assert_eq!(rule.reason, "teacher");
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(descriptor("publication").map(|d| d.table), Some("publications"));
        assert!(descriptor("course").is_none());
    }
}
