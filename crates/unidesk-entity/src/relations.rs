//! Relations shared by several entities.

use serde::{Deserialize, Serialize};
use unidesk_core::registry::Relation;

/// `users.role_id → roles`.
pub static ROLE: Relation = Relation {
    name: "role",
    table: "roles",
    local_column: "role_id",
};

/// `teachers.department_id → departments`.
pub static DEPARTMENT: Relation = Relation {
    name: "department",
    table: "departments",
    local_column: "department_id",
};

/// `teachers.user_id → users`.
pub static USER: Relation = Relation {
    name: "user",
    table: "users",
    local_column: "user_id",
};

/// `publications.teacher_id` / `honors.teacher_id → teachers`.
pub static TEACHER: Relation = Relation {
    name: "teacher",
    table: "teachers",
    local_column: "teacher_id",
};

/// A projected relation: whichever of its `id` and `name` were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Related row id.
    pub id: Option<i64>,
    /// Related row display name.
    pub name: Option<String>,
}
