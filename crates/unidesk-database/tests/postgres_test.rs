//! Round trips against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use unidesk_core::config::{DatabaseConfig, QueryConfig};
use unidesk_core::error::ErrorKind;
use unidesk_core::query::ListParams;
use unidesk_core::traits::{Repository, TokenGenerator};
use unidesk_core::types::DeleteRequest;
use unidesk_database::{DatabasePool, HexTokenGenerator, Repositories, migration};
use unidesk_entity::department::CreateDepartment;
use unidesk_entity::honor::{CreateHonor, GetHonors};
use unidesk_entity::role::{CreateRole, GetRoles, UpdateRole};
use unidesk_entity::teacher::{CreateTeacher, UpdateTeacher};

async fn connect() -> (DatabasePool, Repositories) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let config = DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 1,
        connect_timeout_seconds: 10,
        idle_timeout_seconds: 60,
        run_migrations: true,
    };
    let db = DatabasePool::connect(&config).await.expect("connect");
    migration::run_migrations(db.pool())
        .await
        .expect("migrations");
    let repos = Repositories::postgres(db.pool().clone(), &QueryConfig::default());
    (db, repos)
}

fn unique(prefix: &str) -> String {
    let suffix = HexTokenGenerator::new().generate();
    format!("{prefix}-{}", &suffix[..12])
}

#[tokio::test]
#[ignore]
async fn test_pg_guarded_update_and_delete() {
    let (db, repos) = connect().await;
    assert!(db.health_check().await.expect("health"));

    let name = unique("role");
    let created = repos
        .roles
        .create(&CreateRole {
            name: name.clone(),
            description: None,
        })
        .await
        .expect("create");

    let update = |guid: &str| UpdateRole {
        id: created.id,
        guid: guid.to_string(),
        name: None,
        description: Some("updated".into()),
    };
    let updated = repos.roles.update(&update(&created.guid)).await.expect("update");
    assert_ne!(updated.guid, created.guid);

    let err = repos.roles.update(&update(&created.guid)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::GuidChanged);

    repos
        .roles
        .delete(&DeleteRequest::new(created.id, &updated.guid))
        .await
        .expect("delete");
    let err = repos
        .roles
        .delete(&DeleteRequest::new(created.id, &updated.guid))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AlreadyDeleted);

    let page = repos
        .roles
        .list(&GetRoles {
            name_equal: Some(name),
            ..GetRoles::default()
        })
        .await
        .expect("list");
    assert_eq!(page.total, Some(0));
}

#[tokio::test]
#[ignore]
async fn test_pg_cascade_and_constraints() {
    let (_db, repos) = connect().await;

    let dept = repos
        .departments
        .create(&CreateDepartment {
            name: "Physics".into(),
            code: unique("PHY"),
            description: None,
            founded_on: None,
        })
        .await
        .expect("department");
    let teacher = repos
        .teachers
        .create(&CreateTeacher {
            name: "Curie".into(),
            title: None,
            email: None,
            department_id: dept.id,
            user_id: None,
            hired_on: None,
        })
        .await
        .expect("teacher");
    for title in ["Nobel Physics", "Nobel Chemistry"] {
        repos
            .honors
            .create(&CreateHonor {
                title: title.into(),
                awarded_by: None,
                awarded_on: None,
                teacher_id: teacher.id,
            })
            .await
            .expect("honor");
    }

    repos
        .teachers
        .delete(&DeleteRequest::new(teacher.id, &teacher.guid))
        .await
        .expect("delete teacher");

    let cascaded = repos
        .honors
        .list(&GetHonors {
            params: ListParams {
                cascade_deleted_by: Some("teacher".into()),
                select: vec!["teacher.name".into()],
                ..ListParams::default()
            },
            teacher_id: Some(teacher.id),
            ..GetHonors::default()
        })
        .await
        .expect("list");
    assert_eq!(cascaded.total, Some(2));
    assert_eq!(cascaded.response_list[0].str("teacher.name"), Some("Curie"));

    let err = repos
        .honors
        .create(&CreateHonor {
            title: "Orphan".into(),
            awarded_by: None,
            awarded_on: None,
            teacher_id: i64::MAX,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
#[ignore]
async fn test_pg_migration_status_after_run() {
    let (db, _repos) = connect().await;
    let status = migration::migration_status(db.pool())
        .await
        .expect("status");

    assert!(!status.is_empty());
    assert!(status.iter().all(|m| m.applied));
    db.close().await;
}

#[tokio::test]
#[ignore]
async fn test_pg_rejected_teacher_delete_rolls_back() {
    let (_db, repos) = connect().await;

    let dept = repos
        .departments
        .create(&CreateDepartment {
            name: "Chemistry".into(),
            code: unique("CHM"),
            description: None,
            founded_on: None,
        })
        .await
        .expect("department");
    let teacher = repos
        .teachers
        .create(&CreateTeacher {
            name: "Hodgkin".into(),
            title: None,
            email: None,
            department_id: dept.id,
            user_id: None,
            hired_on: None,
        })
        .await
        .expect("teacher");
    repos
        .honors
        .create(&CreateHonor {
            title: "Copley Medal".into(),
            awarded_by: None,
            awarded_on: None,
            teacher_id: teacher.id,
        })
        .await
        .expect("honor");
    repos
        .teachers
        .update(&UpdateTeacher {
            id: teacher.id,
            guid: teacher.guid.clone(),
            name: None,
            title: Some("Professor".into()),
            email: None,
            department_id: None,
            user_id: None,
            hired_on: None,
        })
        .await
        .expect("update");

    let err = repos
        .teachers
        .delete(&DeleteRequest::new(teacher.id, &teacher.guid))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AlreadyDeleted);

    let live = repos
        .honors
        .list(&GetHonors {
            teacher_id: Some(teacher.id),
            ..GetHonors::default()
        })
        .await
        .expect("list");
    assert_eq!(live.total, Some(1));
}

#[tokio::test]
#[ignore]
async fn test_pg_page_total_matches_rows() {
    let (_db, repos) = connect().await;
    let prefix = unique("paged");
    for i in 0..3 {
        repos
            .roles
            .create(&CreateRole {
                name: format!("{prefix}-{i}"),
                description: None,
            })
            .await
            .expect("create");
    }

    let page = |page: i64| GetRoles {
        params: ListParams {
            page: Some(page),
            size: Some(2),
            ..ListParams::default()
        },
        name: Some(prefix.clone()),
        ..GetRoles::default()
    };

    let first = repos.roles.list(&page(1)).await.expect("list");
    assert_eq!(first.response_list.len(), 2);
    assert_eq!(first.total, Some(3));
    assert_eq!(first.total_pages, Some(2));

    let beyond = repos.roles.list(&page(3)).await.expect("list");
    assert!(beyond.is_empty());
    assert_eq!(beyond.total, Some(3));
}
