//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use std::collections::BTreeSet;

use chrono::NaiveDate;

use unidesk_core::config::QueryConfig;
use unidesk_core::traits::Repository;
use unidesk_core::types::{Paginator, Record, WriteResult};
use unidesk_database::Repositories;
use unidesk_entity::department::CreateDepartment;
use unidesk_entity::honor::CreateHonor;
use unidesk_entity::role::CreateRole;
use unidesk_entity::teacher::CreateTeacher;
use unidesk_entity::user::CreateUser;

/// Repositories over a fresh in-process store.
pub struct TestApp {
    pub repos: Repositories,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(QueryConfig::default())
    }

    pub fn with_config(config: QueryConfig) -> Self {
        Self {
            repos: Repositories::in_memory(&config),
        }
    }

    pub async fn create_role(&self, name: &str) -> WriteResult {
        self.repos
            .roles
            .create(&CreateRole {
                name: name.into(),
                description: None,
            })
            .await
            .expect("Failed to create role")
    }

    pub async fn create_user(&self, name: &str, role_id: i64) -> WriteResult {
        self.repos
            .users
            .create(&CreateUser {
                name: name.into(),
                email: format!("{}@uni.edu", name.to_lowercase()),
                phone: None,
                role_id,
                joined_on: None,
            })
            .await
            .expect("Failed to create user")
    }

    pub async fn create_department(&self, name: &str, code: &str) -> WriteResult {
        self.repos
            .departments
            .create(&CreateDepartment {
                name: name.into(),
                code: code.into(),
                description: None,
                founded_on: None,
            })
            .await
            .expect("Failed to create department")
    }

    pub async fn create_teacher(&self, name: &str, department_id: i64) -> WriteResult {
        self.repos
            .teachers
            .create(&CreateTeacher {
                name: name.into(),
                title: Some("Professor".into()),
                email: None,
                department_id,
                user_id: None,
                hired_on: None,
            })
            .await
            .expect("Failed to create teacher")
    }

    pub async fn create_honor(&self, title: &str, teacher_id: i64) -> WriteResult {
        self.repos
            .honors
            .create(&CreateHonor {
                title: title.into(),
                awarded_by: None,
                awarded_on: None,
                teacher_id,
            })
            .await
            .expect("Failed to create honor")
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn select(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

pub fn ids(page: &Paginator<Record>) -> Vec<i64> {
    page.response_list.iter().filter_map(Record::id).collect()
}

pub fn leaf_fields(record: &Record) -> BTreeSet<String> {
    record.leaf_fields().into_iter().collect()
}
