//! Kudo CRUD endpoints. Every handler runs behind `auth::auth_middleware`
//! and answers with a JSON body.

pub mod common;

pub mod list {
    pub mod index;
}
pub mod create {
    pub mod index;
}
pub mod show {
    pub mod index;
}
pub mod update {
    pub mod index;
}
pub mod delete {
    pub mod index;
}
