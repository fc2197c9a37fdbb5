//! Test infrastructure shared by repository and service tests.

mod db;
pub(crate) mod fixtures;

pub(crate) use db::TestDb;
