//! 存储模块
//!
//! 提供基于目录的夹具文件存储。

pub mod fixture_store;

pub use fixture_store::{
    FixtureStore, StoredFixture, VerificationFailure, VerificationReport, ensure_directory,
};
