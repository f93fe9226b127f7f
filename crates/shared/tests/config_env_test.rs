//! 配置加载的集成测试
//!
//! 验证环境变量覆盖配置文件中的值。

use std::fs;
use std::path::PathBuf;

use journal_shared::config::AppConfig;

#[test]
fn test_env_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        "[generator]\ncount = 50\nwindow_seconds = 120\n",
    )
    .unwrap();

    // SAFETY: 本测试文件只有这一个用例修改环境变量
    unsafe {
        std::env::set_var("JOURNAL_GENERATOR__COUNT", "7");
        std::env::set_var("JOURNAL_GENERATOR__DESTINATION", "/tmp/from-env");
    }

    let config = AppConfig::load_from(dir.path(), "development");

    unsafe {
        std::env::remove_var("JOURNAL_GENERATOR__COUNT");
        std::env::remove_var("JOURNAL_GENERATOR__DESTINATION");
    }

    let config = config.unwrap();
    assert_eq!(config.generator.count, 7);
    assert_eq!(config.generator.window_seconds, 120);
    assert_eq!(
        config.generator.destination,
        Some(PathBuf::from("/tmp/from-env"))
    );
}
