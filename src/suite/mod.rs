pub mod loader;
pub mod types;

// Re-export commonly used types
pub use loader::SuiteLoader;
pub use types::{ExpectedType, TestCase};

/// 从文件路径加载测试用例
pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Vec<TestCase>> {
    SuiteLoader::load_file(path)
}
