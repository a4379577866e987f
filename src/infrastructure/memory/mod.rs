//! Memory Layer - In-Memory State Management
//!
//! 实现 RestListener，规则保存在内存中

mod rest_listener;

pub use rest_listener::InMemoryRestListener;
