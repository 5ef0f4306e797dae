// Adapters layer: concrete implementations of the domain ports.

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod storage;
pub mod webdriver;
