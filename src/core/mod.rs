pub mod extractor;
pub mod navigator;
pub mod normalize;
pub mod report;
pub mod resolver;
pub mod session;
pub mod workflow;
pub mod xlsx;

pub use crate::domain::model::{PriceRecord, RunSummary};
pub use crate::domain::ports::{Element, Locator, Page, Storage, WaitPolicy};
pub use crate::utils::error::Result;
