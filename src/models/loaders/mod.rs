pub mod jsonl_loader;

pub use jsonl_loader::{load_jsonl_dataset, RawQuestionRecord};
