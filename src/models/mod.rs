pub mod area;
pub mod letter;
pub mod loaders;
pub mod question;
pub mod record;
pub mod tier;

pub use area::Area;
pub use letter::Letter;
pub use loaders::load_jsonl_dataset;
pub use question::Question;
pub use record::{AggregateDecision, EvaluationRecord, PassResult};
pub use tier::Tier;
