//! The query expansion engine.
//!
//! [`RocchioExpander`] is the primary path: extraction, boosting, Rocchio
//! combination, ranking, and surface-syntax re-serialization. The optional
//! [`TopicExpander`] appends a topic-model term instead. Both resolve
//! feedback documents from the locally retrieved hits of the initial search;
//! any other document source is a configuration error.

pub mod boost;
pub mod combine;
pub mod config;
pub mod feedback;
pub mod rocchio;
pub mod topic;

pub use self::boost::BoostAssigner;
pub use self::combine::combine;
pub use self::config::{ExpansionConfig, ExpansionMethod, LdaConfig};
pub use self::feedback::{feedback_documents, feedback_vectors};
pub use self::rocchio::{ExpandedQuery, RocchioExpander};
pub use self::topic::{Topic, TopicExpander, TopicModel};
