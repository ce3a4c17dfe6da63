pub mod advisor;
pub mod orchestrator;
pub mod parser;
pub mod summarizer;

pub use advisor::RuleBasedAdvisor;
pub use orchestrator::AdviceOrchestrator;
