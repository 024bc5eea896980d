pub mod analysis;
pub mod llm;
pub mod session;

pub use analysis::AnalysisService;
pub use llm::{OpenAiClient, ReasoningClient};
pub use session::AnalysisSession;
