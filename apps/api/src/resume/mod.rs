// Resume intake: text extraction, heuristic parsing, optional LLM enrichment,
// storage and archival.

pub mod enrich;
pub mod extract;
pub mod handlers;
pub mod parser;
pub mod prompts;
