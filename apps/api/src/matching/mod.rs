// Resume ↔ job-description matching.
// Implements: normalization, lexical similarity, LLM judgment, score combination, ranking.
// All LLM calls go through llm_client; nothing here talks to the judge API directly.

pub mod combiner;
pub mod handlers;
pub mod judgment;
pub mod lexical;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod ranker;
