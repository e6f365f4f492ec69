//! Browser adapters for the zen-core ports: OpenAI-compatible LLM over
//! fetch, IndexedDB/memory storage, Web Audio cues, a one-second ticker
//! and a `spawn_local` spawner.

pub mod llm;
pub mod storage;
pub mod audio;
pub mod ticker;
pub mod spawner;
