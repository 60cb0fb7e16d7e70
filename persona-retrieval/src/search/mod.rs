pub mod retriever;
pub mod rrf_fusion;

pub use retriever::{QueryResults, Retriever};
pub use rrf_fusion::fuse;
