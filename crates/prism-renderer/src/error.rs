#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RendererError {
    #[error("integer overflow computing {0}")]
    IntegerOverflow(&'static str),
    #[error("indirect record at byte offset {offset} ({size} bytes) overruns a {len}-byte buffer")]
    IndirectBufferOverrun { offset: usize, size: usize, len: usize },
    #[error("out of memory")]
    OutOfMemory,
    #[error("backend failure: {0}")]
    Backend(String),
}
