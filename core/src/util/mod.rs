mod tail;

pub use tail::TailBuffer;
