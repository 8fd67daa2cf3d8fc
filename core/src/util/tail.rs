use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Keeps the last `cap` lines pushed into it. Everything malt reports is
/// line-oriented, so the capture is line-granular rather than byte-granular.
#[derive(Clone)]
pub struct TailBuffer {
    inner: Arc<Mutex<VecDeque<String>>>,
    cap: usize,
}

impl TailBuffer {
    pub fn new(cap: usize) -> Arc<Self> {
        Arc::new(Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(cap.min(64)))),
            cap,
        })
    }

    pub fn push(&self, line: &str) {
        let mut g = self.inner.lock().unwrap();
        if g.len() == self.cap {
            g.pop_front();
        }
        g.push_back(line.to_string());
    }

    pub fn to_lines(&self) -> Vec<String> {
        let g = self.inner.lock().unwrap();
        g.iter().cloned().collect()
    }
}
