use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::RunnerError;
use crate::util::TailBuffer;

use super::types::{OutputLine, OutputStream};

/// Continuously drains one pipe of the child so it is never blocked on a
/// full buffer, splitting the byte stream into lines as they arrive.
pub(super) fn pump_stream<R>(
    rd: R,
    stream: OutputStream,
    tail: Arc<TailBuffer>,
    line_tx: mpsc::Sender<OutputLine>,
) -> JoinHandle<Result<u64, RunnerError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    let label: &'static str = match stream {
        OutputStream::Stdout => "stdout",
        OutputStream::Stderr => "stderr",
    };

    tokio::spawn(async move {
        let mut rd = rd;
        let mut buf = vec![0u8; 16 * 1024];
        let mut total = 0u64;
        let mut line_buf: Vec<u8> = Vec::with_capacity(8 * 1024);

        loop {
            let n = rd.read(&mut buf).await.map_err(|e| RunnerError::StreamIo {
                stream: label,
                source: e,
            })?;
            if n == 0 {
                break;
            }
            total += n as u64;

            line_buf.extend_from_slice(&buf[..n]);
            while let Some(pos) = line_buf.iter().position(|&b| b == b'\n') {
                let mut one = line_buf.drain(..=pos).collect::<Vec<u8>>();
                trim_newline(&mut one);
                let text = String::from_utf8_lossy(&one).to_string();
                tail.push(&text);
                // Send failures mean the consumer is gone; keep draining so
                // the child never stalls on a full pipe.
                let _ = line_tx.send(OutputLine { stream, text }).await;
            }
        }

        // EOF flush: deliver the last partial line if it doesn't end with '\n'.
        if !line_buf.is_empty() {
            trim_newline(&mut line_buf);
            if !line_buf.is_empty() {
                let text = String::from_utf8_lossy(&line_buf).to_string();
                tail.push(&text);
                let _ = line_tx.send(OutputLine { stream, text }).await;
            }
        }

        Ok(total)
    })
}

fn trim_newline(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn splits_chunks_into_lines_in_order() {
        let (mut wr, rd) = tokio::io::duplex(1024);
        let tail = TailBuffer::new(16);
        let (tx, mut rx) = mpsc::channel::<OutputLine>(8);

        let task = pump_stream(rd, OutputStream::Stdout, tail, tx);

        wr.write_all(b"first\nsec").await.unwrap();
        wr.write_all(b"ond\nthird\n").await.unwrap();
        drop(wr);

        let mut lines = Vec::new();
        while let Some(line) = rx.recv().await {
            assert_eq!(line.stream, OutputStream::Stdout);
            lines.push(line.text);
        }
        assert_eq!(lines, vec!["first", "second", "third"]);

        let total = task.await.unwrap().unwrap();
        assert_eq!(total, b"first\nsecond\nthird\n".len() as u64);
    }

    #[tokio::test]
    async fn flushes_last_line_without_newline_on_eof() {
        let (mut wr, rd) = tokio::io::duplex(1024);
        let tail = TailBuffer::new(16);
        let (tx, mut rx) = mpsc::channel::<OutputLine>(8);

        let task = pump_stream(rd, OutputStream::Stderr, tail.clone(), tx);

        wr.write_all(b"hello").await.unwrap();
        drop(wr);

        let line = rx.recv().await.expect("expected one line");
        assert_eq!(line.text, "hello");
        assert_eq!(line.stream, OutputStream::Stderr);
        assert_eq!(tail.to_lines(), vec!["hello"]);

        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn strips_carriage_returns() {
        let (mut wr, rd) = tokio::io::duplex(64);
        let tail = TailBuffer::new(4);
        let (tx, mut rx) = mpsc::channel::<OutputLine>(4);

        let task = pump_stream(rd, OutputStream::Stdout, tail, tx);

        wr.write_all(b"dos line\r\n").await.unwrap();
        drop(wr);

        assert_eq!(rx.recv().await.unwrap().text, "dos line");
        task.await.unwrap().unwrap();
    }
}
