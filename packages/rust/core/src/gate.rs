//! Timed yes/no prompt on the diagnostic stream.
//!
//! The blocking read and the deadline race; whichever resolves first
//! decides, and the loser is discarded. Defaults are asymmetric on
//! purpose: an empty acknowledgment means yes, while silence until the
//! deadline (or a closed stdin) means no. This mirrors the observed
//! behavior of the tool this replaces.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use playscout_shared::ConfirmGate;

/// Gate backed by the process stdin.
pub struct TimedStdinGate;

#[async_trait]
impl ConfirmGate for TimedStdinGate {
    async fn confirm(&self, prompt: &str, timeout: Duration) -> bool {
        eprint!("{prompt}");
        let _ = std::io::Write::flush(&mut std::io::stderr());

        let reader = BufReader::new(tokio::io::stdin());
        confirm_from_reader(reader, timeout).await
    }
}

/// Race one line of input against the deadline.
pub(crate) async fn confirm_from_reader<R>(reader: R, timeout: Duration) -> bool
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut lines = reader.lines();

    match tokio::time::timeout(timeout, lines.next_line()).await {
        Err(_elapsed) => {
            eprintln!();
            eprintln!("Timeout expired. Defaulting to 'No'.");
            false
        }
        Ok(Err(e)) => {
            debug!(error = %e, "input read failed; defaulting to no");
            false
        }
        // Closed input channel behaves like no input at all.
        Ok(Ok(None)) => {
            debug!("input stream closed; defaulting to no");
            false
        }
        Ok(Ok(Some(line))) => {
            let answer = line.trim();
            // A bare Enter is an acknowledgment, so it counts as yes.
            answer.is_empty() || answer.eq_ignore_ascii_case("y")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn answer(input: &'static [u8]) -> bool {
        confirm_from_reader(BufReader::new(input), Duration::from_secs(5)).await
    }

    #[tokio::test]
    async fn empty_line_means_yes() {
        assert!(answer(b"\n").await);
    }

    #[tokio::test]
    async fn explicit_yes_any_case() {
        assert!(answer(b"y\n").await);
        assert!(answer(b"Y\n").await);
        assert!(answer(b"  y  \n").await);
    }

    #[tokio::test]
    async fn anything_else_means_no() {
        assert!(!answer(b"No\n").await);
        assert!(!answer(b"n\n").await);
        assert!(!answer(b"yes please\n").await);
    }

    #[tokio::test]
    async fn closed_input_means_no() {
        assert!(!confirm_from_reader(BufReader::new(tokio::io::empty()), Duration::from_secs(5)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_with_no_input_means_no() {
        // A duplex pipe with the write half kept open but silent: the
        // read stays pending until the paused clock jumps the deadline.
        let (reader, _writer) = tokio::io::duplex(16);
        assert!(!confirm_from_reader(BufReader::new(reader), Duration::from_secs(5)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn input_before_deadline_wins_the_race() {
        let (reader, mut writer) = tokio::io::duplex(16);

        let task = tokio::spawn(async move {
            confirm_from_reader(BufReader::new(reader), Duration::from_secs(5)).await
        });

        tokio::io::AsyncWriteExt::write_all(&mut writer, b"y\n")
            .await
            .unwrap();

        assert!(task.await.unwrap());
    }
}
