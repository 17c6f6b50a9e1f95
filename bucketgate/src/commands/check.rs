// bucketgate/src/commands/check.rs
//! `check` command: streams keys through the limiter, one verdict per line.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::borrow::Cow;
use std::io::{BufRead, Write};

use bucketgate_core::RateLimiter;

/// Totals for one `check` run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub admitted: u64,
    pub denied: u64,
}

/// Feeds every line of `reader` to `limiter` as a key and writes
/// `ALLOW <key>` or `DENY <key>` for each.
///
/// Lines are handled as they arrive, so piped input gets answers immediately.
/// A trailing `\r` is stripped; everything else, including an empty line, is
/// the key verbatim. Bytes that are not valid UTF-8 are replaced with U+FFFD
/// and the line is still checked.
pub fn run_check<R: BufRead, W: Write>(
    limiter: &dyn RateLimiter,
    mut reader: R,
    writer: &mut W,
    color: bool,
) -> Result<CheckSummary> {
    info!("Starting bucketgate check.");
    let mut summary = CheckSummary::default();

    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read key from input")?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            warn!("Input line is not valid UTF-8; checking it with replacement characters");
        }
        let key = line.strip_suffix('\n').unwrap_or(&line);
        let key = key.strip_suffix('\r').unwrap_or(key);

        if limiter.allow(key) {
            summary.admitted += 1;
            write_verdict(writer, "ALLOW", key, color, true)?;
        } else {
            summary.denied += 1;
            write_verdict(writer, "DENY", key, color, false)?;
        }
        writer.flush()?;
    }

    debug!(
        "Check finished: {} admitted, {} denied",
        summary.admitted, summary.denied
    );
    Ok(summary)
}

fn write_verdict<W: Write>(
    writer: &mut W,
    label: &str,
    key: &str,
    color: bool,
    admitted: bool,
) -> Result<()> {
    if !color {
        writeln!(writer, "{} {}", label, key)?;
    } else if admitted {
        writeln!(writer, "{} {}", label.green().bold(), key)?;
    } else {
        writeln!(writer, "{} {}", label.red().bold(), key)?;
    }
    Ok(())
}

/// Writes the summary as a single JSON line.
pub fn write_summary<W: Write>(summary: &CheckSummary, writer: &mut W) -> Result<()> {
    let json = serde_json::to_string(summary).context("Failed to serialize check summary")?;
    writeln!(writer, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketgate_core::{BucketConfig, NoopObserver, TokenBucketLimiter};
    use std::io::Cursor;
    use std::sync::Arc;

    fn limiter(capacity: f64) -> TokenBucketLimiter {
        TokenBucketLimiter::with_observer(
            BucketConfig::new(capacity, 1e-9).unwrap(),
            Arc::new(NoopObserver),
        )
    }

    #[test]
    fn test_verdict_per_line() {
        let limiter = limiter(2.0);
        let input = Cursor::new("alice\nalice\nbob\nalice\n");
        let mut out = Vec::new();

        let summary = run_check(&limiter, input, &mut out, false).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ALLOW alice\nALLOW alice\nALLOW bob\nDENY alice\n"
        );
        assert_eq!(summary, CheckSummary { admitted: 3, denied: 1 });
    }

    #[test]
    fn test_crlf_and_empty_keys() {
        let limiter = limiter(1.0);
        let input = Cursor::new("k\r\n\n\nk\n");
        let mut out = Vec::new();

        run_check(&limiter, input, &mut out, false).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "ALLOW k\nALLOW \nDENY \nDENY k\n");
        assert_eq!(limiter.bucket_count(), 2);
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_the_stream() {
        let limiter = limiter(1.0);
        let input = Cursor::new(b"a\xff\nb\nb".to_vec());
        let mut out = Vec::new();

        let summary = run_check(&limiter, input, &mut out, false).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ALLOW a\u{FFFD}\nALLOW b\nDENY b\n"
        );
        assert_eq!(summary, CheckSummary { admitted: 2, denied: 1 });
        assert!(limiter.contains_key("a\u{FFFD}"));
    }

    #[test]
    fn test_summary_json() {
        let mut out = Vec::new();
        write_summary(&CheckSummary { admitted: 4, denied: 1 }, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"admitted\":4,\"denied\":1}\n");
    }
}
