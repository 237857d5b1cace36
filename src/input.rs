//! Input sources feeding raw PCM chunks to the meter.
//!
//! Each source runs in its own tokio task and forwards chunks over an mpsc
//! channel, so the analyzer keeps a single owner in the main loop.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use bytes::{Bytes, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Raw PCM on standard input until EOF
    Stdin,
    /// One datagram per chunk on 0.0.0.0:<port>
    Udp { port: u16 },
}

impl FromStr for InputSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "stdin" | "-" => Ok(InputSource::Stdin),
            other => {
                let port = other
                    .strip_prefix("udp:")
                    .with_context(|| format!("unknown input {:?} (expected \"stdin\" or \"udp:<port>\")", other))?;
                let port = port
                    .parse()
                    .with_context(|| format!("invalid UDP port {:?}", port))?;
                Ok(InputSource::Udp { port })
            }
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "stdin"),
            InputSource::Udp { port } => write!(f, "udp:{}", port),
        }
    }
}

/// Start reading `source` in a background task.
///
/// * `source`      - where to read from
/// * `buffer_size` - bytes per read (stdin) or max datagram size (UDP)
/// * `tx`          - receives each chunk; the task ends when it is dropped
///
/// The channel closes when the source is exhausted.
pub fn spawn(source: InputSource, buffer_size: usize, tx: mpsc::Sender<Bytes>) -> JoinHandle<Result<()>> {
    log::info!("Reading PCM from {} ({} byte reads)", source, buffer_size);
    tokio::spawn(async move {
        match source {
            InputSource::Stdin => read_stdin(buffer_size, tx).await,
            InputSource::Udp { port } => receive_udp(port, buffer_size, tx).await,
        }
    })
}

async fn read_stdin(buffer_size: usize, tx: mpsc::Sender<Bytes>) -> Result<()> {
    let mut stdin = tokio::io::stdin();
    let mut buf = BytesMut::with_capacity(buffer_size);
    loop {
        buf.reserve(buffer_size);
        let n = stdin.read_buf(&mut buf).await.context("Failed to read stdin")?;
        if n == 0 {
            log::info!("stdin closed");
            return Ok(());
        }
        if tx.send(buf.split().freeze()).await.is_err() {
            log::warn!("Meter stopped, dropping stdin input");
            return Ok(());
        }
    }
}

async fn receive_udp(port: u16, buffer_size: usize, tx: mpsc::Sender<Bytes>) -> Result<()> {
    let socket = UdpSocket::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind UDP port {}", port))?;

    let mut buf = vec![0u8; buffer_size];
    loop {
        let (len, peer) = socket.recv_from(&mut buf).await?;
        log::trace!("{} bytes from {}", len, peer);
        if len == 0 {
            continue;
        }
        if tx.send(Bytes::copy_from_slice(&buf[..len])).await.is_err() {
            log::warn!("Meter stopped, closing UDP input");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources() {
        assert_eq!("stdin".parse::<InputSource>().unwrap(), InputSource::Stdin);
        assert_eq!("-".parse::<InputSource>().unwrap(), InputSource::Stdin);
        assert_eq!(
            "udp:5005".parse::<InputSource>().unwrap(),
            InputSource::Udp { port: 5005 }
        );
        assert!("udp:".parse::<InputSource>().is_err());
        assert!("udp:70000".parse::<InputSource>().is_err());
        assert!("file:/tmp/a.raw".parse::<InputSource>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for source in [InputSource::Stdin, InputSource::Udp { port: 9 }] {
            assert_eq!(source.to_string().parse::<InputSource>().unwrap(), source);
        }
    }

    #[tokio::test]
    async fn test_udp_datagrams_become_chunks() {
        // Bind to an ephemeral port first to find a free one
        let probe = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = probe.local_addr().unwrap().port();
        drop(probe);

        let (tx, mut rx) = mpsc::channel(4);
        let task = spawn(InputSource::Udp { port }, 64, tx);

        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = format!("127.0.0.1:{}", port);
        // Resend until the receiver task has bound the port
        let mut chunk = None;
        for _ in 0..100 {
            sender.send_to(&[1, 2, 3], &target).await.unwrap();
            if let Ok(received) =
                tokio::time::timeout(std::time::Duration::from_millis(50), rx.recv()).await
            {
                chunk = received;
                break;
            }
        }
        assert_eq!(chunk.as_deref(), Some(&[1u8, 2, 3][..]));
        task.abort();
    }
}
