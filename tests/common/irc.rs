//! Fake IRC server.
//!
//! Accepts one relay connection at a time and lets a test script the
//! server side of the conversation.

use irc_proto::{Command, Message};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// Listening side, waiting for the relay to connect.
pub struct FakeIrcServer {
    listener: TcpListener,
}

impl FakeIrcServer {
    pub async fn bind() -> anyhow::Result<Self> {
        Ok(Self {
            listener: TcpListener::bind("127.0.0.1:0").await?,
        })
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or_default()
    }

    /// Accept the next relay connection.
    pub async fn accept(&self) -> anyhow::Result<IrcPeer> {
        let (stream, _) = timeout(Duration::from_secs(10), self.listener.accept()).await??;
        let (read_half, write_half) = stream.into_split();
        Ok(IrcPeer {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }
}

/// One accepted relay connection.
pub struct IrcPeer {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl IrcPeer {
    /// Send a raw line to the relay.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one message from the relay.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        let mut line = String::new();
        let read = timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("relay closed the connection");
        }
        line.trim_end()
            .parse::<Message>()
            .map_err(|e| anyhow::anyhow!("Parse error: {}", e))
    }

    /// Receive messages until `predicate` matches; returns that command.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Command>
    where
        F: FnMut(&Command) -> bool,
    {
        loop {
            let msg = self.recv().await?;
            if predicate(&msg.command) {
                return Ok(msg.command);
            }
        }
    }

    /// Next PRIVMSG from the relay as `(target, text)`.
    pub async fn recv_privmsg(&mut self) -> anyhow::Result<(String, String)> {
        match self
            .recv_until(|cmd| matches!(cmd, Command::PRIVMSG(..)))
            .await?
        {
            Command::PRIVMSG(target, text) => Ok((target, text)),
            other => anyhow::bail!("expected PRIVMSG, got {other:?}"),
        }
    }

    /// Complete registration for `nick` and wait for the initial status.
    pub async fn welcome(&mut self, nick: &str) -> anyhow::Result<()> {
        self.recv_until(|cmd| matches!(cmd, Command::USER(..)))
            .await?;
        self.send_raw(&format!(":irc.test 001 {nick} :Welcome to the test network"))
            .await?;
        self.recv_until(|cmd| matches!(cmd, Command::AWAY(_)))
            .await?;
        Ok(())
    }

    /// Deliver a private message from `from` to `nick`.
    pub async fn privmsg(&mut self, from: &str, nick: &str, text: &str) -> anyhow::Result<()> {
        self.send_raw(&format!(":{from}!{from}@test.host PRIVMSG {nick} :{text}"))
            .await
    }
}
