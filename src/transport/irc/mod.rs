//! IRC client session.
//!
//! Connects to the chat server, registers the bot's nickname and then
//! exposes the connection as a [`StanzaSource`] / [`StanzaSink`] pair.
//! Private messages to the bot are chat messages, invites are subscription
//! requests and server `PING`s are answered here without reaching the
//! relay core.

mod message;
mod stream;
mod tls;

use message::{MAX_CHUNK_BYTES, chat_chunks, classify, nick_eq, sanitize, sender};
use stream::ClientStream;

use super::{Outgoing, Stanza, StanzaSink, StanzaSource};
use crate::config::ClientConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use irc_proto::{Command, Message, Response};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, info, trace, warn};

/// Inbound line limit. Covers 512-byte lines plus IRCv3 tags.
const MAX_LINE_LENGTH: usize = 16 * 1024;

/// How long the server gets to welcome us after NICK/USER.
const REGISTRATION_TIMEOUT: Duration = Duration::from_secs(30);

type Reader = FramedRead<ReadHalf<ClientStream>, LinesCodec>;
type Writer = Arc<Mutex<FramedWrite<WriteHalf<ClientStream>, LinesCodec>>>;

async fn send(writer: &Writer, command: Command) -> Result<(), TransportError> {
    let line = Message::from(command).to_string();
    let line = line.trim_end();
    trace!(line = %line, "-> server");
    // LinesCodec terminates with a bare LF.
    writer.lock().await.send(format!("{line}\r")).await?;
    Ok(())
}

/// Parse one inbound line. Unparseable lines are logged and skipped.
fn parse(raw: &str) -> Option<Message> {
    trace!(line = %raw, "<- server");
    match raw.parse::<Message>() {
        Ok(msg) => Some(msg),
        Err(e) => {
            debug!(line = %raw, error = %e, "Skipping unparseable line");
            None
        }
    }
}

/// Establish and register an IRC session.
pub async fn connect(config: &ClientConfig) -> Result<(IrcSource, IrcSink), TransportError> {
    info!(host = %config.host, port = config.port, tls = config.tls, "Connecting to chat server");

    let tcp_stream = TcpStream::connect((config.host.as_str(), config.port)).await?;
    let stream = if config.tls {
        ClientStream::Tls(Box::new(
            tls::upgrade(tcp_stream, &config.host, config.verify_cert).await?,
        ))
    } else {
        ClientStream::Plain(tcp_stream)
    };
    let secure = stream.is_tls();

    let (read_half, write_half) = tokio::io::split(stream);
    let mut reader = FramedRead::new(read_half, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
    let writer: Writer = Arc::new(Mutex::new(FramedWrite::new(write_half, LinesCodec::new())));

    let nick = register(&mut reader, &writer, config).await?;
    info!(nick = %nick, tls = secure, "Registered with chat server");

    for channel in &config.channels {
        send(&writer, Command::JOIN(sanitize(channel), None, None)).await?;
    }

    Ok((
        IrcSource {
            reader,
            writer: writer.clone(),
            nick: nick.clone(),
            pending_pong: None,
        },
        IrcSink { writer, nick },
    ))
}

/// Send PASS/NICK/USER and wait for the welcome numeric.
///
/// Returns the nickname the server confirmed.
async fn register(
    reader: &mut Reader,
    writer: &Writer,
    config: &ClientConfig,
) -> Result<String, TransportError> {
    if let Some(password) = &config.password {
        send(writer, Command::PASS(sanitize(password))).await?;
    }
    let mut nick = sanitize(&config.nick);
    send(writer, Command::NICK(nick.clone())).await?;
    send(
        writer,
        Command::USER(
            sanitize(config.username()),
            "0".to_string(),
            sanitize(&config.realname),
        ),
    )
    .await?;

    let deadline = Instant::now() + REGISTRATION_TIMEOUT;
    let mut retried_nick = false;

    loop {
        let raw = match tokio::time::timeout_at(deadline, reader.next()).await {
            Err(_) => {
                return Err(TransportError::Registration(
                    "timed out waiting for welcome".into(),
                ));
            }
            Ok(None) => return Err(TransportError::Closed),
            Ok(Some(raw)) => raw?,
        };
        let Some(msg) = parse(&raw) else {
            continue;
        };

        match msg.command {
            Command::Response(Response::RPL_WELCOME, args) => {
                return Ok(args.into_iter().next().unwrap_or(nick));
            }
            Command::Response(Response::ERR_NICKNAMEINUSE, _) if !retried_nick => {
                retried_nick = true;
                nick.push('_');
                warn!(nick = %nick, "Nickname in use, retrying");
                send(writer, Command::NICK(nick.clone())).await?;
            }
            Command::Response(
                resp @ (Response::ERR_NICKNAMEINUSE
                | Response::ERR_PASSWDMISMATCH
                | Response::ERR_YOUREBANNEDCREEP),
                args,
            ) => {
                return Err(TransportError::Registration(format!(
                    "{} {}",
                    resp as u16,
                    args.last().map(String::as_str).unwrap_or_default()
                )));
            }
            Command::ERROR(text) => return Err(TransportError::Registration(text)),
            Command::PING(server, _) => send(writer, Command::PONG(server, None)).await?,
            _ => debug!(line = %raw, "Ignoring line during registration"),
        }
    }
}

/// Inbound half: yields classified stanzas, answers server pings.
pub struct IrcSource {
    reader: Reader,
    writer: Writer,
    nick: String,
    /// PONG owed to the server, kept until written so a cancelled read
    /// does not lose it.
    pending_pong: Option<Command>,
}

#[async_trait]
impl StanzaSource for IrcSource {
    async fn next_stanza(&mut self) -> Result<Option<Stanza>, TransportError> {
        loop {
            if let Some(pong) = self.pending_pong.clone() {
                send(&self.writer, pong).await?;
                self.pending_pong = None;
            }

            let Some(raw) = self.reader.next().await else {
                return Ok(None);
            };
            let Some(msg) = parse(&raw?) else {
                continue;
            };

            match &msg.command {
                Command::PING(server, _) => {
                    self.pending_pong = Some(Command::PONG(server.clone(), None));
                    continue;
                }
                Command::NICK(new_nick)
                    if sender(&msg).is_some_and(|nick| nick_eq(nick, &self.nick)) =>
                {
                    info!(old = %self.nick, new = %new_nick, "Own nickname changed");
                    self.nick.clone_from(new_nick);
                    continue;
                }
                _ => {}
            }

            if let Some(stanza) = classify(&msg, &self.nick) {
                return Ok(Some(stanza));
            }
        }
    }
}

/// Outbound half.
pub struct IrcSink {
    writer: Writer,
    nick: String,
}

#[async_trait]
impl StanzaSink for IrcSink {
    async fn deliver(&mut self, out: Outgoing) -> Result<(), TransportError> {
        match out {
            Outgoing::Chat { to, body } => {
                let to = sanitize(&to);
                for chunk in chat_chunks(&body, MAX_CHUNK_BYTES) {
                    send(&self.writer, Command::PRIVMSG(to.clone(), chunk)).await?;
                }
            }
            Outgoing::Status(text) => {
                let text = sanitize(&text);
                let away = (!text.is_empty()).then_some(text);
                send(&self.writer, Command::AWAY(away)).await?;
            }
            Outgoing::AcceptSubscription { from, channel } => {
                debug!(from = %from, channel = %channel, "Joining invited channel");
                send(&self.writer, Command::JOIN(sanitize(&channel), None, None)).await?;
            }
            Outgoing::KeepAlive => {
                send(&self.writer, Command::PING(self.nick.clone(), None)).await?;
            }
        }
        Ok(())
    }

    fn self_identity(&self) -> &str {
        &self.nick
    }
}
