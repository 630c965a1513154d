//! Mapping between parsed IRC messages and relay stanzas.
//!
//! Parsing and serialization are done by `irc-proto`; this module decides
//! which messages the relay core sees and how chat bodies are cut into
//! PRIVMSG payloads.

use crate::transport::{PresenceKind, Stanza};
use irc_proto::{Command, Message, Prefix};

/// Payload bytes per outbound PRIVMSG. Leaves room for the command, target
/// and the `:nick!user@host` prefix the server adds when relaying.
pub const MAX_CHUNK_BYTES: usize = 400;

/// Nickname of the sending user, if the prefix names one.
pub fn sender(msg: &Message) -> Option<&str> {
    match msg.prefix.as_ref()? {
        Prefix::Nickname(nick, _, _) => Some(nick),
        Prefix::ServerName(_) => None,
    }
}

/// Compare nicknames under RFC 1459 casemapping.
pub fn nick_eq(a: &str, b: &str) -> bool {
    fn fold(c: char) -> char {
        match c {
            '[' => '{',
            ']' => '}',
            '\\' => '|',
            '~' => '^',
            c => c.to_ascii_lowercase(),
        }
    }
    a.chars().map(fold).eq(b.chars().map(fold))
}

/// Map an inbound message to the stanza the relay core sees, if any.
///
/// `own_nick` is the bot's current nickname; only private messages and
/// invites addressed to it count.
pub fn classify(msg: &Message, own_nick: &str) -> Option<Stanza> {
    match &msg.command {
        Command::PRIVMSG(target, text) => {
            if !nick_eq(target, own_nick) {
                return None;
            }
            // CTCP requests (VERSION, PING, ACTION) are not chat commands.
            if text.starts_with('\u{1}') {
                return None;
            }
            Some(Stanza::Message {
                from: sender(msg)?.to_string(),
                body: Some(text.clone()),
            })
        }
        Command::INVITE(target, channel) => {
            if !nick_eq(target, own_nick) {
                return None;
            }
            Some(Stanza::Presence {
                from: sender(msg)?.to_string(),
                kind: PresenceKind::Subscribe {
                    channel: channel.clone(),
                },
            })
        }
        Command::QUIT(_) => Some(Stanza::Presence {
            from: sender(msg)?.to_string(),
            kind: PresenceKind::Unavailable,
        }),
        Command::ERROR(text) => Some(Stanza::Error {
            from: None,
            text: text.clone(),
        }),
        Command::Response(resp, args) => error_numeric(msg, *resp as u16, args),
        Command::Raw(code, args) => error_numeric(msg, code.parse().ok()?, args),
        _ => None,
    }
}

/// 4xx/5xx numerics become error stanzas. The first argument is our own
/// nick and is dropped from the text.
fn error_numeric(msg: &Message, code: u16, args: &[String]) -> Option<Stanza> {
    if !(400..600).contains(&code) {
        return None;
    }
    let from = msg.prefix.as_ref().map(|prefix| match prefix {
        Prefix::ServerName(name) | Prefix::Nickname(name, _, _) => name.clone(),
    });
    Some(Stanza::Error {
        from,
        text: format!("{code} {}", args.get(1..).unwrap_or_default().join(" ")),
    })
}

/// Strip characters that would break line framing.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .filter(|&c| c != '\0')
        .collect()
}

/// Split a chat body into PRIVMSG payloads: one per non-empty line, long
/// lines cut on char boundaries to at most `max` bytes.
pub fn chat_chunks(body: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    for line in body.split('\n') {
        let line: String = line.chars().filter(|&c| c != '\r' && c != '\0').collect();
        let mut rest = line.as_str();
        while !rest.is_empty() {
            let mut end = rest.len().min(max.max(4));
            while !rest.is_char_boundary(end) {
                end -= 1;
            }
            let (chunk, tail) = rest.split_at(end);
            chunks.push(chunk.to_string());
            rest = tail;
        }
    }
    chunks
}
