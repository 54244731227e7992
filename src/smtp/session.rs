use std::io::{Read, Write};
use std::net::{IpAddr, SocketAddr, TcpStream};
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};

use super::error::SmtpError;

/// One parsed SMTP reply: the 3-digit status code and the joined text of
/// every line (continuation prefixes stripped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: String,
    pub text: String,
}

/// A single TCP connection to one MX host, bound to a chosen local source
/// address before connecting. `std::net::TcpStream::connect` has no stable
/// way to pick the local address itself, so the socket is built and bound
/// with `socket2` first and converted to a standard `TcpStream` afterwards.
pub struct SmtpSession {
    stream: TcpStream,
}

impl SmtpSession {
    pub fn connect(
        local_ip: IpAddr,
        target_ip: IpAddr,
        port: u16,
        idle_timeout: Duration,
    ) -> Result<Self, SmtpError> {
        let domain = match target_ip {
            IpAddr::V4(_) => Domain::IPV4,
            IpAddr::V6(_) => Domain::IPV6,
        };
        let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP)).map_err(SmtpError::Connect)?;

        let local_addr = SocketAddr::new(local_ip, 0);
        socket.bind(&local_addr.into()).map_err(SmtpError::Connect)?;

        socket.set_read_timeout(Some(idle_timeout)).map_err(SmtpError::Connect)?;
        socket.set_write_timeout(Some(idle_timeout)).map_err(SmtpError::Connect)?;

        let target = SocketAddr::new(target_ip, port);
        socket.connect(&target.into()).map_err(SmtpError::Connect)?;

        Ok(Self { stream: socket.into() })
    }

    pub fn write_line(&mut self, line: &str) -> Result<(), SmtpError> {
        self.stream.write_all(line.as_bytes()).map_err(SmtpError::Io)?;
        self.stream.write_all(b"\r\n").map_err(SmtpError::Io)
    }

    /// Reads one full SMTP reply. A fresh `read` call is issued for every
    /// chunk, each bounded by the session's idle timeout, so the timer is
    /// effectively reset on every inbound byte. Follows continuation lines
    /// (`NNN-...`) and stops at the first `NNN ...` terminal line.
    pub fn read_reply(&mut self) -> Result<SmtpReply, SmtpError> {
        let mut data = Vec::new();
        let mut chunk = [0u8; 512];

        loop {
            let n = self.stream.read(&mut chunk).map_err(|err| match err.kind() {
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => SmtpError::Timeout,
                _ => SmtpError::Io(err),
            })?;
            if n == 0 {
                return Err(SmtpError::ConnectionClosed);
            }
            data.extend_from_slice(&chunk[..n]);

            if let Some(reply) = try_parse_reply(&data) {
                return Ok(reply);
            }
        }
    }
}

fn try_parse_reply(data: &[u8]) -> Option<SmtpReply> {
    let text = String::from_utf8_lossy(data);
    if !text.ends_with("\r\n") {
        return None;
    }

    let lines: Vec<&str> = text.trim_end_matches("\r\n").split("\r\n").collect();
    let last = lines.last()?;
    if last.len() < 4 || !last.as_bytes()[0..3].iter().all(u8::is_ascii_digit) {
        return None;
    }
    if last.as_bytes()[3] != b' ' {
        return None; // continuation line (`NNN-`); keep reading
    }

    let code = last[0..3].to_string();
    let mut message = String::new();
    for (i, line) in lines.iter().enumerate() {
        if line.len() < 4 {
            continue;
        }
        if i > 0 {
            message.push('\n');
        }
        message.push_str(&line[4..]);
    }

    Some(SmtpReply { code, text: message })
}
