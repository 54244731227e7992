use std::net::IpAddr;

use crate::clock::Clock;

use super::classify::{classify_rcpt_code, has_block_signal};
use super::error::SmtpError;
use super::options::ProbeOptions;
use super::session::SmtpSession;
use super::types::{ProbeReason, ProbeResult};

/// The prober's explicit state value, advanced by one function per reply —
/// no socket-event callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Connected,
    HeloSent,
    MailSent,
    RcptSent,
    QuitSent,
}

/// Runs one full RCPT probe for `email` over a single TCP connection to
/// `target_ip`, sourced from `local_ip`. HELO/MAIL FROM/RCPT TO/QUIT only;
/// DATA is never issued.
pub fn probe(
    local_ip: IpAddr,
    target_ip: IpAddr,
    email: &str,
    options: &ProbeOptions,
    clock: &dyn Clock,
) -> ProbeResult {
    match run(local_ip, target_ip, email, options, clock) {
        Ok(result) => result,
        Err((reason, details, block_signal)) => ProbeResult {
            email: email.to_string(),
            valid: false,
            reason: Some(reason),
            details,
            source_ip: local_ip,
            block_signal,
            probed_at: clock.now(),
        },
    }
}

type ProbeError = (ProbeReason, Option<String>, bool);

fn to_probe_error(err: SmtpError) -> ProbeError {
    let block_signal = has_block_signal(&err.to_string());
    match err {
        SmtpError::Timeout => (ProbeReason::Timeout, None, block_signal),
        SmtpError::ConnectionClosed | SmtpError::Connect(_) | SmtpError::Io(_) => {
            (ProbeReason::ConnectionError, Some(err.to_string()), block_signal)
        }
    }
}

fn run(
    local_ip: IpAddr,
    target_ip: IpAddr,
    email: &str,
    options: &ProbeOptions,
    clock: &dyn Clock,
) -> Result<ProbeResult, ProbeError> {
    let mut session = SmtpSession::connect(local_ip, target_ip, options.smtp_port, options.idle_timeout)
        .map_err(to_probe_error)?;

    // S0 CONNECTED: read the banner, send HELO.
    let banner = session.read_reply().map_err(to_probe_error)?;
    let mut block_signal = has_block_signal(&banner.text);
    session
        .write_line(&format!("HELO {}", options.helo_hostname))
        .map_err(to_probe_error)?;
    let _state = ProbeState::HeloSent;

    // S1 HELO_SENT: expect 2xx, send MAIL FROM.
    let helo_reply = session.read_reply().map_err(to_probe_error)?;
    block_signal |= has_block_signal(&helo_reply.text);
    if !helo_reply.code.starts_with('2') {
        return Err((ProbeReason::UnknownError, Some(helo_reply.text), block_signal));
    }
    session
        .write_line(&format!("MAIL FROM:<{}>", options.sender))
        .map_err(to_probe_error)?;
    let _state = ProbeState::MailSent;

    // S2 MAIL_SENT: expect 2xx, send RCPT TO.
    let mail_reply = session.read_reply().map_err(to_probe_error)?;
    block_signal |= has_block_signal(&mail_reply.text);
    if !mail_reply.code.starts_with('2') {
        return Err((ProbeReason::UnknownError, Some(mail_reply.text), block_signal));
    }
    session
        .write_line(&format!("RCPT TO:<{email}>"))
        .map_err(to_probe_error)?;
    let _state = ProbeState::RcptSent;

    // S3 RCPT_SENT: classify, then QUIT regardless of the verdict.
    let rcpt_reply = session.read_reply().map_err(to_probe_error)?;
    block_signal |= has_block_signal(&rcpt_reply.text);
    let (valid, reason) = classify_rcpt_code(&rcpt_reply.code);

    let _ = session.write_line("QUIT");
    let _state = ProbeState::QuitSent;
    let _ = session.read_reply(); // best-effort; terminal either way

    Ok(ProbeResult {
        email: email.to_string(),
        valid,
        reason,
        details: if valid { None } else { Some(rcpt_reply.text) },
        source_ip: local_ip,
        block_signal,
        probed_at: clock.now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;
    use std::time::Duration;

    /// Spawns a loopback SMTP server that plays back a fixed request/response
    /// script, one exchange per line the client sends.
    fn spawn_mock_server(script: Vec<(&'static str, &'static str)>) -> (std::net::SocketAddr, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream.write_all(script[0].1.as_bytes()).unwrap();

            for (expected_prefix, response) in script.into_iter().skip(1) {
                let mut buf = [0u8; 512];
                let n = stream.read(&mut buf).unwrap_or(0);
                let received = String::from_utf8_lossy(&buf[..n]);
                assert!(
                    received.starts_with(expected_prefix),
                    "expected line starting with {expected_prefix:?}, got {received:?}"
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (addr, handle)
    }

    #[test]
    fn successful_rcpt_probe_returns_valid_true() {
        let (addr, handle) = spawn_mock_server(vec![
            ("", "220 mail.example.com ESMTP\r\n"),
            ("HELO", "250 mail.example.com\r\n"),
            ("MAIL FROM", "250 OK\r\n"),
            ("RCPT TO", "250 OK\r\n"),
            ("QUIT", "221 Bye\r\n"),
        ]);

        let options = ProbeOptions::new("prober.local", "verify@prober.local");
        let clock = FixedClock(42);
        let result = probe(addr.ip(), addr.ip(), "ada.lovelace@example.com", &options, &clock);

        handle.join().unwrap();
        assert!(result.valid);
        assert_eq!(result.reason, None);
    }

    #[test]
    fn rejected_rcpt_probe_returns_invalid_recipient() {
        let (addr, handle) = spawn_mock_server(vec![
            ("", "220 mail.example.com ESMTP\r\n"),
            ("HELO", "250 mail.example.com\r\n"),
            ("MAIL FROM", "250 OK\r\n"),
            ("RCPT TO", "550 No such user here\r\n"),
            ("QUIT", "221 Bye\r\n"),
        ]);

        let options = ProbeOptions::new("prober.local", "verify@prober.local");
        let clock = FixedClock(42);
        let result = probe(addr.ip(), addr.ip(), "nobody@example.com", &options, &clock);

        handle.join().unwrap();
        assert!(!result.valid);
        assert_eq!(result.reason, Some(ProbeReason::InvalidRecipient));
    }

    #[test]
    fn connection_refused_is_reported_as_connection_error() {
        // Bind and immediately drop to get a loopback port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let options = ProbeOptions::new("prober.local", "verify@prober.local");
        let clock = FixedClock(1);
        let result = probe(addr.ip(), addr.ip(), "nobody@example.com", &options, &clock);

        assert!(!result.valid);
        assert_eq!(result.reason, Some(ProbeReason::ConnectionError));
        // std surfaces "connection refused" for this on Linux, tripping the
        // block-signal substring table as a side effect.
        assert!(result.block_signal || result.details.is_some());
    }

    #[test]
    fn idle_timeout_is_reported_when_banner_never_arrives() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (_stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_millis(200));
        });

        let mut options = ProbeOptions::new("prober.local", "verify@prober.local");
        options.idle_timeout = Duration::from_millis(50);
        let clock = FixedClock(7);
        let result = probe(addr.ip(), addr.ip(), "nobody@example.com", &options, &clock);

        handle.join().unwrap();
        assert!(!result.valid);
        assert_eq!(result.reason, Some(ProbeReason::Timeout));
    }
}
