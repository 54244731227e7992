use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmtpError {
    #[error("connect failed: {0}")]
    Connect(#[source] std::io::Error),

    #[error("socket io failed: {0}")]
    Io(#[source] std::io::Error),

    #[error("no reply within the idle timeout")]
    Timeout,

    #[error("server closed the connection")]
    ConnectionClosed,
}
