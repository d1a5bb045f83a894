//! Real-time filing stream over a single WebSocket connection.
//!
//! A session binds exactly one handler at connect time and feeds it each
//! text frame in order. There is no reconnect, backoff or heartbeat: once
//! the socket closes the session is over.

pub mod handler;

pub use handler::{MessageHandler, PrintHandler, StreamMessage};

use futures::StreamExt;
use log::{debug, info, warn};
use std::future::Future;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::api::deserializers::OneOrMany;
use crate::api::transport::redact_url;
use crate::api::types::Filing;
use crate::api::Credential;
use crate::config::ClientConfig;
use crate::error::{Result, SecApiError, TransportError};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

/// Decode one text frame: a filing object or an array of them
pub fn decode_frame(text: &str) -> Result<StreamMessage> {
    serde_json::from_str::<OneOrMany<Filing>>(text)
        .map(|decoded| decoded.0)
        .map_err(|source| SecApiError::StreamDecode {
            frame: text.to_string(),
            source,
        })
}

/// Opens stream sessions
#[derive(Debug, Clone, Default)]
pub struct StreamClient {
    config: ClientConfig,
}

impl StreamClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// `{stream_url}?apiKey=<token>`
    pub fn stream_url(&self, credential: &Credential) -> Result<Url> {
        let mut url = Url::parse(&self.config.stream_url)?;
        url.query_pairs_mut().append_pair("apiKey", credential.expose());
        Ok(url)
    }

    /// Open a session bound to `handler`
    pub async fn connect<H: MessageHandler>(
        &self,
        credential: &Credential,
        handler: H,
    ) -> Result<StreamSession<H>> {
        let url = self.stream_url(credential)?;
        info!("Connecting to stream {}", redact_url(&url));

        let (socket, _response) = connect_async(url.as_str())
            .await
            .map_err(TransportError::WebSocket)?;

        info!("Stream connection open");
        Ok(StreamSession {
            socket,
            handler,
            state: SessionState::Open,
            dispatched: 0,
        })
    }

    /// Open a session that prints every filing
    pub async fn connect_with_default_handler(
        &self,
        credential: &Credential,
    ) -> Result<StreamSession<PrintHandler>> {
        self.connect(credential, PrintHandler).await
    }
}

enum Flow {
    Continue,
    Stop,
}

/// A live connection and its handler
pub struct StreamSession<H: MessageHandler> {
    socket: Socket,
    handler: H,
    state: SessionState,
    dispatched: u64,
}

impl<H: MessageHandler> StreamSession<H> {
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Frames handed to the handler so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Dispatch frames until the socket closes. Returns the frame count.
    ///
    /// A malformed frame ends the session with [`SecApiError::StreamDecode`].
    pub async fn run(&mut self) -> Result<u64> {
        self.run_until(std::future::pending()).await
    }

    /// Like [`run`](Self::run), but closes the socket once `shutdown` completes
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<u64>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        while self.state == SessionState::Open {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Stream shutdown requested");
                    self.close().await?;
                }
                frame = self.socket.next() => {
                    if let Flow::Stop = self.on_frame(frame).await? {
                        self.state = SessionState::Closed;
                    }
                }
            }
        }

        Ok(self.dispatched)
    }

    async fn on_frame(&mut self, frame: Option<std::result::Result<Message, WsError>>) -> Result<Flow> {
        match frame {
            Some(Ok(Message::Text(text))) => {
                let message = match decode_frame(&text) {
                    Ok(message) => message,
                    Err(e) => {
                        warn!("Closing stream after undecodable frame");
                        let _ = self.close().await;
                        return Err(e);
                    }
                };
                self.handler.handle(message);
                self.dispatched += 1;
                Ok(Flow::Continue)
            }
            Some(Ok(Message::Close(reason))) => {
                info!("Stream closed by peer: {:?}", reason);
                Ok(Flow::Stop)
            }
            Some(Ok(other)) => {
                debug!("Ignoring non-text frame ({} bytes)", other.len());
                Ok(Flow::Continue)
            }
            None | Some(Err(WsError::ConnectionClosed)) | Some(Err(WsError::AlreadyClosed)) => {
                info!("Stream connection closed");
                Ok(Flow::Stop)
            }
            Some(Err(e)) => {
                self.state = SessionState::Closed;
                Err(TransportError::WebSocket(e).into())
            }
        }
    }

    /// Close the socket. Closing an already closed session is a no-op.
    pub async fn close(&mut self) -> Result<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        self.state = SessionState::Closed;

        match self.socket.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(TransportError::WebSocket(e).into()),
        }
    }
}
