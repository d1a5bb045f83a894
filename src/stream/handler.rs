use crate::api::types::Filing;

/// One decoded stream frame: usually a single filing
pub type StreamMessage = Vec<Filing>;

/// Receives every decoded frame of a session, in arrival order.
///
/// Each call returns before the next frame is read.
pub trait MessageHandler: Send {
    fn handle(&mut self, message: StreamMessage);
}

impl<F> MessageHandler for F
where
    F: FnMut(StreamMessage) + Send,
{
    fn handle(&mut self, message: StreamMessage) {
        self(message)
    }
}

/// Default handler: prints each filing as one JSON line on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintHandler;

impl MessageHandler for PrintHandler {
    fn handle(&mut self, message: StreamMessage) {
        for filing in message {
            match serde_json::to_string(&filing) {
                Ok(line) => println!("{}", line),
                Err(e) => log::warn!("Failed to print filing: {}", e),
            }
        }
    }
}
