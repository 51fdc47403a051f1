/// Errors produced by the serial link.
#[derive(thiserror::Error, Debug)]
pub enum LinkError {
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}
