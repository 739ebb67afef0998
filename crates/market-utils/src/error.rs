use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Failed to encode QR code: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Failed to encode QR image as PNG: {0}")]
    Image(#[from] image::ImageError),

    #[error("QR encoder task failed: {0}")]
    EncoderTask(#[from] tokio::task::JoinError),

    #[error("Failed to parse account balance: {0}")]
    BalanceJson(#[from] serde_json::Error),

    #[error("Invalid balance entry for {asset}: {reason}")]
    InvalidBalance { asset: String, reason: String },
}
