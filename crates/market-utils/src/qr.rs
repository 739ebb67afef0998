use crate::error::UtilsError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Luma};
use qrcode::QrCode;
use std::io::{self, Write};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// `io::Write` adapter that pushes every chunk the PNG encoder emits into a channel.
/// Dropping it closes the stream.
struct ChunkSink {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl Write for ChunkSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tx
            .send(buf.to_vec())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "QR chunk collector dropped"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn render_png(payload: &str, sink: ChunkSink) -> Result<(), UtilsError> {
    let code = QrCode::new(payload.as_bytes())?;
    let image = code.render::<Luma<u8>>().build();
    PngEncoder::new(sink).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::L8,
    )?;
    Ok(())
}

/// Encodes `url` as a QR code and returns it as a `data:image/png;base64,...` URI.
///
/// Encoding runs on the blocking pool and streams PNG chunks back to this task,
/// which concatenates them once the encoder finishes. The output is deterministic
/// for a given URL.
pub async fn encode_qr_data_uri(url: &str) -> Result<String, UtilsError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let payload = url.to_owned();
    let encoder = tokio::task::spawn_blocking(move || render_png(&payload, ChunkSink { tx }));

    let mut png = Vec::new();
    let mut chunks = 0usize;
    while let Some(chunk) = rx.recv().await {
        png.extend_from_slice(&chunk);
        chunks += 1;
    }

    // Partial output from a failed encoder is discarded here.
    encoder.await??;

    tracing::trace!(chunks, bytes = png.len(), "QR image encoded");
    Ok(format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(&png)))
}

/// Generates a deposit QR code for `asset` in the background and hands the data URI
/// to `on_ready(asset, data_uri)` exactly once when it is done.
///
/// Failures are logged and swallowed: `on_ready` is simply never called. Returns
/// `None` (after logging) when called outside a tokio runtime.
pub fn generate_qr_data<F>(url: &str, asset: &str, on_ready: F) -> Option<JoinHandle<()>>
where
    F: FnOnce(String, String) + Send + 'static,
{
    let handle = match Handle::try_current() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(asset, error = %e, "Could not create deposit QR");
            return None;
        }
    };

    let url = url.to_owned();
    let asset = asset.to_owned();
    Some(handle.spawn(async move {
        match encode_qr_data_uri(&url).await {
            Ok(data_uri) => on_ready(asset, data_uri),
            Err(e) => tracing::error!(%asset, error = %e, "Could not create deposit QR"),
        }
    }))
}
