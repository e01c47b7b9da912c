// image_processing.rs
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

use tracing::{error, info};

use crate::app::ConversionUpdate;
use crate::converter::{ConversionRequest, ConvertOptions};
use crate::utils::measure_time;

/// Runs the request on a worker thread; the receiver yields exactly one update.
pub fn start_conversion(request: ConversionRequest, options: ConvertOptions) -> Receiver<ConversionUpdate> {
    let (sender, receiver) = channel();
    std::thread::spawn(move || run_conversion(request, options, sender));
    receiver
}

fn run_conversion(request: ConversionRequest, options: ConvertOptions, sender: Sender<ConversionUpdate>) {
    info!(
        "Starting conversion of {} to {}",
        display_source(&request.source),
        request.format
    );

    let (result, duration) = measure_time(|| request.run(&options));
    let update = match result {
        Ok(path) => {
            info!("Conversion finished in {:?}", duration);
            ConversionUpdate::Succeeded(path)
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            ConversionUpdate::Failed(e.user_message())
        }
    };

    // The window may already be gone; nothing is left to report to.
    let _ = sender.send(update);
}

fn display_source(source: &Option<PathBuf>) -> String {
    source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<none>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_worker_reports_failure_once() {
        let dir = tempfile::tempdir().unwrap();
        let receiver = start_conversion(
            ConversionRequest {
                source: None,
                format: "png".to_string(),
                destination: dir.path().join("out.png"),
            },
            ConvertOptions::default(),
        );

        let update = receiver.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(update, ConversionUpdate::Failed("Please select an image first.".to_string()));
        assert!(receiver.recv_timeout(Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_worker_reports_written_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.png");
        image::RgbImage::from_pixel(3, 3, image::Rgb([1, 2, 3])).save(&source).unwrap();

        let receiver = start_conversion(
            ConversionRequest {
                source: Some(source),
                format: "BMP".to_string(),
                destination: dir.path().join("out"),
            },
            ConvertOptions::default(),
        );

        let update = receiver.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(update, ConversionUpdate::Succeeded(dir.path().join("out.bmp")));
    }
}
