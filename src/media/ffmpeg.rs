use crate::{
    foundation::error::{TryOnError, TryOnResult},
    media::source::{MediaSource, StreamConstraints, StreamHandle},
};

/// Camera backed by the system `ffmpeg` binary reading a v4l2 device into raw RGBA.
///
/// The negotiated size is probed with `ffprobe` before streaming, so the delivered frames carry
/// the size the driver actually picked rather than the requested one.
#[derive(Clone, Debug, Default)]
pub struct FfmpegCamera {
    _private: (),
}

impl FfmpegCamera {
    /// New backend; nothing is opened until [`MediaSource::acquire`].
    pub fn new() -> Self {
        Self::default()
    }
}

/// Map ffmpeg/ffprobe stderr to the acquisition error kinds.
pub fn classify_device_error(device: &str, stderr: &str) -> TryOnError {
    let msg = stderr.trim();
    let lower = msg.to_ascii_lowercase();
    if lower.contains("permission denied") || lower.contains("operation not permitted") {
        TryOnError::permission_denied(format!("camera '{device}': {msg}"))
    } else {
        TryOnError::device_unavailable(format!("camera '{device}': {msg}"))
    }
}

#[cfg(feature = "media-ffmpeg")]
mod imp {
    use std::{
        io::Read as _,
        process::{Child, ChildStdout, Command, Stdio},
    };

    use super::*;
    use crate::{
        foundation::core::{FrameRGBA, FrameSize},
        media::source::{FacingMode, MediaStream},
    };

    fn probe_device(constraints: &StreamConstraints) -> TryOnResult<FrameSize> {
        #[derive(serde::Deserialize)]
        struct ProbeStream {
            codec_type: Option<String>,
            width: Option<u32>,
            height: Option<u32>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeOut {
            streams: Vec<ProbeStream>,
        }

        let out = Command::new("ffprobe")
            .args(["-v", "error", "-f", "v4l2", "-video_size"])
            .arg(format!(
                "{}x{}",
                constraints.ideal_width, constraints.ideal_height
            ))
            .args(["-print_format", "json", "-show_streams", "-i"])
            .arg(&constraints.device)
            .output()
            .map_err(|e| {
                TryOnError::device_unavailable(format!("failed to run ffprobe: {e}"))
            })?;
        if !out.status.success() {
            return Err(classify_device_error(
                &constraints.device,
                &String::from_utf8_lossy(&out.stderr),
            ));
        }

        let parsed: ProbeOut = serde_json::from_slice(&out.stdout).map_err(|e| {
            TryOnError::device_unavailable(format!("ffprobe json parse failed: {e}"))
        })?;
        let video = parsed
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| TryOnError::device_unavailable("camera reports no video stream"))?;
        match (video.width, video.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Ok(FrameSize::new(w, h)),
            _ => Err(TryOnError::device_unavailable(
                "camera reports no usable frame size",
            )),
        }
    }

    impl MediaSource for FfmpegCamera {
        fn acquire(&mut self, constraints: &StreamConstraints) -> TryOnResult<StreamHandle> {
            constraints.validate()?;
            if constraints.facing == FacingMode::Environment {
                tracing::debug!("v4l2 has no facing metadata; using the configured device");
            }

            let size = probe_device(constraints)?;
            if size != constraints.ideal_size() {
                tracing::info!(requested = %constraints.ideal_size(), delivered = %size, "camera substituted frame size");
            }

            let mut child = Command::new("ffmpeg")
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .args(["-loglevel", "error", "-f", "v4l2", "-video_size"])
                .arg(size.to_string())
                .arg("-i")
                .arg(&constraints.device)
                .args(["-f", "rawvideo", "-pix_fmt", "rgba", "pipe:1"])
                .spawn()
                .map_err(|e| {
                    TryOnError::device_unavailable(format!(
                        "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                    ))
                })?;

            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| TryOnError::device_unavailable("failed to open ffmpeg stdout"))?;

            Ok(StreamHandle::new(Box::new(FfmpegStream {
                size,
                child: Some(child),
                stdout: Some(stdout),
            })))
        }
    }

    struct FfmpegStream {
        size: FrameSize,
        child: Option<Child>,
        stdout: Option<ChildStdout>,
    }

    impl MediaStream for FfmpegStream {
        fn read_frame(&mut self) -> TryOnResult<Option<FrameRGBA>> {
            let Some(stdout) = self.stdout.as_mut() else {
                return Err(TryOnError::device_unavailable("camera track has ended"));
            };
            let mut data = vec![0u8; self.size.rgba8_len()?];
            stdout.read_exact(&mut data).map_err(|e| {
                TryOnError::device_unavailable(format!("camera stream ended: {e}"))
            })?;
            Ok(Some(FrameRGBA {
                width: self.size.width,
                height: self.size.height,
                data,
                premultiplied: false,
            }))
        }

        fn stop_tracks(&mut self) {
            drop(self.stdout.take());
            if let Some(mut child) = self.child.take() {
                if let Err(e) = child.kill() {
                    tracing::debug!(error = %e, "ffmpeg already exited");
                }
                if let Err(e) = child.wait() {
                    tracing::warn!(error = %e, "failed to reap ffmpeg capture process");
                }
            }
        }

        fn live_tracks(&self) -> usize {
            usize::from(self.child.is_some())
        }
    }
}

#[cfg(not(feature = "media-ffmpeg"))]
impl MediaSource for FfmpegCamera {
    fn acquire(&mut self, _constraints: &StreamConstraints) -> TryOnResult<StreamHandle> {
        Err(TryOnError::device_unavailable(
            "camera capture requires the 'media-ffmpeg' feature",
        ))
    }
}
