//! Cross-platform audio recorder using cpal
//!
//! The cpal stream is not `Send`, so it lives on a dedicated capture thread
//! for the duration of a recording. Samples are downmixed to mono i16 and
//! written as a WAV file when the recording stops.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration as StdDuration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::application::ports::{PlatformRecorder, RecordingError};

/// How often the capture thread checks for a stop request
const POLL_INTERVAL: StdDuration = StdDuration::from_millis(20);

fn lock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Audio recorder using cpal
pub struct CpalRecorder {
    output_dir: PathBuf,
    /// Captured samples (mono, i16, at device sample rate)
    buffer: Arc<StdMutex<Vec<i16>>>,
    sample_rate: Arc<AtomicU32>,
    is_recording: Arc<AtomicBool>,
    worker: StdMutex<Option<JoinHandle<()>>>,
}

impl CpalRecorder {
    /// Create a recorder that writes its files into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            buffer: Arc::new(StdMutex::new(Vec::new())),
            sample_rate: Arc::new(AtomicU32::new(0)),
            is_recording: Arc::new(AtomicBool::new(false)),
            worker: StdMutex::new(None),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn input_device() -> Result<cpal::Device, RecordingError> {
        cpal::default_host()
            .default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Mix interleaved frames down to one channel
    fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels <= 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / frame.len() as i32) as i16
            })
            .collect()
    }

    fn f32_to_i16(sample: f32) -> i16 {
        (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
    }

    /// Open and start an input stream feeding `buffer`. Runs on the capture thread.
    fn open_stream(
        buffer: Arc<StdMutex<Vec<i16>>>,
        is_recording: Arc<AtomicBool>,
        sample_rate: Arc<AtomicU32>,
    ) -> Result<cpal::Stream, RecordingError> {
        let device = Self::input_device()?;
        let supported = device
            .default_input_config()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get config: {}", e)))?;

        let sample_format = supported.sample_format();
        let config = supported.config();
        let channels = config.channels;
        sample_rate.store(config.sample_rate.0, Ordering::SeqCst);

        let on_error = |err: cpal::StreamError| warn!(error = %err, "audio stream error");

        let stream = match sample_format {
            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if is_recording.load(Ordering::SeqCst) {
                        lock(&buffer).extend(Self::downmix(data, channels));
                    }
                },
                on_error,
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if is_recording.load(Ordering::SeqCst) {
                        let samples: Vec<i16> = data.iter().map(|&s| Self::f32_to_i16(s)).collect();
                        lock(&buffer).extend(Self::downmix(&samples, channels));
                    }
                },
                on_error,
                None,
            ),
            other => {
                return Err(RecordingError::StartFailed(format!(
                    "Unsupported sample format: {:?}",
                    other
                )))
            }
        }
        .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;
        Ok(stream)
    }

    fn next_file_path(&self) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        self.output_dir.join(format!("dream-{}.wav", stamp))
    }

    fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<(), RecordingError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let write_err = |e: hound::Error| RecordingError::StopFailed(format!("WAV write failed: {}", e));

        let mut writer = hound::WavWriter::create(path, spec).map_err(write_err)?;
        for &sample in samples {
            writer.write_sample(sample).map_err(write_err)?;
        }
        writer.finalize().map_err(write_err)
    }

    /// Wait for the capture thread to drop its stream
    async fn join_worker(&self) {
        let handle = lock(&self.worker).take();
        if let Some(handle) = handle {
            if let Err(e) = tokio::task::spawn_blocking(move || handle.join()).await {
                warn!(error = %e, "capture thread join failed");
            }
        }
    }
}

#[async_trait]
impl PlatformRecorder for CpalRecorder {
    async fn start(&self) -> Result<(), RecordingError> {
        if self.is_recording.swap(true, Ordering::SeqCst) {
            return Err(RecordingError::AlreadyRecording);
        }
        lock(&self.buffer).clear();

        let buffer = Arc::clone(&self.buffer);
        let is_recording = Arc::clone(&self.is_recording);
        let sample_rate = Arc::clone(&self.sample_rate);
        let (ready_tx, ready_rx) = oneshot::channel();

        let handle = std::thread::spawn(move || {
            let stream = match Self::open_stream(buffer, Arc::clone(&is_recording), sample_rate) {
                Ok(stream) => stream,
                Err(e) => {
                    is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));

            while is_recording.load(Ordering::SeqCst) {
                std::thread::sleep(POLL_INTERVAL);
            }
            drop(stream);
        });
        *lock(&self.worker) = Some(handle);

        match ready_rx.await {
            Ok(Ok(())) => {
                debug!(rate = self.sample_rate.load(Ordering::SeqCst), "capture started");
                Ok(())
            }
            Ok(Err(e)) => {
                self.join_worker().await;
                Err(e)
            }
            Err(_) => {
                self.is_recording.store(false, Ordering::SeqCst);
                self.join_worker().await;
                Err(RecordingError::StartFailed("capture thread exited".into()))
            }
        }
    }

    async fn stop(&self) -> Result<Option<String>, RecordingError> {
        if !self.is_recording.swap(false, Ordering::SeqCst) {
            return Err(RecordingError::StopFailed("No recording in progress".into()));
        }
        self.join_worker().await;

        let samples = std::mem::take(&mut *lock(&self.buffer));
        if samples.is_empty() {
            debug!("capture produced no samples");
            return Ok(None);
        }

        let sample_rate = self.sample_rate.load(Ordering::SeqCst);
        let path = self.next_file_path();
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| RecordingError::StopFailed(e.to_string()))?;

        let target = path.clone();
        tokio::task::spawn_blocking(move || Self::write_wav(&target, &samples, sample_rate))
            .await
            .map_err(|e| RecordingError::StopFailed(format!("Write task error: {}", e)))??;

        debug!(path = %path.display(), "recording written");
        Ok(Some(path.to_string_lossy().into_owned()))
    }

    async fn file_size(&self, uri: &str) -> Option<u64> {
        tokio::fs::metadata(uri).await.ok().map(|m| m.len())
    }
}

impl Drop for CpalRecorder {
    fn drop(&mut self) {
        self.is_recording.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_single_channel() {
        let mono = vec![100i16, 200, 300];
        assert_eq!(CpalRecorder::downmix(&mono, 1), mono);
    }

    #[test]
    fn downmix_two_channels() {
        let stereo = vec![100i16, 200, 300, 400];
        assert_eq!(CpalRecorder::downmix(&stereo, 2), vec![150, 350]);
    }

    #[test]
    fn float_samples_are_clamped() {
        assert_eq!(CpalRecorder::f32_to_i16(2.0), i16::MAX);
        assert_eq!(CpalRecorder::f32_to_i16(0.0), 0);
    }

    #[test]
    fn wav_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        CpalRecorder::write_wav(&path, &[0, 1000, -1000, 0], 16_000).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 16_000);
        assert_eq!(reader.len(), 4);
    }

    #[tokio::test]
    async fn stop_without_start_fails() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = CpalRecorder::new(dir.path());
        assert!(!recorder.is_recording());
        assert!(recorder.stop().await.is_err());
    }

    #[tokio::test]
    async fn missing_file_has_no_size() {
        let recorder = CpalRecorder::new("/nonexistent");
        assert_eq!(recorder.file_size("/nonexistent/dream.wav").await, None);
    }
}
