use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::device::Autographer;
use crate::parser;

/// Writes the camera's clock correction: the number of seconds the camera
/// lags behind `now`. The camera applies it once unplugged.
///
/// The camera's clock reading comes from its info file, which is only written
/// when the camera is plugged in, so this should run right after connecting.
/// When there's no usable reading the camera is assumed to be in sync.
pub fn set_camera_time(camera: &Autographer, now: NaiveDateTime) -> Result<i64> {
    // TODO: estimate when the camera was plugged in from the system log
    // instead of assuming it was just now.
    let camera_time = match read_camera_time(camera.info_file()) {
        Ok(camera_time) => camera_time,
        Err(e) => {
            warn!("{e:#}: could not read camera timestamp file");
            now
        }
    };
    debug!("camera time {camera_time}, computer time {now}");

    let correction = correction_seconds(now, camera_time);
    let correction_file = camera.clock_correction_file();
    std::fs::write(&correction_file, correction.to_string())
        .context(format!("failed to write clock correction to {correction_file:?}"))?;

    info!("Camera clock now synced to PC time.");
    Ok(correction)
}

fn read_camera_time<P: AsRef<Path>>(info_file: P) -> Result<NaiveDateTime> {
    let info_file = info_file.as_ref();
    let info = std::fs::read_to_string(info_file)
        .context(format!("failed to read info file at {info_file:?}"))?;
    parser::camera_time(&info)
}

/// Whole seconds from `camera_time` to `computer_time`, truncated toward zero.
pub fn correction_seconds(computer_time: NaiveDateTime, camera_time: NaiveDateTime) -> i64 {
    (computer_time - camera_time).num_seconds()
}
