//! Watermark overlay filter graph.
//!
//! Maps the user-facing job settings (position, size, transparency) to
//! the parameters of an FFmpeg `filter_complex` that:
//! - scales the watermark relative to the base frame height (`scale2ref`)
//! - multiplies its alpha channel (`colorchannelmixer`)
//! - composites it at a corner with a fixed margin (`overlay`)
//! - normalises the pixel format of the result
//!
//! Input `[0]` is always the media file and `[1]` the watermark image.

use std::path::PathBuf;

use wm_models::{ConvertFile, JobDescriptor, Position};

use crate::command::FfmpegCommand;

/// Distance in pixels between the watermark and the frame edges.
pub const OVERLAY_MARGIN_PX: u32 = 5;

/// Filter graph parameters derived from job settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayParams {
    /// `x:y` expression of the watermark's top-left corner
    pub overlay_xy: String,
    /// Watermark height relative to the frame height
    pub scale_factor: f32,
    /// Alpha multiplier applied to the watermark
    pub alpha_factor: f32,
}

impl OverlayParams {
    /// Derive overlay parameters.
    ///
    /// `transparent_percent` is a transparency level: higher values reduce
    /// the final alpha. Percentages are not range-checked here; any `i32`
    /// is accepted.
    pub fn derive(position: Position, scale_percent: i32, transparent_percent: i32) -> Self {
        Self {
            overlay_xy: overlay_xy(position),
            scale_factor: scale_percent as f32 / 100.0,
            alpha_factor: (100 - i64::from(transparent_percent)) as f32 / 100.0,
        }
    }

    pub fn for_job(job: &JobDescriptor) -> Self {
        Self::derive(job.position, job.scale_percent, job.opacity_percent)
    }

    /// Render the full `filter_complex` expression.
    pub fn filter_complex(&self) -> String {
        format!(
            "[1][0]scale2ref=w=oh*mdar:h=ih*{:.2}[logo][video];\
             [logo]format=rgba,colorchannelmixer=aa={:.2}[logo];\
             [video][logo]overlay={}:format=auto,format=yuv420p",
            self.scale_factor, self.alpha_factor, self.overlay_xy
        )
    }
}

/// Overlay coordinates for a corner, `W`/`H` being the frame and `w`/`h`
/// the watermark dimensions.
pub fn overlay_xy(position: Position) -> String {
    let m = OVERLAY_MARGIN_PX;
    match position {
        Position::TopLeft => format!("{m}:{m}"),
        Position::TopRight => format!("W-w-{m}:{m}"),
        Position::BottomLeft => format!("{m}:H-h-{m}"),
        Position::BottomRight => format!("W-w-{m}:H-h-{m}"),
    }
}

/// Everything the engine needs to watermark one file.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Secondary input composited onto the primary one
    pub overlay_input: PathBuf,
    pub filter_complex: String,
    /// Still images produce exactly one output frame
    pub single_frame: bool,
}

impl TranscodeRequest {
    /// Build the request for one file of a job.
    pub fn for_file(job: &JobDescriptor, file: &ConvertFile) -> Self {
        Self {
            input: file.path.clone(),
            output: job.output_path_for(file),
            overlay_input: job.watermark_path.clone(),
            filter_complex: OverlayParams::for_job(job).filter_complex(),
            single_frame: file.kind.is_image(),
        }
    }

    pub fn to_command(&self) -> FfmpegCommand {
        let cmd = FfmpegCommand::new(&self.input, &self.output)
            .additional_input(&self.overlay_input)
            .filter_complex(self.filter_complex.clone());

        if self.single_frame {
            cmd.single_frame()
        } else {
            cmd
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overlay_xy_table() {
        assert_eq!(overlay_xy(Position::TopLeft), "5:5");
        assert_eq!(overlay_xy(Position::TopRight), "W-w-5:5");
        assert_eq!(overlay_xy(Position::BottomLeft), "5:H-h-5");
        assert_eq!(overlay_xy(Position::BottomRight), "W-w-5:H-h-5");
    }

    #[test]
    fn test_unrecognized_position_uses_bottom_right() {
        let params = OverlayParams::derive(Position::parse_lenient("middle"), 10, 0);
        assert_eq!(params.overlay_xy, "W-w-5:H-h-5");
    }

    #[test]
    fn test_alpha_factor_inverts_transparency() {
        assert_eq!(OverlayParams::derive(Position::TopLeft, 10, 0).alpha_factor, 1.0);
        assert_eq!(OverlayParams::derive(Position::TopLeft, 10, 100).alpha_factor, 0.0);

        let mut previous = f32::INFINITY;
        for transparent in 0..=100 {
            let alpha = OverlayParams::derive(Position::TopLeft, 10, transparent).alpha_factor;
            assert!(alpha < previous);
            previous = alpha;
        }
    }

    #[test]
    fn test_scale_factor() {
        let params = OverlayParams::derive(Position::TopLeft, 25, 0);
        assert!((params.scale_factor - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_filter_complex() {
        let params = OverlayParams::derive(Position::TopRight, 15, 30);
        assert_eq!(
            params.filter_complex(),
            "[1][0]scale2ref=w=oh*mdar:h=ih*0.15[logo][video];\
             [logo]format=rgba,colorchannelmixer=aa=0.70[logo];\
             [video][logo]overlay=W-w-5:5:format=auto,format=yuv420p"
        );
    }

    #[test]
    fn test_out_of_range_passed_through() {
        let params = OverlayParams::derive(Position::BottomRight, 150, 120);
        let filter = params.filter_complex();
        assert!(filter.contains("h=ih*1.50"));
        assert!(filter.contains("aa=-0.20"));
    }

    #[test]
    fn test_extreme_percentages_do_not_overflow() {
        let low = OverlayParams::derive(Position::TopLeft, i32::MIN, i32::MIN);
        assert!(low.alpha_factor.is_finite());
        assert!(low.alpha_factor > 0.0);
        assert!(low.scale_factor < 0.0);

        let high = OverlayParams::derive(Position::TopLeft, i32::MAX, i32::MAX);
        assert!(high.alpha_factor.is_finite());
        assert!(high.alpha_factor < 0.0);
        assert!(high.scale_factor > 0.0);
    }

    #[test]
    fn test_request_for_extreme_job() {
        let job = JobDescriptor::from_payload(json!({
            "files": [{"name": "a.png", "path": "/in/a.png", "type": "img"}],
            "transparent": i32::MIN,
            "size": 150,
            "watermark": "/wm/logo.png"
        }))
        .unwrap();

        let request = TranscodeRequest::for_file(&job, &job.files[0]);
        assert!(request.filter_complex.contains("h=ih*1.50"));
    }

    #[test]
    fn test_request_for_file() {
        let job = JobDescriptor::from_payload(json!({
            "files": [
                {"name": "a.mp4", "path": "/in/a.mp4", "type": "vid"},
                {"name": "b.jpg", "path": "/in/b.jpg", "type": "img"}
            ],
            "transparent": 0,
            "size": 20,
            "watermark": "/wm/logo.png",
            "prefix": "x_",
            "position": "top-left",
            "outputFolder": "/out"
        }))
        .unwrap();

        let video = TranscodeRequest::for_file(&job, &job.files[0]);
        assert_eq!(video.output, PathBuf::from("/out/x_a.mp4"));
        assert_eq!(video.overlay_input, PathBuf::from("/wm/logo.png"));
        assert!(!video.single_frame);
        assert!(video.filter_complex.contains("overlay=5:5"));

        let image = TranscodeRequest::for_file(&job, &job.files[1]);
        assert!(image.single_frame);
        let args = image.to_command().build_args();
        assert!(args.contains(&"/wm/logo.png".to_string()));
        assert!(args.contains(&"-frames:v".to_string()));
    }
}
