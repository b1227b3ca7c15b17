//! Segment boundaries derived from the nominal track length.

/// Fixed slicing of a nominal track into equal segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPlan {
    /// Samples in one nominal track (`sample_rate * track_duration`).
    pub samples_per_track: usize,
    /// Samples in one segment (`samples_per_track / num_segments`).
    pub samples_per_segment: usize,
    /// Frames a full segment yields (`ceil(samples_per_segment / hop_length)`).
    pub expected_frames: usize,
    /// Number of segments per track.
    pub num_segments: usize,
}

impl SegmentPlan {
    /// Derive the plan from the run settings.
    ///
    /// `hop_length` and `num_segments` must be non-zero.
    pub fn new(sample_rate: u32, track_duration: f32, num_segments: usize, hop_length: usize) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let samples_per_track = (f64::from(sample_rate) * f64::from(track_duration)) as usize;
        let samples_per_segment = samples_per_track / num_segments;

        Self {
            samples_per_track,
            samples_per_segment,
            expected_frames: samples_per_segment.div_ceil(hop_length),
            num_segments,
        }
    }

    /// Slice `samples` into the planned segments.
    ///
    /// Segments past the end of a short signal come out truncated or empty;
    /// nothing is padded.
    pub fn segments<'a>(&self, samples: &'a [f32]) -> impl Iterator<Item = &'a [f32]> + 'a {
        let size = self.samples_per_segment;
        (0..self.num_segments).map(move |d| {
            let start = (size * d).min(samples.len());
            let end = (start + size).min(samples.len());
            &samples[start..end]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_constants() {
        let plan = SegmentPlan::new(22_050, 5.0, 10, 512);
        assert_eq!(plan.samples_per_track, 110_250);
        assert_eq!(plan.samples_per_segment, 11_025);
        assert_eq!(plan.expected_frames, 22);
    }

    #[test]
    fn test_segment_size_rounds_down() {
        let plan = SegmentPlan::new(22_050, 5.0, 4, 512);
        assert_eq!(plan.samples_per_segment, 27_562);
        assert_eq!(plan.expected_frames, 54);
    }

    #[test]
    fn test_segments_of_full_track() {
        let plan = SegmentPlan::new(100, 1.0, 4, 10);
        let samples: Vec<f32> = (0..100u8).map(f32::from).collect();
        let segments: Vec<_> = plan.segments(&samples).collect();
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|s| s.len() == 25));
        assert!((segments[1][0] - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_segments_of_short_signal_are_truncated() {
        let plan = SegmentPlan::new(100, 1.0, 4, 10);
        let samples = vec![0.0f32; 60];
        let lengths: Vec<_> = plan.segments(&samples).map(<[f32]>::len).collect();
        assert_eq!(lengths, vec![25, 25, 10, 0]);
    }

    #[test]
    fn test_longer_signal_ignores_tail() {
        let plan = SegmentPlan::new(100, 1.0, 2, 10);
        let samples = vec![0.0f32; 500];
        let total: usize = plan.segments(&samples).map(<[f32]>::len).sum();
        assert_eq!(total, 100);
    }
}
