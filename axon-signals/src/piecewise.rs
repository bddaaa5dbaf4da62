use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{f64::Time, time::second};

use axon_core::{Sample, Signal, SignalError};

const LINEAR_SEARCH_THRESHOLD: usize = 32;

/// A piecewise-constant signal over simulation time.
///
/// The signal holds each segment's value while time is inside that segment
/// and is zero outside every segment. Segments are validated at
/// construction: each must be well formed (`start < end`) and no two may
/// overlap.
#[derive(Debug, Clone)]
pub struct Piecewise {
    segments: Vec<Segment>,
}

/// One constant-valued span of simulation time, inclusive of `start` and
/// exclusive of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Time,
    pub end: Time,
    pub value: f64,
}

#[derive(Debug, Error)]
pub enum PiecewiseError {
    #[error("Segment {index} is invalid: start ({start} s) >= end ({end} s)")]
    InvalidSegment { index: usize, start: f64, end: f64 },

    #[error(
        "Segment {prev_index} (end: {prev_end} s) overlaps with segment {curr_index} (start: {curr_start} s)"
    )]
    OverlappingSegments {
        prev_index: usize,
        curr_index: usize,
        prev_end: f64,
        curr_start: f64,
    },
}

impl Piecewise {
    /// Builds a schedule from segments, sorting them by start time.
    ///
    /// # Errors
    ///
    /// Returns [`PiecewiseError::InvalidSegment`] for a segment whose start
    /// is not before its end, or [`PiecewiseError::OverlappingSegments`]
    /// when two segments cover the same instant.
    pub fn new(mut segments: Vec<Segment>) -> Result<Self, PiecewiseError> {
        for (index, segment) in segments.iter().enumerate() {
            if segment.start >= segment.end {
                return Err(PiecewiseError::InvalidSegment {
                    index,
                    start: segment.start.get::<second>(),
                    end: segment.end.get::<second>(),
                });
            }
        }

        segments.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));

        for i in 1..segments.len() {
            let prev = &segments[i - 1];
            let curr = &segments[i];
            if prev.end > curr.start {
                return Err(PiecewiseError::OverlappingSegments {
                    prev_index: i - 1,
                    curr_index: i,
                    prev_end: prev.end.get::<second>(),
                    curr_start: curr.start.get::<second>(),
                });
            }
        }

        Ok(Self { segments })
    }

    /// Returns the value at the given time, or zero outside every segment.
    ///
    /// Small schedules are scanned linearly; larger ones use binary search
    /// over the sorted segments.
    #[must_use]
    pub fn value_at(&self, time: Time) -> f64 {
        let covering = if self.segments.len() <= LINEAR_SEARCH_THRESHOLD {
            self.segments
                .iter()
                .find(|segment| segment.start <= time && time < segment.end)
        } else {
            self.segments
                .binary_search_by(|segment| {
                    if time < segment.start {
                        Ordering::Greater
                    } else if time >= segment.end {
                        Ordering::Less
                    } else {
                        Ordering::Equal
                    }
                })
                .ok()
                .map(|index| &self.segments[index])
        };

        covering.map_or(0.0, |segment| segment.value)
    }
}

impl Signal for Piecewise {
    fn sample(&self, time: Time) -> Result<Sample, SignalError> {
        Ok(Sample::from_elem(1, self.value_at(time)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn seconds(value: f64) -> Time {
        Time::new::<second>(value)
    }

    fn segment(start: f64, end: f64, value: f64) -> Segment {
        Segment {
            start: seconds(start),
            end: seconds(end),
            value,
        }
    }

    #[test]
    fn rejects_a_segment_that_ends_before_it_starts() {
        let result = Piecewise::new(vec![segment(2.0, 1.0, 0.5)]);

        assert!(matches!(
            result,
            Err(PiecewiseError::InvalidSegment { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_overlapping_segments() {
        let result = Piecewise::new(vec![segment(0.0, 2.0, 1.0), segment(1.5, 3.0, 2.0)]);

        assert!(matches!(
            result,
            Err(PiecewiseError::OverlappingSegments {
                prev_index: 0,
                curr_index: 1,
                ..
            })
        ));
    }

    #[test]
    fn looks_up_values_and_is_zero_outside_every_segment() {
        let schedule = Piecewise::new(vec![
            segment(1.0, 2.0, 0.5),
            segment(3.0, 4.0, -1.0),
        ])
        .unwrap();

        assert_relative_eq!(schedule.value_at(seconds(0.5)), 0.0);
        assert_relative_eq!(schedule.value_at(seconds(1.0)), 0.5);
        assert_relative_eq!(schedule.value_at(seconds(1.99)), 0.5);
        assert_relative_eq!(schedule.value_at(seconds(2.0)), 0.0, epsilon = f64::EPSILON);
        assert_relative_eq!(schedule.value_at(seconds(3.5)), -1.0);
        assert_relative_eq!(schedule.value_at(seconds(9.0)), 0.0);
    }

    #[test]
    fn unsorted_segments_are_sorted_at_construction() {
        let schedule =
            Piecewise::new(vec![segment(3.0, 4.0, 2.0), segment(0.0, 1.0, 1.0)]).unwrap();

        assert_relative_eq!(schedule.value_at(seconds(0.5)), 1.0);
        assert_relative_eq!(schedule.value_at(seconds(3.5)), 2.0);
    }

    #[test]
    fn large_schedules_take_the_binary_search_path() {
        let segments: Vec<Segment> = (0..100)
            .map(|i| segment(f64::from(i), f64::from(i) + 0.5, f64::from(i)))
            .collect();
        let schedule = Piecewise::new(segments).unwrap();

        assert_relative_eq!(schedule.value_at(seconds(42.25)), 42.0);
        assert_relative_eq!(schedule.value_at(seconds(42.75)), 0.0);
        assert_relative_eq!(schedule.value_at(seconds(99.0)), 99.0);
    }

    #[test]
    fn samples_like_any_other_signal() {
        let schedule = Piecewise::new(vec![segment(0.0, 1.0, 7.0)]).unwrap();

        let sample = schedule.sample(seconds(0.5)).unwrap();
        assert_eq!(sample, Sample::from_elem(1, 7.0));
    }
}
