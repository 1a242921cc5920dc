//! Post-condition checks for a laid-out routine.
//!
//! Checks run in a fixed order and stop at the first violation. A failure
//! here means the packer (or an edit) produced an inconsistent schedule.

use crate::error::ValidationError;
use crate::routine::RoutineSegment;
use crate::window::DayWindow;

/// Validate `segments` against `window`.
///
/// 1. starts strictly increasing
/// 2. no overlap between neighbours
/// 3. every segment inside the window
/// 4. `duration_minutes == end - start`
/// 5. total duration within the window width
pub fn validate(window: &DayWindow, segments: &[RoutineSegment]) -> Result<(), ValidationError> {
    for (index, pair) in segments.windows(2).enumerate() {
        if pair[1].start_minute <= pair[0].start_minute {
            return Err(ValidationError::NotSorted {
                index: index + 1,
                start: pair[1].start_minute,
                previous_start: pair[0].start_minute,
            });
        }
    }

    for (index, pair) in segments.windows(2).enumerate() {
        if pair[0].end_minute > pair[1].start_minute {
            return Err(ValidationError::Overlap {
                index: index + 1,
                start: pair[1].start_minute,
                previous_end: pair[0].end_minute,
            });
        }
    }

    for (index, segment) in segments.iter().enumerate() {
        if !window.contains_range(segment.start_minute, segment.end_minute)
            || segment.end_minute < segment.start_minute
        {
            return Err(ValidationError::OutsideWindow {
                index,
                start: segment.start_minute,
                end: segment.end_minute,
                window_start: window.start_minute,
                window_end: window.end_minute,
            });
        }
    }

    for (index, segment) in segments.iter().enumerate() {
        let actual = segment.end_minute as i64 - segment.start_minute as i64;
        if actual != segment.duration_minutes as i64 {
            return Err(ValidationError::DurationMismatch {
                index,
                claimed: segment.duration_minutes,
                actual,
            });
        }
    }

    let total: u64 = segments.iter().map(|s| s.duration_minutes as u64).sum();
    if total > window.width() as u64 {
        return Err(ValidationError::ExceedsWindow {
            total,
            available: window.width(),
        });
    }

    Ok(())
}
