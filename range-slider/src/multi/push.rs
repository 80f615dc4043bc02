use smallvec::SmallVec;
use tracing::debug;

use crate::points::PointSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    fn neighbor(self, handle: usize, len: usize) -> Option<usize> {
        match self {
            Self::Left => handle.checked_sub(1),
            Self::Right => Some(handle + 1).filter(|next| *next < len),
        }
    }
}

/// Moves neighbouring handles so every pair keeps at least `threshold`
/// distance, stepping through the slider's points.
pub(crate) struct Pusher<'a> {
    points: PointSet<'a>,
    threshold: f64,
}

impl<'a> Pusher<'a> {
    pub(crate) fn new(points: PointSet<'a>, threshold: f64) -> Self {
        Self { points, threshold }
    }

    /// Makes room around `handle`, which was just moved away from
    /// `original_value`.
    ///
    /// The right neighbour is checked first and the left one second; when both
    /// are too close the left side is pushed. If the chain of pushes runs out
    /// of points, every handle it displaced is restored and `handle` goes back
    /// to `original_value`. Returns whether the move stands.
    pub(crate) fn push_surrounding(
        &self,
        bounds: &mut [f64],
        handle: usize,
        original_value: f64,
    ) -> bool {
        let value = bounds[handle];
        let mut direction = None;

        if let Some(&right) = bounds.get(handle + 1)
            && right - value < self.threshold
        {
            direction = Some(Direction::Right);
        }
        if let Some(left) = handle.checked_sub(1).map(|index| bounds[index])
            && value - left < self.threshold
        {
            direction = Some(Direction::Left);
        }

        let Some(direction) = direction else {
            return true;
        };
        let Some(next_handle) = direction.neighbor(handle, bounds.len()) else {
            return true;
        };

        let gap = direction.sign() * (bounds[next_handle] - value);
        let snapshot: SmallVec<[f64; 8]> = SmallVec::from_slice(bounds);

        if self.push_handle(bounds, next_handle, direction, self.threshold - gap) {
            return true;
        }

        bounds.copy_from_slice(&snapshot);
        bounds[handle] = original_value;
        debug!(
            handle,
            rejected = value,
            original_value,
            "not enough room to push neighbouring handles"
        );
        false
    }

    /// Pushes `handle` by at least `amount` in `direction`.
    fn push_handle(
        &self,
        bounds: &mut [f64],
        handle: usize,
        direction: Direction,
        amount: f64,
    ) -> bool {
        let original_value = bounds[handle];

        while direction.sign() * (bounds[handle] - original_value) < amount {
            if !self.push_handle_one_point(bounds, handle, direction) {
                bounds[handle] = original_value;
                return false;
            }
        }

        true
    }

    /// Moves `handle` to the adjacent point, pushing its own neighbour first
    /// when the new position would crowd it.
    fn push_handle_one_point(
        &self,
        bounds: &mut [f64],
        handle: usize,
        direction: Direction,
    ) -> bool {
        let Some(next_value) = self.adjacent_point(bounds[handle], direction) else {
            return false;
        };

        if let Some(next_handle) = direction.neighbor(handle, bounds.len()) {
            let gap = direction.sign() * (bounds[next_handle] - next_value);
            if !self.push_handle(bounds, next_handle, direction, self.threshold - gap) {
                return false;
            }
        }

        bounds[handle] = next_value;
        true
    }

    fn adjacent_point(&self, value: f64, direction: Direction) -> Option<f64> {
        match direction {
            Direction::Right => self.points.next_above(value),
            Direction::Left => self.points.next_below(value),
        }
    }
}
